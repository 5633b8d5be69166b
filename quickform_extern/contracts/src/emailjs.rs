use std::future::Future;

use quickform_models::emailjs::EmailJsCredentials;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailJsApiService: Send + Sync + 'static {
    /// Send an email using the template identified by `credentials`.
    fn send(
        &self,
        credentials: &EmailJsCredentials,
        params: &EmailJsTemplateParams,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Parameters substituted into the registration notification template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsTemplateParams {
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub formation: String,
    pub message: String,
    pub title: String,
    pub reply_to: String,
    pub sent_date: i32,
}

#[cfg(feature = "mock")]
impl MockEmailJsApiService {
    pub fn with_send(
        mut self,
        credentials: EmailJsCredentials,
        params: EmailJsTemplateParams,
        result: Result<(), String>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(credentials),
                mockall::predicate::eq(params),
            )
            .return_once(move |_, _| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }
}
