use std::sync::Arc;

use chrono::Datelike;
use quickform_email_contracts::{DispatchOutcome, EmailDispatchService};
use quickform_extern_contracts::emailjs::{EmailJsApiService, EmailJsTemplateParams};
use quickform_models::{emailjs::EmailJsCredentials, submission::Submission};
use quickform_shared_contracts::time::TimeService;
use tracing::{error, info, warn};

pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "Aucun message";
pub const EMAIL_TITLE: &str = "Nouvelle inscription - Formation WordPress";

#[derive(Debug, Clone)]
pub struct EmailDispatchServiceImpl<Time, EmailJsApi> {
    time: Time,
    emailjs_api: EmailJsApi,
    config: EmailDispatchConfig,
}

#[derive(Debug, Clone)]
pub struct EmailDispatchConfig {
    /// `None` disables sending; dispatches then succeed without doing anything.
    pub credentials: Option<Arc<EmailJsCredentials>>,
}

impl<Time, EmailJsApi> EmailDispatchServiceImpl<Time, EmailJsApi> {
    pub fn new(time: Time, emailjs_api: EmailJsApi, config: EmailDispatchConfig) -> Self {
        Self {
            time,
            emailjs_api,
            config,
        }
    }
}

impl<Time, EmailJsApi> EmailDispatchService for EmailDispatchServiceImpl<Time, EmailJsApi>
where
    Time: TimeService,
    EmailJsApi: EmailJsApiService,
{
    async fn dispatch(&self, submission: &Submission) -> anyhow::Result<DispatchOutcome> {
        let Some(credentials) = self.config.credentials.as_deref() else {
            warn!("EmailJS is not configured, no email will be sent");
            return Ok(DispatchOutcome::Skipped);
        };

        let params = template_params(submission, self.time.now().year());

        self.emailjs_api
            .send(credentials, &params)
            .await
            .inspect(|()| info!("Registration email sent"))
            .inspect_err(|err| error!("Failed to send registration email: {err:#}"))?;

        Ok(DispatchOutcome::Sent)
    }

    fn is_enabled(&self) -> bool {
        self.config.credentials.is_some()
    }
}

fn template_params(submission: &Submission, year: i32) -> EmailJsTemplateParams {
    let message = if submission.message.is_empty() {
        EMPTY_MESSAGE_PLACEHOLDER.into()
    } else {
        submission.message.clone()
    };

    EmailJsTemplateParams {
        name: submission.name.clone(),
        email: submission.email.clone(),
        telephone: submission.phone.clone(),
        formation: submission.course.as_str().into(),
        message,
        title: EMAIL_TITLE.into(),
        reply_to: submission.email.clone(),
        sent_date: year,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use quickform_extern_contracts::emailjs::MockEmailJsApiService;
    use quickform_shared_contracts::time::MockTimeService;
    use quickform_utils::Apply;

    use super::*;

    fn alice() -> Submission {
        Submission {
            name: "Alice Doe".into(),
            email: "alice@example.com".into(),
            phone: "+229 01 02 03 04 05".into(),
            ..Default::default()
        }
    }

    fn credentials() -> EmailJsCredentials {
        EmailJsCredentials::from_parts(
            Some("service_test".into()),
            Some("template_test".into()),
            Some("public-key".into()),
        )
        .unwrap()
    }

    fn expected_params() -> EmailJsTemplateParams {
        EmailJsTemplateParams {
            name: "Alice Doe".into(),
            email: "alice@example.com".into(),
            telephone: "+229 01 02 03 04 05".into(),
            formation: "Création de site web avec WordPress".into(),
            message: "Aucun message".into(),
            title: "Nouvelle inscription - Formation WordPress".into(),
            reply_to: "alice@example.com".into(),
            sent_date: 2026,
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn ok_empty_message() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let emailjs_api =
            MockEmailJsApiService::new().with_send(credentials(), expected_params(), Ok(()));

        let sut = EmailDispatchServiceImpl::new(
            time,
            emailjs_api,
            EmailDispatchConfig {
                credentials: Some(credentials().into()),
            },
        );

        // Act
        let result = sut.dispatch(&alice()).await;

        // Assert
        assert_eq!(result.unwrap(), DispatchOutcome::Sent);
    }

    #[tokio::test]
    async fn ok_with_message() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let emailjs_api = MockEmailJsApiService::new().with_send(
            credentials(),
            expected_params().with(|p| p.message = "Disponible le soir".into()),
            Ok(()),
        );

        let sut = EmailDispatchServiceImpl::new(
            time,
            emailjs_api,
            EmailDispatchConfig {
                credentials: Some(credentials().into()),
            },
        );

        // Act
        let result = sut
            .dispatch(&alice().with(|s| s.message = "Disponible le soir".into()))
            .await;

        // Assert
        assert_eq!(result.unwrap(), DispatchOutcome::Sent);
    }

    #[tokio::test]
    async fn not_configured() {
        // Arrange
        let sut = EmailDispatchServiceImpl::new(
            MockTimeService::new(),
            MockEmailJsApiService::new(),
            EmailDispatchConfig { credentials: None },
        );

        // Act
        let result = sut.dispatch(&alice()).await;

        // Assert
        assert_eq!(result.unwrap(), DispatchOutcome::Skipped);
        assert!(!sut.is_enabled());
    }

    #[tokio::test]
    async fn provider_error() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let emailjs_api = MockEmailJsApiService::new().with_send(
            credentials(),
            expected_params(),
            Err("The template ID not found".into()),
        );

        let sut = EmailDispatchServiceImpl::new(
            time,
            emailjs_api,
            EmailDispatchConfig {
                credentials: Some(credentials().into()),
            },
        );

        // Act
        let result = sut.dispatch(&alice()).await;

        // Assert
        assert_eq!(result.unwrap_err().to_string(), "The template ID not found");
        assert!(sut.is_enabled());
    }
}
