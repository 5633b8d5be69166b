use std::future::Future;

use quickform_models::submission::Submission;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailDispatchService: Send + Sync + 'static {
    /// Notify the organizers about a new submission.
    ///
    /// Resolves to [`DispatchOutcome::Skipped`] without contacting the email
    /// provider when it has not been configured.
    fn dispatch(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = anyhow::Result<DispatchOutcome>> + Send;

    /// Whether the email provider has been configured.
    fn is_enabled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Skipped,
}

#[cfg(feature = "mock")]
impl MockEmailDispatchService {
    pub fn with_dispatch(
        mut self,
        submission: Submission,
        result: Result<DispatchOutcome, String>,
    ) -> Self {
        self.expect_dispatch()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }

    pub fn with_is_enabled(mut self, enabled: bool) -> Self {
        self.expect_is_enabled().return_const(enabled);
        self
    }
}
