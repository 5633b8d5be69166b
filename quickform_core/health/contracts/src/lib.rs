use std::future::Future;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthFeatureService: Send + Sync + 'static {
    /// Report which backing services are usable.
    ///
    /// Results are cached for a short while, so repeated calls do not hit
    /// the table service every time.
    fn get_status(&self) -> impl Future<Output = HealthStatus> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    /// The submissions table answered a ping.
    pub persistence: bool,
    /// Email credentials are configured. The provider itself is never pinged
    /// because every request to it sends a real email.
    pub email: bool,
}

#[cfg(feature = "mock")]
impl MockHealthFeatureService {
    pub fn with_get_status(mut self, status: HealthStatus) -> Self {
        self.expect_get_status()
            .once()
            .return_once(move || Box::pin(std::future::ready(status)));
        self
    }
}
