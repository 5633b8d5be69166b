use chrono::{DateTime, Utc};
use quickform_shared_contracts::time::TimeService;

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[tracing::instrument(level = "trace", skip(self), ret)]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
