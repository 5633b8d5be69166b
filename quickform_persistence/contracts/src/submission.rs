use std::future::Future;

use quickform_models::submission::SubmissionRecord;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionRepository: Send + Sync + 'static {
    /// Insert one submission into the submissions table.
    ///
    /// The backend assigns any identifiers; no deduplication happens here.
    fn insert(
        &self,
        record: &SubmissionRecord,
    ) -> impl Future<Output = Result<(), SubmissionRepoError>> + Send;

    /// Verify that the table service is reachable and accepts our credentials.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmissionRepoError {
    /// The table service refused the insert and explained why.
    #[error("The table service rejected the submission: {message}")]
    Rejected {
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionRepository {
    pub fn with_insert(
        mut self,
        record: SubmissionRecord,
        result: Result<(), SubmissionRepoError>,
    ) -> Self {
        self.expect_insert()
            .once()
            .with(mockall::predicate::eq(record))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, result: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if result {
                Ok(())
            } else {
                Err(anyhow::anyhow!("table service unreachable"))
            }))
        });
        self
    }
}
