
pub mod submission;

pub use submission::{SubmissionRepoError, SubmissionRepository};

#[cfg(feature = "mock")]
pub use submission::MockSubmissionRepository;
