use quickform_email_contracts::{DispatchOutcome, EmailDispatchService};
use quickform_models::submission::SubmissionRecord;
use quickform_persistence_contracts::{SubmissionRepoError, SubmissionRepository};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Failed to save the submission: {0}")]
    Persist(SubmissionRepoError),
    #[error("Failed to send the notification email: {0:#}")]
    Dispatch(anyhow::Error),
}

/// Save the record, then notify the organizers about it.
///
/// The email is only dispatched once the record has been stored.
pub async fn register<SubmissionRepo, EmailDispatch>(
    submission_repo: &SubmissionRepo,
    email_dispatch: &EmailDispatch,
    record: &SubmissionRecord,
) -> Result<DispatchOutcome, RegistrationError>
where
    SubmissionRepo: SubmissionRepository,
    EmailDispatch: EmailDispatchService,
{
    submission_repo
        .insert(record)
        .await
        .map_err(RegistrationError::Persist)?;

    email_dispatch
        .dispatch(&record.submission)
        .await
        .map_err(RegistrationError::Dispatch)
}
