use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use pretty_assertions::assert_eq;
use quickform_core_form_contracts::{FormFeatureService, FormSubmitError};
use quickform_email_contracts::{DispatchOutcome, MockEmailDispatchService};
use quickform_models::{
    form::{FormPhase, FormState, Notification},
    submission::{Submission, SubmissionField},
};
use quickform_persistence_contracts::{MockSubmissionRepository, SubmissionRepoError};
use quickform_shared_contracts::time::MockTimeService;
use quickform_utils::Apply;

use super::{alice, fill, now, record, Sut};

#[tokio::test]
async fn ok() {
    // Arrange
    let submission = alice().with(|s| s.message = "Disponible le soir".into());

    let time = MockTimeService::new().with_now(now());
    let submission_repo =
        MockSubmissionRepository::new().with_insert(record(submission.clone()), Ok(()));
    let email_dispatch = MockEmailDispatchService::new()
        .with_dispatch(submission.clone(), Ok(DispatchOutcome::Sent));

    let sut = Sut::new(time, submission_repo, email_dispatch);
    fill(&sut, &submission);

    // Act
    let result = sut.submit(submission.clone()).await;

    // Assert
    assert_eq!(result.unwrap(), Notification::success());
    assert_eq!(
        sut.state(),
        FormState {
            draft: Submission::default(),
            phase: FormPhase::Succeeded,
        }
    );
}

#[tokio::test]
async fn edit_after_copy_not_submitted() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let submission_repo = MockSubmissionRepository::new().with_insert(record(alice()), Ok(()));
    let email_dispatch =
        MockEmailDispatchService::new().with_dispatch(alice(), Ok(DispatchOutcome::Sent));

    let sut = Sut::new(time, submission_repo, email_dispatch);
    fill(&sut, &alice());
    let draft = sut.state().draft;
    sut.change_field(SubmissionField::Name, String::new());

    // Act
    let result = sut.submit(draft).await;

    // Assert
    assert_eq!(result.unwrap(), Notification::success());
    assert_eq!(sut.state().draft, Submission::default());
}

#[tokio::test]
async fn ok_email_not_configured() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let submission_repo = MockSubmissionRepository::new().with_insert(record(alice()), Ok(()));
    let email_dispatch =
        MockEmailDispatchService::new().with_dispatch(alice(), Ok(DispatchOutcome::Skipped));

    let sut = Sut::new(time, submission_repo, email_dispatch);
    fill(&sut, &alice());

    // Act
    let result = sut.submit(alice()).await;

    // Assert
    assert_eq!(result.unwrap(), Notification::success());
    assert_eq!(sut.state().draft, Submission::default());
}

#[tokio::test]
async fn persistence_error() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let submission_repo = MockSubmissionRepository::new().with_insert(
        record(alice()),
        Err(SubmissionRepoError::Rejected {
            code: Some("23505".into()),
            message: "duplicate key value violates unique constraint".into(),
            details: None,
            hint: None,
        }),
    );

    let sut = Sut::new(time, submission_repo, MockEmailDispatchService::new());
    fill(&sut, &alice());

    // Act
    let result = sut.submit(alice()).await;

    // Assert
    assert_eq!(result.unwrap(), Notification::failure());
    assert_eq!(
        sut.state(),
        FormState {
            draft: alice(),
            phase: FormPhase::Failed,
        }
    );
}

#[tokio::test]
async fn email_error() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let submission_repo = MockSubmissionRepository::new().with_insert(record(alice()), Ok(()));
    let email_dispatch = MockEmailDispatchService::new()
        .with_dispatch(alice(), Err("The template ID not found".into()));

    let sut = Sut::new(time, submission_repo, email_dispatch);
    fill(&sut, &alice());

    // Act
    let result = sut.submit(alice()).await;

    // Assert
    assert_eq!(result.unwrap(), Notification::failure());
    assert_eq!(
        sut.state(),
        FormState {
            draft: alice(),
            phase: FormPhase::Failed,
        }
    );
}

#[tokio::test]
async fn already_submitting() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let mut submission_repo = MockSubmissionRepository::new();
    submission_repo
        .expect_insert()
        .once()
        .returning(|_| Box::pin(std::future::pending()));

    let sut = Sut::new(time, submission_repo, MockEmailDispatchService::new());
    fill(&sut, &alice());

    let mut first = Box::pin(sut.submit(alice()));
    assert_eq!((&mut first).now_or_never(), None);
    assert_eq!(sut.state().phase, FormPhase::Submitting);

    // Act
    let result = sut.submit(alice()).await;

    // Assert
    assert_eq!(result, Err(FormSubmitError::AlreadySubmitting));
    assert_eq!(sut.state().phase, FormPhase::Submitting);
}

#[tokio::test]
async fn dropped_while_submitting() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let mut submission_repo = MockSubmissionRepository::new();
    submission_repo
        .expect_insert()
        .once()
        .returning(|_| Box::pin(std::future::pending()));

    let sut = Sut::new(time, submission_repo, MockEmailDispatchService::new());
    fill(&sut, &alice());

    // Act
    let result = sut.submit(alice()).now_or_never();

    // Assert
    assert_eq!(result, None);
    assert_eq!(
        sut.state(),
        FormState {
            draft: alice(),
            phase: FormPhase::Idle,
        }
    );
}

#[tokio::test]
async fn panic_while_submitting() {
    // Arrange
    async fn connection_reset() -> Result<(), SubmissionRepoError> {
        panic!("connection reset by peer")
    }

    let time = MockTimeService::new().with_now(now());
    let mut submission_repo = MockSubmissionRepository::new();
    submission_repo
        .expect_insert()
        .once()
        .returning(|_| Box::pin(connection_reset()));

    let sut = Sut::new(time, submission_repo, MockEmailDispatchService::new());
    fill(&sut, &alice());

    // Act
    let result = AssertUnwindSafe(sut.submit(alice())).catch_unwind().await;

    // Assert
    assert!(result.is_err());
    assert_eq!(
        sut.state(),
        FormState {
            draft: alice(),
            phase: FormPhase::Idle,
        }
    );
}
