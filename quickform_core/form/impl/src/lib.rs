use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quickform_core_form_contracts::{FormFeatureService, FormSubmitError};
use quickform_email_contracts::EmailDispatchService;
use quickform_models::{
    form::{FormPhase, FormState, Notification},
    submission::{Submission, SubmissionField, SubmissionRecord},
};
use quickform_persistence_contracts::SubmissionRepository;
use quickform_shared_contracts::time::TimeService;
use tracing::{error, info};

pub mod pipeline;

#[cfg(test)]
mod tests;

/// Owns the draft of the registration form and drives its submission.
#[derive(Debug, Clone)]
pub struct FormFeatureServiceImpl<Time, SubmissionRepo, EmailDispatch> {
    time: Time,
    submission_repo: SubmissionRepo,
    email_dispatch: EmailDispatch,
    state: Arc<Mutex<FormState>>,
}

impl<Time, SubmissionRepo, EmailDispatch>
    FormFeatureServiceImpl<Time, SubmissionRepo, EmailDispatch>
{
    pub fn new(
        time: Time,
        submission_repo: SubmissionRepo,
        email_dispatch: EmailDispatch,
    ) -> Self {
        Self {
            time,
            submission_repo,
            email_dispatch,
            state: Default::default(),
        }
    }
}

impl<Time, SubmissionRepo, EmailDispatch> FormFeatureService
    for FormFeatureServiceImpl<Time, SubmissionRepo, EmailDispatch>
where
    Time: TimeService,
    SubmissionRepo: SubmissionRepository,
    EmailDispatch: EmailDispatchService,
{
    fn state(&self) -> FormState {
        lock(&self.state).clone()
    }

    fn change_field(&self, field: SubmissionField, value: String) -> FormState {
        let mut state = lock(&self.state);
        state.draft.set(field, value);
        if state.phase.is_terminal() {
            state.phase = FormPhase::Idle;
        }
        state.clone()
    }

    async fn submit(&self, draft: Submission) -> Result<Notification, FormSubmitError> {
        {
            let mut state = lock(&self.state);
            if state.submitting() {
                return Err(FormSubmitError::AlreadySubmitting);
            }
            state.phase = FormPhase::Submitting;
        }
        let guard = SubmittingGuard::new(&self.state);

        let record = SubmissionRecord {
            submission: draft,
            created_at: self.time.now(),
        };

        let notification =
            match pipeline::register(&self.submission_repo, &self.email_dispatch, &record).await {
                Ok(outcome) => {
                    info!(?outcome, "Registration submitted");
                    Notification::success()
                }
                Err(err) => {
                    error!(?err, "Registration failed: {err}");
                    Notification::failure()
                }
            };

        guard.settle(notification);
        Ok(notification)
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Leaves the `Submitting` phase when a submission ends without settling,
/// i.e. when the submit future is dropped or a remote call panics.
struct SubmittingGuard<'a> {
    state: &'a Mutex<FormState>,
    settled: bool,
}

impl<'a> SubmittingGuard<'a> {
    fn new(state: &'a Mutex<FormState>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, notification: Notification) {
        let mut state = lock(self.state);
        if notification.is_success() {
            state.draft = Submission::default();
            state.phase = FormPhase::Succeeded;
        } else {
            state.phase = FormPhase::Failed;
        }
        self.settled = true;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = lock(self.state);
        if state.submitting() {
            state.phase = FormPhase::Idle;
        }
    }
}
