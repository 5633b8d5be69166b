use std::future::Future;

use quickform_models::{
    form::{FormState, Notification},
    submission::{Submission, SubmissionField},
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormFeatureService: Send + Sync + 'static {
    /// Return a snapshot of the draft and the current phase.
    fn state(&self) -> FormState;

    /// Replace a single field of the draft and return the new state.
    fn change_field(&self, field: SubmissionField, value: String) -> FormState;

    /// Persist `draft` and notify the organizers.
    ///
    /// `draft` is the copy of the form the caller has validated; edits made to
    /// the form after that copy was taken are not submitted.
    ///
    /// Remote failures do not surface as errors; they resolve to a failure
    /// [`Notification`] and leave the form's draft untouched. On success the
    /// draft is reset.
    fn submit(
        &self,
        draft: Submission,
    ) -> impl Future<Output = Result<Notification, FormSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormSubmitError {
    #[error("A submission is already in progress.")]
    AlreadySubmitting,
}

#[cfg(feature = "mock")]
impl MockFormFeatureService {
    pub fn with_state(mut self, state: FormState) -> Self {
        self.expect_state().once().return_const(state);
        self
    }

    pub fn with_change_field(
        mut self,
        field: SubmissionField,
        value: String,
        result: FormState,
    ) -> Self {
        self.expect_change_field()
            .once()
            .with(mockall::predicate::eq(field), mockall::predicate::eq(value))
            .return_const(result);
        self
    }

    pub fn with_submit(
        mut self,
        draft: Submission,
        result: Result<Notification, FormSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(draft))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
