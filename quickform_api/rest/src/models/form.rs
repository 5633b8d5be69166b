use quickform_models::{
    form::{FormPhase, FormState, Notification, NotificationKind},
    submission::Submission,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiFormState {
    pub draft: ApiSubmission,
    pub submitting: bool,
    pub phase: ApiFormPhase,
}

impl From<FormState> for ApiFormState {
    fn from(value: FormState) -> Self {
        Self {
            submitting: value.submitting(),
            phase: value.phase.into(),
            draft: value.draft.into(),
        }
    }
}

/// A submission as the form names its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSubmission {
    pub nom: String,
    pub email: String,
    pub telephone: String,
    pub formation: &'static str,
    pub message: String,
}

impl From<Submission> for ApiSubmission {
    fn from(value: Submission) -> Self {
        Self {
            nom: value.name,
            email: value.email,
            telephone: value.phone,
            formation: value.course.as_str(),
            message: value.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFormPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl From<FormPhase> for ApiFormPhase {
    fn from(value: FormPhase) -> Self {
        match value {
            FormPhase::Idle => Self::Idle,
            FormPhase::Submitting => Self::Submitting,
            FormPhase::Succeeded => Self::Succeeded,
            FormPhase::Failed => Self::Failed,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiChangeField {
    /// Wire name of the field, e.g. `nom` or `telephone`
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiNotification {
    pub kind: ApiNotificationKind,
    pub message: &'static str,
}

impl From<Notification> for ApiNotification {
    fn from(value: Notification) -> Self {
        Self {
            kind: value.kind.into(),
            message: value.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiNotificationKind {
    Success,
    Failure,
}

impl From<NotificationKind> for ApiNotificationKind {
    fn from(value: NotificationKind) -> Self {
        match value {
            NotificationKind::Success => Self::Success,
            NotificationKind::Failure => Self::Failure,
        }
    }
}
