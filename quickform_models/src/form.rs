use crate::submission::Submission;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl FormPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// The observable state of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub draft: Submission,
    pub phase: FormPhase,
}

impl FormState {
    pub const fn submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A transient message shown to the user once a submission has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: &'static str,
}

impl Notification {
    pub const SUCCESS_MESSAGE: &'static str = "Inscription envoyée avec succès!";
    pub const FAILURE_MESSAGE: &'static str = "Erreur lors de l'envoi du formulaire";

    pub const fn success() -> Self {
        Self {
            kind: NotificationKind::Success,
            message: Self::SUCCESS_MESSAGE,
        }
    }

    pub const fn failure() -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: Self::FAILURE_MESSAGE,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.kind, NotificationKind::Success)
    }
}
