use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The single training offering this form registers for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Course;

impl Course {
    pub const NAME: &'static str = "Création de site web avec WordPress";

    pub const fn as_str(self) -> &'static str {
        Self::NAME
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAME)
    }
}

/// A registrant's entered data.
///
/// A fresh (default) submission has every editable field empty and the course
/// pre-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: Course,
    pub message: String,
}

/// A submission as it is written to the table, stamped with its creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub submission: Submission,
    pub created_at: DateTime<Utc>,
}

/// The fields of a [`Submission`] that can be edited. The course is fixed and
/// therefore not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionField {
    Name,
    Email,
    Phone,
    Message,
}

impl SubmissionField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    /// Field name as used by the form and the `inscriptions` table.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "nom",
            Self::Email => "email",
            Self::Phone => "telephone",
            Self::Message => "message",
        }
    }

    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Message)
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

pub const COURSE_WIRE_NAME: &str = "formation";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSubmissionFieldError {
    #[error("The field {0:?} is read-only.")]
    ReadOnly(String),
    #[error("Unknown field {0:?}.")]
    Unknown(String),
}

impl FromStr for SubmissionField {
    type Err = ParseSubmissionFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == COURSE_WIRE_NAME {
            return Err(ParseSubmissionFieldError::ReadOnly(s.into()));
        }
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| ParseSubmissionFieldError::Unknown(s.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionValidationError {
    #[error("The field {0} is required.")]
    Missing(SubmissionField),
    #[error("The email address is invalid.")]
    InvalidEmail,
}

impl Submission {
    pub fn get(&self, field: SubmissionField) -> &str {
        match field {
            SubmissionField::Name => &self.name,
            SubmissionField::Email => &self.email,
            SubmissionField::Phone => &self.phone,
            SubmissionField::Message => &self.message,
        }
    }

    /// Replaces exactly one field, leaving all others untouched.
    ///
    /// Leading and trailing whitespace is stripped from email addresses, the
    /// way an email input does.
    pub fn set(&mut self, field: SubmissionField, value: String) {
        match field {
            SubmissionField::Name => self.name = value,
            SubmissionField::Email => self.email = value.trim().into(),
            SubmissionField::Phone => self.phone = value,
            SubmissionField::Message => self.message = value,
        }
    }

    /// Checks the constraints the form inputs enforce before a submission may
    /// be triggered: name, email and phone are required and the email address
    /// must be well-formed.
    pub fn validate(&self) -> Result<(), SubmissionValidationError> {
        if let Some(field) = SubmissionField::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .find(|&field| self.get(field).trim().is_empty())
        {
            return Err(SubmissionValidationError::Missing(field));
        }

        if !email_address::EmailAddress::is_valid(self.email.trim()) {
            return Err(SubmissionValidationError::InvalidEmail);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quickform_utils::{assert_matches, Apply};

    use super::*;

    fn alice() -> Submission {
        Submission {
            name: "Alice Doe".into(),
            email: "alice@example.com".into(),
            phone: "+229 01 02 03 04 05".into(),
            course: Course,
            message: String::new(),
        }
    }

    #[test]
    fn default_has_course() {
        let submission = Submission::default();
        assert_eq!(submission.course.as_str(), "Création de site web avec WordPress");
        assert!(submission.name.is_empty());
        assert!(submission.email.is_empty());
        assert!(submission.phone.is_empty());
        assert!(submission.message.is_empty());
    }

    #[test]
    fn set_replaces_one_field() {
        for field in SubmissionField::ALL {
            let expected = alice();
            let updated = alice().with(|s| s.set(field, "x".into()));

            for other in SubmissionField::ALL {
                if other == field {
                    assert_eq!(updated.get(other), "x");
                } else {
                    assert_eq!(updated.get(other), expected.get(other));
                }
            }
            assert_eq!(updated.course, Course);
        }
    }

    #[test]
    fn set_trims_email() {
        let mut submission = Submission::default();

        submission.set(SubmissionField::Email, " alice@example.com \n".into());
        submission.set(SubmissionField::Name, " Alice Doe ".into());

        assert_eq!(submission.email, "alice@example.com");
        assert_eq!(submission.name, " Alice Doe ");
    }

    #[test]
    fn set_is_idempotent() {
        let once = alice().with(|s| s.set(SubmissionField::Phone, "+33 6".into()));
        let twice = once
            .clone()
            .with(|s| s.set(SubmissionField::Phone, "+33 6".into()));
        assert_eq!(once, twice);
    }

    #[test]
    fn parse_field() {
        for field in SubmissionField::ALL {
            assert_eq!(field.wire_name().parse::<SubmissionField>(), Ok(field));
        }
        assert_matches!(
            "formation".parse::<SubmissionField>(),
            Err(ParseSubmissionFieldError::ReadOnly(_))
        );
        assert_matches!(
            "name".parse::<SubmissionField>(),
            Err(ParseSubmissionFieldError::Unknown(_))
        );
    }

    #[test]
    fn validate_ok() {
        alice().validate().unwrap();
    }

    #[test]
    fn validate_missing() {
        for (field, expected) in [
            (SubmissionField::Name, Some(SubmissionField::Name)),
            (SubmissionField::Email, Some(SubmissionField::Email)),
            (SubmissionField::Phone, Some(SubmissionField::Phone)),
            (SubmissionField::Message, None),
        ] {
            let result = alice().with(|s| s.set(field, "  ".into())).validate();
            assert_eq!(result.err(), expected.map(SubmissionValidationError::Missing));
        }
    }

    #[test]
    fn validate_invalid_email() {
        let result = alice()
            .with(|s| s.email = "alice.example.com".into())
            .validate();
        assert_eq!(result, Err(SubmissionValidationError::InvalidEmail));
    }
}
