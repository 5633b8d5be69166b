use chrono::{DateTime, TimeZone, Utc};
use quickform_core_form_contracts::FormFeatureService;
use quickform_email_contracts::MockEmailDispatchService;
use quickform_models::submission::{Submission, SubmissionField, SubmissionRecord};
use quickform_persistence_contracts::MockSubmissionRepository;
use quickform_shared_contracts::time::MockTimeService;

use crate::FormFeatureServiceImpl;

mod submit;

type Sut =
    FormFeatureServiceImpl<MockTimeService, MockSubmissionRepository, MockEmailDispatchService>;

fn alice() -> Submission {
    Submission {
        name: "Alice Doe".into(),
        email: "alice@example.com".into(),
        phone: "+229 01 02 03 04 05".into(),
        ..Default::default()
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
}

fn record(submission: Submission) -> SubmissionRecord {
    SubmissionRecord {
        submission,
        created_at: now(),
    }
}

fn fill(sut: &Sut, submission: &Submission) {
    for field in SubmissionField::ALL {
        sut.change_field(field, submission.get(field).into());
    }
}
