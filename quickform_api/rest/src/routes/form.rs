use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use quickform_core_form_contracts::{FormFeatureService, FormSubmitError};
use quickform_models::submission::{
    ParseSubmissionFieldError, SubmissionField, SubmissionValidationError,
};

use super::{error, field_error};
use crate::models::form::{ApiChangeField, ApiFormState, ApiNotification};

/// Routes of the registration form.
///
/// There is a single draft shared by every client: `GET /form` returns the
/// name, email and phone number someone else may be typing in. Do not expose
/// these routes to the public without putting a per-user layer in front.
pub fn router(service: Arc<impl FormFeatureService>) -> Router<()> {
    Router::new()
        .route("/form", routing::get(get_state).patch(change_field))
        .route("/form/submit", routing::post(submit))
        .with_state(service)
}

async fn get_state(service: State<Arc<impl FormFeatureService>>) -> Response {
    Json(ApiFormState::from(service.state())).into_response()
}

async fn change_field(
    service: State<Arc<impl FormFeatureService>>,
    Json(ApiChangeField { field, value }): Json<ApiChangeField>,
) -> Response {
    let field = match field.parse::<SubmissionField>() {
        Ok(field) => field,
        Err(ParseSubmissionFieldError::ReadOnly(field)) => {
            return field_error(StatusCode::UNPROCESSABLE_ENTITY, "Field is read-only", field)
        }
        Err(ParseSubmissionFieldError::Unknown(field)) => {
            return field_error(StatusCode::UNPROCESSABLE_ENTITY, "Unknown field", field)
        }
    };

    Json(ApiFormState::from(service.change_field(field, value))).into_response()
}

async fn submit(service: State<Arc<impl FormFeatureService>>) -> Response {
    let draft = service.state().draft;
    if let Err(err) = draft.validate() {
        return match err {
            SubmissionValidationError::Missing(field) => field_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Field is required",
                field.wire_name(),
            ),
            SubmissionValidationError::InvalidEmail => field_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid email address",
                SubmissionField::Email.wire_name(),
            ),
        };
    }

    match service.submit(draft).await {
        Ok(notification) if notification.is_success() => {
            Json(ApiNotification::from(notification)).into_response()
        }
        Ok(notification) => {
            (StatusCode::BAD_GATEWAY, Json(ApiNotification::from(notification))).into_response()
        }
        Err(FormSubmitError::AlreadySubmitting) => {
            error(StatusCode::CONFLICT, "A submission is already in progress")
        }
    }
}
