use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiError;

pub mod form;
pub mod health;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn error(code: StatusCode, detail: &'static str) -> Response {
    (code, Json(ApiError { detail, field: None })).into_response()
}

fn field_error(code: StatusCode, detail: &'static str, field: impl Into<String>) -> Response {
    let field = Some(field.into());
    (code, Json(ApiError { detail, field })).into_response()
}
