use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use quickform_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    persistence: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { persistence, email } = service.get_status().await;

    // Submissions without notification emails still work.
    let status = if persistence {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse {
        http: true,
        persistence,
        email,
    };

    (status, Json(response)).into_response()
}
