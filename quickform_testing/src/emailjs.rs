use std::{
    net::IpAddr,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// In-memory stand-in for the EmailJS send API.
#[derive(Debug, Clone)]
pub struct EmailJsFake(Arc<Inner>);

#[derive(Debug)]
struct Inner {
    service_id: String,
    template_id: String,
    public_key: String,
    sent: Mutex<Vec<Map<String, Value>>>,
}

impl EmailJsFake {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self(Arc::new(Inner {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            sent: Default::default(),
        }))
    }

    /// Template parameters of every accepted email, oldest first.
    pub fn sent(&self) -> Vec<Map<String, Value>> {
        self.0
            .sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(SEND_ROUTE, routing::post(send))
            .with_state(self.clone())
    }
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    service_id: String,
    template_id: String,
    public_key: String,
) -> anyhow::Result<()> {
    info!("Starting EmailJS testing server on {host}:{port}");
    info!("EmailJS send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Service id: {service_id:?}, template id: {template_id:?}, public key: {public_key:?}");

    let fake = EmailJsFake::new(service_id, template_id, public_key);
    super::serve(fake.router(), host, port).await
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: Map<String, Value>,
}

async fn send(
    State(fake): State<EmailJsFake>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, &'static str) {
    let inner = &fake.0;
    if request.user_id != inner.public_key {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid");
    }
    if request.service_id != inner.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid");
    }
    if request.template_id != inner.template_id {
        return (StatusCode::BAD_REQUEST, "The template ID not found");
    }

    info!(params = ?request.template_params, "email accepted");
    inner
        .sent
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request.template_params);

    (StatusCode::OK, "OK")
}
