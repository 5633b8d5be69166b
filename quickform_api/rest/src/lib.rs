use std::net::IpAddr;

use anyhow::Context;
use axum::Router;
use quickform_core_form_contracts::FormFeatureService;
use quickform_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Form> {
    health: Health,
    form: Form,
}

impl<Health, Form> RestServer<Health, Form>
where
    Health: HealthFeatureService,
    Form: FormFeatureService,
{
    pub fn new(health: Health, form: Form) -> Self {
        Self { health, form }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Listening on {host}:{port}");
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::form::router(self.form.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
