use anyhow::Context;
use quickform_config::Config;
use quickform_persistence_contracts::SubmissionRepository;
use tracing::info;

use crate::environment::Provider;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let provider = Provider::new(&config)?;

    info!("Checking table service at {}", config.persistence.url);
    provider
        .submission_repo()
        .ping()
        .await
        .context("Table service is not usable")?;

    let server = provider.rest_server();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
