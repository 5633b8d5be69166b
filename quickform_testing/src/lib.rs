use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::error;

pub mod emailjs;
pub mod postgrest;

/// Serve `router` on an ephemeral localhost port in the background and return
/// the bound address.
pub async fn spawn(router: Router) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to an ephemeral port")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            error!("Testing server on {addr} stopped: {err}");
        }
    });

    Ok(addr)
}

async fn serve(router: Router, host: std::net::IpAddr, port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}
