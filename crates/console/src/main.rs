mod api;
mod client;
mod metrics;
mod render;
mod state;
mod view;

use crate::client::CertidaoClient;
use crate::state::AppState;
use anyhow::Result;
use certidao_common::config::AppConfig;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env()?;
    let read_url = config.require_read_url()?;

    let client = CertidaoClient::new(config.relay_url.as_str(), read_url)?;
    let state = AppState::new(client, Duration::from_secs(config.banner_timeout_secs));
    info!(relay_url = %config.relay_url, "console submits through relay");

    let console_addr = config.console_addr.clone();
    let api_task = tokio::spawn(async move {
        let app = api::router(state);
        match tokio::net::TcpListener::bind(&console_addr).await {
            Ok(listener) => {
                info!("console listening on {}", console_addr);
                if let Err(err) = axum::serve(listener, app).await {
                    warn!("console exited: {}", err);
                }
            }
            Err(err) => warn!("failed to bind console: {}", err),
        }
    });

    tokio::select! {
        _ = api_task => {},
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
        }
    }

    Ok(())
}
