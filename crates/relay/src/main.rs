mod api;
mod metrics;
mod state;
mod upstream;

use crate::state::AppState;
use anyhow::Result;
use certidao_common::config::AppConfig;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env()?;
    let script_write_url = config.require_write_url()?;

    // No timeout and no retries: a slow sheet simply holds the request open.
    let client = reqwest::Client::builder().build()?;
    let state = AppState::new(client, script_write_url);

    let relay_addr = config.relay_addr.clone();
    let api_task = tokio::spawn(async move {
        let app = api::router(state);
        match tokio::net::TcpListener::bind(&relay_addr).await {
            Ok(listener) => {
                info!("relay listening on {}", relay_addr);
                if let Err(err) = axum::serve(listener, app).await {
                    warn!("relay exited: {}", err);
                }
            }
            Err(err) => warn!("failed to bind relay: {}", err),
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
