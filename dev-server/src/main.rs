//! Fake MDMS service for UI development
//!
//! Serves the seeded asset masters (tenants `pb` and `mh`, module `ASSET`)
//! on the MDMS search endpoint.
//!
//! Environment variables, optionally from a .env file:
//! - IP_ADDRESS: bind address, defaults to 127.0.0.1
//! - PORT: defaults to 8090, 0 for an OS-assigned port
//! - ALLOWED_ORIGINS: comma-separated CORS origins, defaults to "*"
//!
//! Usage: cargo run -p dev-server

use actix_web::web;
use anyhow::Result;
use test_helpers::mock::MdmsDataset;
use test_helpers::server::{Config, MdmsState, build};
use test_helpers::telemetry::{get_subscriber, init_subscriber, log_error};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info");
    init_subscriber(subscriber);

    if let Err(e) = run().await {
        log_error(e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let mut config = Config::from_env()?;
    let state = web::Data::new(MdmsState::new(MdmsDataset::assets()));
    let server = build(&mut config, state)?;
    let address = format!("http://{}:{}", config.ip, config.port);

    info!("MDMS: {address}/egov-mdms-service/v1/_search");
    info!("UI:   cd ui && MDMS_URL={address} trunk serve");
    info!("Press Ctrl+C to shutdown");

    let handle = server.handle();
    tokio::spawn(server);

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    handle.stop(true).await;
    Ok(())
}
