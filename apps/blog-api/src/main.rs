//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use blog_api::telemetry::{TelemetryConfig, init_telemetry};
use blog_api::{AppConfig, BlogServer};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env()?;

    tracing::info!(
        "Starting Blog API Server on {}:{}",
        config.host,
        config.port
    );

    let server = BlogServer::from_config(&config);
    let addr = server.start(&config.database.url, config.port).await?;
    tracing::info!(%addr, "Blog API Server ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    server.stop().await?;
    Ok(())
}
