use actix_web::{web, HttpServer};
use anyhow::Context;

use pv_api::{create_app, telemetry, AppState};
use pv_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(environment = %config.environment, "Starting payment voucher OTP server");

    let services = pv_infra::initialize(&config)
        .await
        .context("Failed to initialize infrastructure")?;

    let cleanup_handle = services.cleanup.clone().start_background_task();

    let app_state = web::Data::new(AppState::from_services(&services, &config));
    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    tracing::info!("Server stopped");
    Ok(())
}
