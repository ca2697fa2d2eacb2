use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

use og_api::app::{configure, not_found, AppState};
use og_api::handlers::json_config;
use og_api::telemetry::init_tracing;
use og_core::services::otp::{DispatchGateway, EphemeralStore, OtpService, OtpServiceConfig};
use og_infra::config::InfrastructureConfig;
use og_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting OtpGuard API Server");

    config
        .otp
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid OTP policy: {}", e))?;

    let infra = og_infra::initialize(&InfrastructureConfig {
        cache: config.cache.clone(),
        dispatch: config.dispatch.clone(),
    })
    .await
    .context("Failed to initialize infrastructure")?;

    let otp_service: Arc<OtpService<dyn EphemeralStore, dyn DispatchGateway>> =
        Arc::new(OtpService::new(
            infra.store,
            infra.gateway,
            OtpServiceConfig::from_parts(&config.otp, &config.cache),
        ));
    let state = web::Data::new(AppState { otp_service });

    let bind_address = config.server.bind_address();
    let max_payload = config.server.max_payload_size;
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(json_config(max_payload))
            .wrap(TracingLogger::default())
            .configure(configure::<dyn EphemeralStore, dyn DispatchGateway>)
            .default_service(web::route().to(not_found))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    Ok(())
}
