use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, HttpResponse};
use og_core::services::otp::{DispatchGateway, EphemeralStore};
use og_shared::types::ServiceHealth;
use og_shared::{HealthResponse, HealthStatus};

use crate::app::AppState;

/// Handler for GET /health
///
/// Pings the store; 503 when it does not answer.
pub async fn health_check<S, D>(state: web::Data<AppState<S, D>>) -> HttpResponse
where
    S: EphemeralStore + ?Sized + 'static,
    D: DispatchGateway + ?Sized + 'static,
{
    let start = Instant::now();
    let store = match state.otp_service.ping().await {
        Ok(()) => ServiceHealth {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::error!(error = %e, "Store health check failed");
            ServiceHealth {
                status: HealthStatus::Unhealthy,
                message: Some("store unreachable".to_string()),
                response_time_ms: Some(start.elapsed().as_millis() as u64),
            }
        }
    };

    let mut services = HashMap::new();
    services.insert("store".to_string(), store);
    let response = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));

    match response.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(response),
        _ => HttpResponse::Ok().json(response),
    }
}
