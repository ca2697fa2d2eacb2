//! Application state and route table

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use og_core::services::otp::{DispatchGateway, EphemeralStore, OtpService};
use og_shared::{error_codes, ErrorResponse};

use crate::handlers::health_check;
use crate::routes::otp::{otp_status, request_code, verify_code};

/// Application state that holds shared services
pub struct AppState<S, D>
where
    S: EphemeralStore + ?Sized,
    D: DispatchGateway + ?Sized,
{
    pub otp_service: Arc<OtpService<S, D>>,
}

/// Register the health check and the OTP routes
pub fn configure<S, D>(cfg: &mut web::ServiceConfig)
where
    S: EphemeralStore + ?Sized + 'static,
    D: DispatchGateway + ?Sized + 'static,
{
    cfg.route("/health", web::get().to(health_check::<S, D>))
        .service(
            web::scope("/api/v1/otp")
                .route("/request", web::post().to(request_code::<S, D>))
                .route("/verify", web::post().to(verify_code::<S, D>))
                .route("/status", web::get().to(otp_status::<S, D>)),
        );
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
