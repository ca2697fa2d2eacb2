use actix_web::{web, HttpRequest, HttpResponse};
use og_core::services::otp::{DispatchGateway, EphemeralStore};
use og_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::handlers::{domain_error_response, request_id};

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OtpStatusResponse {
    pub active_code: bool,
    pub expires_in: Option<u64>,
    pub resend_after: u64,
    pub failed_attempts: u32,
    pub account_locked_for: Option<u64>,
    pub spam_locked_for: Option<u64>,
}

/// Handler for GET /api/v1/otp/status?email=...
pub async fn otp_status<S, D>(
    req: HttpRequest,
    state: web::Data<AppState<S, D>>,
    query: web::Query<StatusQuery>,
) -> HttpResponse
where
    S: EphemeralStore + ?Sized + 'static,
    D: DispatchGateway + ?Sized + 'static,
{
    match state.otp_service.status(&query.email).await {
        Ok(status) => HttpResponse::Ok().json(
            ApiResponse::success(OtpStatusResponse {
                active_code: status.has_active_code(),
                expires_in: status.code_expires_in,
                resend_after: status.resend_after(),
                failed_attempts: status.failed_attempts,
                account_locked_for: status.account_lock_remaining,
                spam_locked_for: status.spam_lock_remaining,
            })
            .with_request_id(request_id(&req)),
        ),
        Err(error) => domain_error_response(&error),
    }
}
