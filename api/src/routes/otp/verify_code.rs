use actix_web::{web, HttpRequest, HttpResponse};
use og_core::services::otp::{DispatchGateway, EphemeralStore};
use og_shared::validation::mask_identifier;
use og_shared::ApiResponse;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{domain_error_response, request_id, validation_error_response};

/// Handler for POST /api/v1/otp/verify
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "otp": "123456"
/// }
/// ```
///
/// A wrong code answers 400 with `details.attempts_left`; the submission
/// that exhausts the attempts, and any submission while the account is
/// locked, answers 429 with `Retry-After`.
pub async fn verify_code<S, D>(
    req: HttpRequest,
    state: web::Data<AppState<S, D>>,
    body: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: EphemeralStore + ?Sized + 'static,
    D: DispatchGateway + ?Sized + 'static,
{
    let request_id = request_id(&req);

    if let Err(errors) = body.validate() {
        tracing::warn!(request_id = %request_id, errors = ?errors, "Invalid OTP verify body");
        return validation_error_response(&errors);
    }

    match state.otp_service.verify_code(&body.email, &body.otp).await {
        Ok(()) => HttpResponse::Ok().json(
            ApiResponse::success(VerifyOtpResponse {
                message: "OTP verified successfully".to_string(),
            })
            .with_request_id(request_id),
        ),
        Err(error) => {
            tracing::info!(
                request_id = %request_id,
                identifier = %mask_identifier(&body.email),
                error = %error,
                "OTP verification refused"
            );
            domain_error_response(&error)
        }
    }
}
