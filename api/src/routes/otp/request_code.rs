use actix_web::{web, HttpRequest, HttpResponse};
use og_core::services::otp::{DispatchGateway, EphemeralStore, OtpRequest};
use og_shared::validation::mask_identifier;
use og_shared::ApiResponse;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{RequestOtpRequest, RequestOtpResponse};
use crate::handlers::{domain_error_response, request_id, validation_error_response};

/// Handler for POST /api/v1/otp/request
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "name": "Alice",
///     "purpose": "registration"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "message": "OTP sent successfully",
///         "resend_after": 60,
///         "expires_in": 300
///     },
///     "timestamp": "2025-08-14T10:00:00Z",
///     "request_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// 400 invalid input, 429 with `Retry-After` while a guard is active,
/// 502 when the mail could not be sent, 503 when the store is down.
pub async fn request_code<S, D>(
    req: HttpRequest,
    state: web::Data<AppState<S, D>>,
    body: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    S: EphemeralStore + ?Sized + 'static,
    D: DispatchGateway + ?Sized + 'static,
{
    let request_id = request_id(&req);

    if let Err(errors) = body.validate() {
        tracing::warn!(request_id = %request_id, errors = ?errors, "Invalid OTP request body");
        return validation_error_response(&errors);
    }

    let body = body.into_inner();
    let request = OtpRequest {
        identifier: body.email,
        name: body.name,
        purpose: body.purpose,
    };

    match state.otp_service.request_code(&request).await {
        Ok(issued) => {
            tracing::info!(
                request_id = %request_id,
                identifier = %mask_identifier(&issued.identifier),
                message_id = %issued.message_id,
                "OTP request served"
            );
            HttpResponse::Ok().json(
                ApiResponse::success(RequestOtpResponse {
                    message: "OTP sent successfully".to_string(),
                    resend_after: issued.resend_after_seconds,
                    expires_in: issued.expires_in_seconds,
                })
                .with_request_id(request_id),
            )
        }
        Err(error) => {
            tracing::info!(
                request_id = %request_id,
                identifier = %mask_identifier(&request.identifier),
                error = %error,
                "OTP request refused"
            );
            domain_error_response(&error)
        }
    }
}
