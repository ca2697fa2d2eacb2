//! Mapping of domain outcomes to HTTP responses

use std::collections::HashMap;

use actix_web::{error::InternalError, http::StatusCode, web, HttpResponse};
use og_core::errors::{DomainError, ErrorKind};
use og_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use validator::ValidationErrors;

/// HTTP status for a domain error
///
/// | kind | status |
/// |---|---|
/// | validation, expired code, wrong code | 400 |
/// | cooldown, spam lock, account lock, exhausted attempts | 429 |
/// | delivery failure | 502 |
/// | store unavailable | 503 |
pub fn status_for(error: &DomainError) -> StatusCode {
    match error.kind() {
        ErrorKind::ValidationFailure | ErrorKind::ChallengeExpired => StatusCode::BAD_REQUEST,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::VerificationFailed => {
            if error.as_otp().and_then(|e| e.retry_after_seconds()).is_some() {
                StatusCode::TOO_MANY_REQUESTS
            } else {
                StatusCode::BAD_REQUEST
            }
        }
        ErrorKind::DeliveryFailed => StatusCode::BAD_GATEWAY,
        ErrorKind::Infrastructure => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Error body plus `Retry-After` when a guard is active
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    let mut builder = HttpResponse::build(status_for(error));
    if let Some(seconds) = error.as_otp().and_then(|e| e.retry_after_seconds()) {
        builder.insert_header(("Retry-After", seconds.to_string()));
    }
    builder.json(error.to_error_response())
}

/// 400 with the failing fields listed under `details.fields`
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: HashMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("fields", fields),
    )
}

/// JSON extractor limits with errors in the shared error body
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                format!("Invalid JSON body: {}", err),
            ));
            InternalError::from_response(err, response).into()
        })
}
