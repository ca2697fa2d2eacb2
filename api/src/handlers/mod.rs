//! Shared handler plumbing: error mapping, request ids, health check

pub mod error;
pub mod health;

pub use error::{domain_error_response, json_config, status_for, validation_error_response};
pub use health::health_check;

use actix_web::HttpRequest;
use uuid::Uuid;

/// Request id from `X-Request-ID`, or a fresh one
pub fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get("X-Request-ID")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
