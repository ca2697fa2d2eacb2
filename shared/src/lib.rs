//! Shared utilities and common types for OtpGuard server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (cache, OTP policy, dispatch, server)
//! - Error response structures
//! - Utility functions (identifier validation, log masking)
//! - API response wrappers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, DispatchConfig, Environment, LoggingConfig,
    OtpPolicyConfig, ServerConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::validation;
