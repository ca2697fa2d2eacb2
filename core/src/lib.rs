//! # OtpGuard Core
//!
//! Core business logic for the OtpGuard backend.
//! This crate contains the passcode domain (keys, codes, the per-identifier
//! challenge state machine), the OTP services (rate limiter, issuer,
//! verifier) and the error types they report.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
