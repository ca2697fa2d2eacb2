//! One-time passcode services
//!
//! This module provides the complete passcode workflow:
//! - Code generation from a CSPRNG
//! - Request throttling (cooldown, spam lock) and the account lock guard
//! - Issuing and dispatching codes
//! - Verifying submissions with attempt tracking and lockout

mod config;
mod generator;
mod issuer;
mod rate_limiter;
mod service;
mod traits;
mod types;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use generator::{CodeGenerator, SecureCodeGenerator};
pub use issuer::OtpIssuer;
pub use rate_limiter::RateLimiter;
pub use service::OtpService;
pub use traits::{DispatchGateway, EphemeralStore};
pub use types::{DispatchContext, IssuedChallenge, OtpRequest, OtpStatus};
pub use verifier::OtpVerifier;
