//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    CodeGenerator, DispatchContext, DispatchGateway, EphemeralStore, IssuedChallenge,
    OtpIssuer, OtpRequest, OtpService, OtpServiceConfig, OtpStatus, OtpVerifier, RateLimiter,
    SecureCodeGenerator,
};
