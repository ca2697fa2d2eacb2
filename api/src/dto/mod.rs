//! Request and response bodies

pub mod otp;

pub use otp::{RequestOtpRequest, RequestOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
