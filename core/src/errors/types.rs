//! Passcode outcomes reported to callers.
//!
//! Every variant is an expected result of normal operation. Lock variants
//! carry the lock duration so callers can tell users how long to wait.

use og_shared::error_codes;
use thiserror::Error;

/// Broad classification of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input
    ValidationFailure,
    /// Cooldown, spam lock or account lock is active
    RateLimited,
    /// Wrong code, or the wrong code that exhausted the attempts
    VerificationFailed,
    /// No active code
    ChallengeExpired,
    /// The delivery gateway refused or failed
    DeliveryFailed,
    /// The store itself is unavailable
    Infrastructure,
}

/// Caller-facing passcode outcomes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error(
        "Account locked due to multiple failed attempts! Try again after {}.",
        human_duration(.retry_after_seconds)
    )]
    AccountLocked { retry_after_seconds: u64 },

    #[error("Too many OTP requests! Try again after {}.", human_duration(.retry_after_seconds))]
    SpamLocked { retry_after_seconds: u64 },

    #[error(
        "Please wait {} before requesting a new OTP.",
        human_duration(.retry_after_seconds)
    )]
    Cooldown { retry_after_seconds: u64 },

    #[error("Invalid OTP! You have {attempts_left} attempts left.")]
    InvalidCode { attempts_left: u32 },

    #[error(
        "Too many failed attempts! Account locked, try again after {}.",
        human_duration(.retry_after_seconds)
    )]
    AttemptsExhausted { retry_after_seconds: u64 },

    #[error("Invalid or expired OTP!")]
    ExpiredOrMissing,

    #[error("Failed to deliver OTP: {message}")]
    DeliveryFailed { message: String },
}

impl OtpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OtpError::AccountLocked { .. }
            | OtpError::SpamLocked { .. }
            | OtpError::Cooldown { .. } => ErrorKind::RateLimited,
            OtpError::InvalidCode { .. } | OtpError::AttemptsExhausted { .. } => {
                ErrorKind::VerificationFailed
            }
            OtpError::ExpiredOrMissing => ErrorKind::ChallengeExpired,
            OtpError::DeliveryFailed { .. } => ErrorKind::DeliveryFailed,
        }
    }

    /// Seconds until the blocking guard expires
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            OtpError::AccountLocked { retry_after_seconds }
            | OtpError::SpamLocked { retry_after_seconds }
            | OtpError::Cooldown { retry_after_seconds }
            | OtpError::AttemptsExhausted { retry_after_seconds } => Some(*retry_after_seconds),
            _ => None,
        }
    }

    /// Wrong submissions still tolerated before the account lock
    pub fn attempts_left(&self) -> Option<u32> {
        match self {
            OtpError::InvalidCode { attempts_left } => Some(*attempts_left),
            _ => None,
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::AccountLocked { .. } => error_codes::ACCOUNT_LOCKED,
            OtpError::SpamLocked { .. } => error_codes::SPAM_LOCKED,
            OtpError::Cooldown { .. } => error_codes::COOLDOWN,
            OtpError::InvalidCode { .. } => error_codes::VERIFICATION_CODE_INVALID,
            OtpError::AttemptsExhausted { .. } => error_codes::ATTEMPTS_EXHAUSTED,
            OtpError::ExpiredOrMissing => error_codes::VERIFICATION_CODE_EXPIRED,
            OtpError::DeliveryFailed { .. } => error_codes::DELIVERY_FAILED,
        }
    }
}

/// Render a lock duration the way users read it: whole hours, then whole
/// minutes, then seconds.
fn human_duration(seconds: &u64) -> String {
    let seconds = *seconds;
    let (value, unit) = if seconds >= 3600 && seconds % 3600 == 0 {
        (seconds / 3600, "hour")
    } else if seconds >= 60 && seconds % 60 == 0 {
        (seconds / 60, "minute")
    } else {
        (seconds, "second")
    };
    if value == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
