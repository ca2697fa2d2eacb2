//! One-time passcode policy configuration
//!
//! Every lifetime here doubles as the retry-after reported to callers when the
//! corresponding guard is active.

use serde::{Deserialize, Serialize};

use super::env_or;

/// Lifetimes and thresholds for issuing and verifying passcodes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpPolicyConfig {
    /// Lifetime of an issued code in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// Minimum delay between two code requests in seconds
    #[serde(default = "default_cooldown")]
    pub cooldown_seconds: u64,

    /// Lifetime of the request counter, reset on every increment
    #[serde(default = "default_request_window")]
    pub request_window_seconds: u64,

    /// Requests allowed per window; the next one trips the spam lock
    #[serde(default = "default_max_requests")]
    pub max_requests_per_window: u32,

    /// Duration of the spam lock in seconds
    #[serde(default = "default_spam_lock")]
    pub spam_lock_seconds: u64,

    /// Wrong submissions per code; the last one trips the account lock
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,

    /// Duration of the account lock in seconds
    #[serde(default = "default_account_lock")]
    pub account_lock_seconds: u64,
}

impl Default for OtpPolicyConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl(),
            cooldown_seconds: default_cooldown(),
            request_window_seconds: default_request_window(),
            max_requests_per_window: default_max_requests(),
            spam_lock_seconds: default_spam_lock(),
            max_failed_attempts: default_max_failed_attempts(),
            account_lock_seconds: default_account_lock(),
        }
    }
}

impl OtpPolicyConfig {
    /// Create from environment variables, keeping defaults for anything unset
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            code_ttl_seconds: env_or("OTP_CODE_TTL_SECS", d.code_ttl_seconds),
            cooldown_seconds: env_or("OTP_COOLDOWN_SECS", d.cooldown_seconds),
            request_window_seconds: env_or("OTP_REQUEST_WINDOW_SECS", d.request_window_seconds),
            max_requests_per_window: env_or(
                "OTP_MAX_REQUESTS_PER_WINDOW",
                d.max_requests_per_window,
            ),
            spam_lock_seconds: env_or("OTP_SPAM_LOCK_SECS", d.spam_lock_seconds),
            max_failed_attempts: env_or("OTP_MAX_FAILED_ATTEMPTS", d.max_failed_attempts),
            account_lock_seconds: env_or("OTP_ACCOUNT_LOCK_SECS", d.account_lock_seconds),
        }
    }

    /// Reject settings that would disable a guard or make a TTL meaningless
    pub fn validate(&self) -> Result<(), String> {
        let ttls = [
            ("code_ttl_seconds", self.code_ttl_seconds),
            ("cooldown_seconds", self.cooldown_seconds),
            ("request_window_seconds", self.request_window_seconds),
            ("spam_lock_seconds", self.spam_lock_seconds),
            ("account_lock_seconds", self.account_lock_seconds),
        ];
        if let Some((name, _)) = ttls.iter().find(|(_, v)| *v == 0) {
            return Err(format!("{} must be greater than zero", name));
        }
        if self.max_requests_per_window == 0 {
            return Err("max_requests_per_window must be greater than zero".to_string());
        }
        if self.max_failed_attempts == 0 {
            return Err("max_failed_attempts must be greater than zero".to_string());
        }
        Ok(())
    }
}

fn default_code_ttl() -> u64 {
    300 // 5 minutes
}

fn default_cooldown() -> u64 {
    60
}

fn default_request_window() -> u64 {
    3600 // 1 hour
}

fn default_max_requests() -> u32 {
    2
}

fn default_spam_lock() -> u64 {
    3600 // 1 hour
}

fn default_max_failed_attempts() -> u32 {
    3
}

fn default_account_lock() -> u64 {
    2700 // 45 minutes
}
