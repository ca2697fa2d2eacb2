//! Types for OTP service requests and results

use std::collections::HashMap;

use crate::domain::{LockReason, OtpPurpose};

/// A request for a new passcode
#[derive(Debug, Clone)]
pub struct OtpRequest {
    /// Email address the code is sent to
    pub identifier: String,
    /// Display name used in the message
    pub name: String,
    pub purpose: OtpPurpose,
}

/// What the gateway needs besides the recipient and the code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchContext {
    pub subject: String,
    pub template_id: String,
    /// Template data; the issuer adds the `otp` entry
    pub data: HashMap<String, String>,
}

impl DispatchContext {
    pub fn for_purpose(purpose: OtpPurpose, name: &str) -> Self {
        let mut data = HashMap::new();
        data.insert("name".to_string(), name.trim().to_string());
        Self {
            subject: purpose.subject().to_string(),
            template_id: purpose.template_id().to_string(),
            data,
        }
    }
}

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    /// Normalized identifier the code was issued for
    pub identifier: String,
    /// Message id returned by the gateway
    pub message_id: String,
    /// Seconds until the code expires
    pub expires_in_seconds: u64,
    /// Seconds until another code may be requested
    pub resend_after_seconds: u64,
}

/// Read-only view of an identifier's guards and active code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpStatus {
    /// Remaining lifetime of the active code
    pub code_expires_in: Option<u64>,
    /// Wrong submissions counted against the active code
    pub failed_attempts: u32,
    /// Requests counted in the current window
    pub requests_in_window: u32,
    pub account_lock_remaining: Option<u64>,
    pub spam_lock_remaining: Option<u64>,
    pub cooldown_remaining: Option<u64>,
}

impl OtpStatus {
    pub fn has_active_code(&self) -> bool {
        self.code_expires_in.is_some()
    }

    /// The guard that would refuse a code request right now, with its
    /// remaining seconds
    pub fn blocked_by(&self) -> Option<(LockReason, u64)> {
        [
            (LockReason::AccountLocked, self.account_lock_remaining),
            (LockReason::SpamLocked, self.spam_lock_remaining),
            (LockReason::Cooldown, self.cooldown_remaining),
        ]
        .into_iter()
        .find_map(|(reason, remaining)| remaining.map(|secs| (reason, secs)))
    }

    /// Seconds until a new code may be requested (0 when allowed now)
    pub fn resend_after(&self) -> u64 {
        self.blocked_by().map(|(_, secs)| secs).unwrap_or(0)
    }
}
