//! Key layout of the OTP state in the ephemeral store.
//!
//! Every entity lives under `{namespace}:{identifier}`, optionally behind a
//! deployment-wide prefix.

/// Active passcode
pub const CODE_NAMESPACE: &str = "otp";
/// Short lock between two code requests
pub const COOLDOWN_NAMESPACE: &str = "otp_cooldown";
/// Codes requested in the current window
pub const REQUEST_COUNT_NAMESPACE: &str = "otp_requests_count";
/// Lock after too many requests
pub const SPAM_LOCK_NAMESPACE: &str = "otp_spam_lock";
/// Wrong submissions against the active code
pub const ATTEMPTS_NAMESPACE: &str = "otp_attempts";
/// Lock after too many wrong submissions
pub const ACCOUNT_LOCK_NAMESPACE: &str = "otp_lock";

/// Builds store keys for an identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpKeys {
    prefix: Option<String>,
}

impl OtpKeys {
    /// Create a key builder; `None` yields the bare key shapes
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    pub fn code(&self, id: &str) -> String {
        self.key(CODE_NAMESPACE, id)
    }

    pub fn cooldown(&self, id: &str) -> String {
        self.key(COOLDOWN_NAMESPACE, id)
    }

    pub fn request_count(&self, id: &str) -> String {
        self.key(REQUEST_COUNT_NAMESPACE, id)
    }

    pub fn spam_lock(&self, id: &str) -> String {
        self.key(SPAM_LOCK_NAMESPACE, id)
    }

    pub fn attempts(&self, id: &str) -> String {
        self.key(ATTEMPTS_NAMESPACE, id)
    }

    pub fn account_lock(&self, id: &str) -> String {
        self.key(ACCOUNT_LOCK_NAMESPACE, id)
    }

    fn key(&self, namespace: &str, id: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}:{}", prefix, namespace, id),
            None => format!("{}:{}", namespace, id),
        }
    }
}
