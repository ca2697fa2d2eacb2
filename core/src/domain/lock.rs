//! The three guards that block issuance, and their priority.

use og_shared::OtpPolicyConfig;

use crate::errors::OtpError;

/// Why a code request is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    /// Too many wrong submissions; also blocks verification
    AccountLocked,
    /// Too many code requests in the window
    SpamLocked,
    /// A code was requested moments ago
    Cooldown,
}

impl LockReason {
    /// How long the guard stays in place once set
    pub fn retry_after_seconds(&self, policy: &OtpPolicyConfig) -> u64 {
        match self {
            LockReason::AccountLocked => policy.account_lock_seconds,
            LockReason::SpamLocked => policy.spam_lock_seconds,
            LockReason::Cooldown => policy.cooldown_seconds,
        }
    }

    /// The caller-facing error for a freshly set guard
    pub fn to_error(&self, policy: &OtpPolicyConfig) -> OtpError {
        self.error_after(self.retry_after_seconds(policy))
    }

    /// The caller-facing error when the guard lifts in `retry_after_seconds`
    pub fn error_after(&self, retry_after_seconds: u64) -> OtpError {
        match self {
            LockReason::AccountLocked => OtpError::AccountLocked { retry_after_seconds },
            LockReason::SpamLocked => OtpError::SpamLocked { retry_after_seconds },
            LockReason::Cooldown => OtpError::Cooldown { retry_after_seconds },
        }
    }
}

/// Which guards are currently present for an identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockSnapshot {
    pub account_locked: bool,
    pub spam_locked: bool,
    pub cooldown: bool,
}

impl LockSnapshot {
    /// The guard to report: account lock, then spam lock, then cooldown
    pub fn first_block(&self) -> Option<LockReason> {
        if self.account_locked {
            Some(LockReason::AccountLocked)
        } else if self.spam_locked {
            Some(LockReason::SpamLocked)
        } else if self.cooldown {
            Some(LockReason::Cooldown)
        } else {
            None
        }
    }
}
