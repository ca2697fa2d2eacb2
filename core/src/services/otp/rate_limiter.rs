//! Request throttling and lock checks

use std::sync::Arc;

use og_shared::validation::mask_identifier;
use og_shared::OtpPolicyConfig;

use crate::domain::{LockReason, LockSnapshot, OtpKeys};
use crate::errors::{DomainError, DomainResult, OtpError};

use super::traits::EphemeralStore;

/// Guards code requests with the cooldown, spam lock and account lock.
pub struct RateLimiter<S: EphemeralStore + ?Sized> {
    store: Arc<S>,
    keys: OtpKeys,
    policy: OtpPolicyConfig,
}

impl<S: EphemeralStore + ?Sized> RateLimiter<S> {
    pub fn new(store: Arc<S>, keys: OtpKeys, policy: OtpPolicyConfig) -> Self {
        Self {
            store,
            keys,
            policy,
        }
    }

    /// Read the three guards and report the first active one.
    ///
    /// Priority is account lock, spam lock, cooldown. The refusal carries
    /// the time the guard has left. Nothing is written.
    pub async fn check_restrictions(&self, id: &str) -> DomainResult<()> {
        let snapshot = self.snapshot(id).await?;
        match snapshot.first_block() {
            Some(reason) => {
                let wait = self.remaining(reason, id).await?;
                tracing::warn!(
                    identifier = %mask_identifier(id),
                    reason = ?reason,
                    retry_after = wait,
                    event = "otp_request_blocked",
                    "OTP request refused by active guard"
                );
                Err(reason.error_after(wait).into())
            }
            None => Ok(()),
        }
    }

    /// Seconds until `reason`'s guard lifts. A guard that vanished between
    /// reads falls back to its full duration.
    pub async fn remaining(&self, reason: LockReason, id: &str) -> DomainResult<u64> {
        let key = match reason {
            LockReason::AccountLocked => self.keys.account_lock(id),
            LockReason::SpamLocked => self.keys.spam_lock(id),
            LockReason::Cooldown => self.keys.cooldown(id),
        };
        let ttl = self
            .store
            .ttl(&key)
            .await
            .map_err(|e| DomainError::store("ttl", e))?;
        Ok(ttl
            .filter(|seconds| *seconds > 0)
            .unwrap_or_else(|| reason.retry_after_seconds(&self.policy)))
    }

    /// Count a request in the current window.
    ///
    /// The counter is advanced atomically and its expiry reset to the window
    /// length. Going past the allowed requests sets the spam lock.
    pub async fn track_request(&self, id: &str) -> DomainResult<u32> {
        let count = self
            .store
            .increment_with_ttl(
                &self.keys.request_count(id),
                self.policy.request_window_seconds,
            )
            .await
            .map_err(|e| DomainError::store("increment request counter", e))?;

        let count = clamp_count(count);
        if count > self.policy.max_requests_per_window {
            self.store
                .set(
                    &self.keys.spam_lock(id),
                    "1",
                    self.policy.spam_lock_seconds,
                )
                .await
                .map_err(|e| DomainError::store("set spam lock", e))?;

            tracing::warn!(
                identifier = %mask_identifier(id),
                requests = count,
                lock_seconds = self.policy.spam_lock_seconds,
                event = "otp_spam_locked",
                "Too many OTP requests, spam lock set"
            );
            return Err(OtpError::SpamLocked {
                retry_after_seconds: self.policy.spam_lock_seconds,
            }
            .into());
        }

        Ok(count)
    }

    /// Whether the account lock is present
    pub async fn is_account_locked(&self, id: &str) -> DomainResult<bool> {
        self.exists(&self.keys.account_lock(id)).await
    }

    /// Which guards are present right now
    pub async fn snapshot(&self, id: &str) -> DomainResult<LockSnapshot> {
        let account_locked = self.is_account_locked(id).await?;
        if account_locked {
            return Ok(LockSnapshot {
                account_locked,
                ..Default::default()
            });
        }
        Ok(LockSnapshot {
            account_locked,
            spam_locked: self.exists(&self.keys.spam_lock(id)).await?,
            cooldown: self.exists(&self.keys.cooldown(id)).await?,
        })
    }

    /// Error a caller sees for `reason` under this policy
    pub fn refusal(&self, reason: LockReason) -> OtpError {
        reason.to_error(&self.policy)
    }

    async fn exists(&self, key: &str) -> DomainResult<bool> {
        self.store
            .get(key)
            .await
            .map(|value| value.is_some())
            .map_err(|e| DomainError::store("get", e))
    }
}

/// Counters are never negative; anything past `u32::MAX` is just "a lot"
pub(crate) fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
