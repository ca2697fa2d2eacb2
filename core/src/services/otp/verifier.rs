//! Verifying submitted passcodes

use std::sync::Arc;

use og_shared::validation::mask_identifier;
use og_shared::OtpPolicyConfig;

use crate::domain::{ChallengeState, OtpCode, OtpKeys, Submission, VerifyStep};
use crate::errors::{DomainError, DomainResult, OtpError};

use super::rate_limiter::clamp_count;
use super::traits::EphemeralStore;

/// Checks submissions against the stored code and escalates wrong ones to
/// the account lock.
pub struct OtpVerifier<S: EphemeralStore + ?Sized> {
    store: Arc<S>,
    keys: OtpKeys,
    policy: OtpPolicyConfig,
}

impl<S: EphemeralStore + ?Sized> OtpVerifier<S> {
    pub fn new(store: Arc<S>, keys: OtpKeys, policy: OtpPolicyConfig) -> Self {
        Self {
            store,
            keys,
            policy,
        }
    }

    /// Verify `submitted` for `id`.
    ///
    /// The account lock is checked first and refuses even a correct code.
    /// A wrong code bumps the attempt counter atomically; the submission
    /// that reaches the limit sets the account lock and discards the code.
    pub async fn verify(&self, id: &str, submitted: &str) -> DomainResult<()> {
        let locked = self.read(&self.keys.account_lock(id)).await?.is_some();
        let stored = if locked {
            None
        } else {
            self.read(&self.keys.code(id))
                .await?
                .and_then(|value| OtpCode::parse(&value))
        };

        let state = ChallengeState::from_store(locked, stored.is_some(), 0);
        let (state, submission) = match &stored {
            Some(code) if code.matches(submitted) => (state, Submission::Correct),
            Some(_) => {
                let failed = self
                    .store
                    .increment_with_ttl(&self.keys.attempts(id), self.policy.code_ttl_seconds)
                    .await
                    .map_err(|e| DomainError::store("increment attempts", e))?;
                let prior = clamp_count(failed).saturating_sub(1);
                (ChallengeState::Active { attempts: prior }, Submission::Wrong)
            }
            None => (state, Submission::Wrong),
        };

        let (_, step) = state.on_submission(submission, self.policy.max_failed_attempts);
        match step {
            VerifyStep::Verified => {
                self.clear_challenge(id).await?;
                tracing::info!(
                    identifier = %mask_identifier(id),
                    event = "otp_verified",
                    "OTP verified"
                );
                Ok(())
            }
            VerifyStep::Rejected { attempts_left } => {
                tracing::warn!(
                    identifier = %mask_identifier(id),
                    attempts_left = attempts_left,
                    event = "otp_verification_failed",
                    "Wrong OTP submitted"
                );
                Err(OtpError::InvalidCode { attempts_left }.into())
            }
            VerifyStep::LockedOut => {
                self.store
                    .set(
                        &self.keys.account_lock(id),
                        "1",
                        self.policy.account_lock_seconds,
                    )
                    .await
                    .map_err(|e| DomainError::store("set account lock", e))?;
                self.clear_challenge(id).await?;

                tracing::warn!(
                    identifier = %mask_identifier(id),
                    lock_seconds = self.policy.account_lock_seconds,
                    event = "account_locked",
                    "Too many wrong OTP submissions, account locked"
                );
                Err(OtpError::AttemptsExhausted {
                    retry_after_seconds: self.policy.account_lock_seconds,
                }
                .into())
            }
            VerifyStep::ExpiredOrMissing => {
                tracing::debug!(
                    identifier = %mask_identifier(id),
                    event = "otp_missing",
                    "No active OTP"
                );
                Err(OtpError::ExpiredOrMissing.into())
            }
            VerifyStep::AccountLocked => {
                let retry_after_seconds = self
                    .store
                    .ttl(&self.keys.account_lock(id))
                    .await
                    .map_err(|e| DomainError::store("ttl", e))?
                    .filter(|seconds| *seconds > 0)
                    .unwrap_or(self.policy.account_lock_seconds);
                Err(OtpError::AccountLocked { retry_after_seconds }.into())
            }
        }
    }

    /// Wrong submissions counted against the active code
    pub async fn failed_attempts(&self, id: &str) -> DomainResult<u32> {
        Ok(self
            .read(&self.keys.attempts(id))
            .await?
            .and_then(|value| value.parse::<i64>().ok())
            .map(clamp_count)
            .unwrap_or(0))
    }

    async fn clear_challenge(&self, id: &str) -> DomainResult<()> {
        self.store
            .delete(&[self.keys.code(id), self.keys.attempts(id)])
            .await
            .map_err(|e| DomainError::store("delete code", e))
    }

    async fn read(&self, key: &str) -> DomainResult<Option<String>> {
        self.store
            .get(key)
            .await
            .map_err(|e| DomainError::store("get", e))
    }
}
