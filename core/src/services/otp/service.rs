//! OTP service facade used by the transport layer

use std::sync::Arc;

use og_shared::validation::{is_valid_email, mask_identifier, normalize_identifier};
use og_shared::OtpPolicyConfig;

use crate::domain::{OtpKeys, CODE_LENGTH};
use crate::errors::{DomainError, DomainResult};

use super::config::OtpServiceConfig;
use super::generator::{CodeGenerator, SecureCodeGenerator};
use super::issuer::OtpIssuer;
use super::rate_limiter::clamp_count;
use super::traits::{DispatchGateway, EphemeralStore};
use super::types::{DispatchContext, IssuedChallenge, OtpRequest, OtpStatus};
use super::verifier::OtpVerifier;

/// Validates caller input, normalizes identifiers and drives the issuer and
/// verifier.
pub struct OtpService<S: EphemeralStore + ?Sized, D: DispatchGateway + ?Sized> {
    store: Arc<S>,
    issuer: OtpIssuer<S, D>,
    verifier: OtpVerifier<S>,
    keys: OtpKeys,
    policy: OtpPolicyConfig,
}

impl<S: EphemeralStore + ?Sized, D: DispatchGateway + ?Sized> OtpService<S, D> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Ephemeral store holding codes, counters and locks
    /// * `gateway` - Delivery gateway for outgoing codes
    /// * `config` - Policy and key layout
    pub fn new(store: Arc<S>, gateway: Arc<D>, config: OtpServiceConfig) -> Self {
        Self::with_generator(store, gateway, config, Box::new(SecureCodeGenerator))
    }

    /// Create a service with a custom code source
    pub fn with_generator(
        store: Arc<S>,
        gateway: Arc<D>,
        config: OtpServiceConfig,
        generator: Box<dyn CodeGenerator>,
    ) -> Self {
        let keys = config.keys();
        let issuer = OtpIssuer::new(
            store.clone(),
            gateway,
            generator,
            keys.clone(),
            config.policy.clone(),
        );
        let verifier = OtpVerifier::new(store.clone(), keys.clone(), config.policy.clone());
        Self {
            store,
            issuer,
            verifier,
            keys,
            policy: config.policy,
        }
    }

    /// Issue a code and send it to the requested address
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedChallenge)` - The code was stored and dispatched
    /// * `Err(DomainError)` - Invalid input, an active guard, a delivery
    ///   failure or an unreachable store
    pub async fn request_code(&self, request: &OtpRequest) -> DomainResult<IssuedChallenge> {
        let id = validated_identifier(&request.identifier)?;
        let context = DispatchContext::for_purpose(request.purpose, &request.name);
        self.issuer.generate_and_store(&id, &context).await
    }

    /// Verify a submitted code
    ///
    /// Submissions that are not `CODE_LENGTH` digits are refused before the
    /// store is touched and do not count as attempts.
    pub async fn verify_code(&self, identifier: &str, submitted: &str) -> DomainResult<()> {
        let id = validated_identifier(identifier)?;
        let submitted = submitted.trim();
        if !og_shared::validation::is_numeric_code(submitted, CODE_LENGTH) {
            return Err(DomainError::Validation {
                message: format!("OTP must be {} digits", CODE_LENGTH),
            });
        }
        self.verifier.verify(&id, submitted).await
    }

    /// Current guards, counters and code lifetime for an identifier
    pub async fn status(&self, identifier: &str) -> DomainResult<OtpStatus> {
        let id = validated_identifier(identifier)?;

        let failed = self.verifier.failed_attempts(&id).await?;
        let requests = self
            .store
            .get(&self.keys.request_count(&id))
            .await
            .map_err(|e| DomainError::store("get", e))?
            .and_then(|value| value.parse::<i64>().ok())
            .map(clamp_count)
            .unwrap_or(0);

        let status = OtpStatus {
            code_expires_in: self.ttl(&self.keys.code(&id)).await?,
            failed_attempts: failed,
            requests_in_window: requests,
            account_lock_remaining: self.ttl(&self.keys.account_lock(&id)).await?,
            spam_lock_remaining: self.ttl(&self.keys.spam_lock(&id)).await?,
            cooldown_remaining: self.ttl(&self.keys.cooldown(&id)).await?,
        };

        tracing::debug!(
            identifier = %mask_identifier(&id),
            status = ?status,
            "OTP status read"
        );
        Ok(status)
    }

    /// Check that the store answers
    pub async fn ping(&self) -> DomainResult<()> {
        self.store
            .ping()
            .await
            .map_err(|e| DomainError::store("ping", e))
    }

    pub fn policy(&self) -> &OtpPolicyConfig {
        &self.policy
    }

    async fn ttl(&self, key: &str) -> DomainResult<Option<u64>> {
        self.store
            .ttl(key)
            .await
            .map_err(|e| DomainError::store("ttl", e))
    }
}

/// Trim, lower-case and check the email shape
fn validated_identifier(identifier: &str) -> DomainResult<String> {
    let id = normalize_identifier(identifier);
    if id.is_empty() {
        return Err(DomainError::Validation {
            message: "Email is required".to_string(),
        });
    }
    if !is_valid_email(&id) {
        return Err(DomainError::Validation {
            message: "Invalid email address".to_string(),
        });
    }
    Ok(id)
}
