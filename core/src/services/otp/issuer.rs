//! Issuing passcodes

use std::sync::Arc;

use og_shared::validation::mask_identifier;
use og_shared::OtpPolicyConfig;

use crate::domain::OtpKeys;
use crate::errors::{DomainError, DomainResult, OtpError};

use super::generator::CodeGenerator;
use super::rate_limiter::RateLimiter;
use super::traits::{DispatchGateway, EphemeralStore};
use super::types::{DispatchContext, IssuedChallenge};

/// Generates, stores and dispatches codes behind the rate limiter.
pub struct OtpIssuer<S: EphemeralStore + ?Sized, D: DispatchGateway + ?Sized> {
    store: Arc<S>,
    gateway: Arc<D>,
    generator: Box<dyn CodeGenerator>,
    limiter: RateLimiter<S>,
    keys: OtpKeys,
    policy: OtpPolicyConfig,
}

impl<S: EphemeralStore + ?Sized, D: DispatchGateway + ?Sized> OtpIssuer<S, D> {
    pub fn new(
        store: Arc<S>,
        gateway: Arc<D>,
        generator: Box<dyn CodeGenerator>,
        keys: OtpKeys,
        policy: OtpPolicyConfig,
    ) -> Self {
        let limiter = RateLimiter::new(store.clone(), keys.clone(), policy.clone());
        Self {
            store,
            gateway,
            generator,
            limiter,
            keys,
            policy,
        }
    }

    /// Issue a code for `id` and send it.
    ///
    /// 1. Refuse if a guard is active
    /// 2. Count the request (may set the spam lock)
    /// 3. Store the code and the cooldown
    /// 4. Dispatch
    ///
    /// A failed dispatch is reported but the stored code and cooldown stay.
    pub async fn generate_and_store(
        &self,
        id: &str,
        context: &DispatchContext,
    ) -> DomainResult<IssuedChallenge> {
        self.limiter.check_restrictions(id).await?;
        let requests = self.limiter.track_request(id).await?;

        let code = self.generator.generate();

        self.store
            .set(&self.keys.code(id), code.as_str(), self.policy.code_ttl_seconds)
            .await
            .map_err(|e| {
                tracing::error!(
                    identifier = %mask_identifier(id),
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store OTP"
                );
                DomainError::store("store code", e)
            })?;

        self.store
            .set(&self.keys.cooldown(id), "1", self.policy.cooldown_seconds)
            .await
            .map_err(|e| DomainError::store("set cooldown", e))?;

        tracing::info!(
            identifier = %mask_identifier(id),
            requests_in_window = requests,
            template = %context.template_id,
            event = "otp_generated",
            "Generated new OTP"
        );

        let mut data = context.data.clone();
        data.insert("otp".to_string(), code.as_str().to_string());

        let message_id = self
            .gateway
            .send(id, &context.subject, &context.template_id, &data)
            .await
            .map_err(|e| {
                tracing::error!(
                    identifier = %mask_identifier(id),
                    provider = self.gateway.provider_name(),
                    error = %e,
                    event = "otp_dispatch_failed",
                    "Failed to dispatch OTP"
                );
                OtpError::DeliveryFailed { message: e }
            })?;

        tracing::info!(
            identifier = %mask_identifier(id),
            provider = self.gateway.provider_name(),
            message_id = %message_id,
            event = "otp_dispatched",
            "OTP dispatched"
        );

        Ok(IssuedChallenge {
            identifier: id.to_string(),
            message_id,
            expires_in_seconds: self.policy.code_ttl_seconds,
            resend_after_seconds: self.policy.cooldown_seconds,
        })
    }

    pub fn limiter(&self) -> &RateLimiter<S> {
        &self.limiter
    }
}
