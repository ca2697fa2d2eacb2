//! Configuration for the OTP service

use og_shared::{CacheConfig, OtpPolicyConfig};

use crate::domain::OtpKeys;

/// Policy plus key layout shared by the limiter, issuer and verifier
#[derive(Debug, Clone, Default)]
pub struct OtpServiceConfig {
    /// Lifetimes and thresholds
    pub policy: OtpPolicyConfig,
    /// Optional namespace in front of every store key
    pub key_prefix: Option<String>,
}

impl OtpServiceConfig {
    pub fn new(policy: OtpPolicyConfig, key_prefix: Option<String>) -> Self {
        Self { policy, key_prefix }
    }

    /// Take the key prefix from the cache configuration
    pub fn from_parts(policy: &OtpPolicyConfig, cache: &CacheConfig) -> Self {
        Self::new(policy.clone(), cache.key_prefix.clone())
    }

    pub fn keys(&self) -> OtpKeys {
        OtpKeys::new(self.key_prefix.clone())
    }
}
