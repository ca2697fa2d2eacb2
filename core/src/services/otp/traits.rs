//! Traits for the ephemeral store and delivery gateway integrations

use std::collections::HashMap;

use async_trait::async_trait;

/// Key-value store with per-key expiry holding all OTP state
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    /// Read a value; expired keys read as `None`
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Write a value that expires after `ttl_seconds`
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Remove keys; missing keys are ignored
    async fn delete(&self, keys: &[String]) -> Result<(), String>;
    /// Atomically increment a counter (missing counts as 0) and reset its
    /// expiry to `ttl_seconds`. Returns the new value.
    async fn increment_with_ttl(&self, key: &str, ttl_seconds: u64) -> Result<i64, String>;
    /// Seconds until the key expires, `None` if it does not exist
    async fn ttl(&self, key: &str) -> Result<Option<u64>, String>;
    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), String>;
}

/// Outbound message channel for passcodes
#[async_trait]
pub trait DispatchGateway: Send + Sync {
    /// Render `template_id` with `data` and send it to `recipient`.
    /// Returns the provider's message id.
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> Result<String, String>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}
