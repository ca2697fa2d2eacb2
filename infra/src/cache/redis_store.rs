//! `EphemeralStore` backed by Redis

use async_trait::async_trait;

use og_core::services::otp::EphemeralStore;

use super::RedisClient;

/// Adapts [`RedisClient`] to the store the OTP services consume
#[derive(Clone)]
pub struct RedisStore {
    client: RedisClient,
}

impl RedisStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EphemeralStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(key).await.map_err(|e| e.to_string())
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), String> {
        self.client
            .delete(keys)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn increment_with_ttl(&self, key: &str, ttl_seconds: u64) -> Result<i64, String> {
        self.client
            .increment_with_ttl(key, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, String> {
        self.client.ttl(key).await.map_err(|e| e.to_string())
    }

    async fn ping(&self) -> Result<(), String> {
        match self.client.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("Unexpected PING response".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
