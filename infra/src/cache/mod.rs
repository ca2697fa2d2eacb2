//! Cache module: the ephemeral stores behind the OTP services
//!
//! - `redis_client` - Redis connection with retry and the counter primitive
//! - `redis_store` - `EphemeralStore` over Redis
//! - `memory_store` - single-process `EphemeralStore`

pub mod memory_store;
pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use og_core::services::otp::EphemeralStore;
use og_shared::{CacheBackend, CacheConfig};

use crate::InfrastructureError;

pub use memory_store::MemoryStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisStore;

/// Build the store selected by `config.backend`
pub async fn create_store(
    config: &CacheConfig,
) -> Result<Arc<dyn EphemeralStore>, InfrastructureError> {
    match config.backend {
        CacheBackend::Redis => {
            let client = RedisClient::new(config).await?;
            Ok(Arc::new(RedisStore::new(client)))
        }
        CacheBackend::Memory => {
            tracing::warn!("Using in-memory OTP store; state is lost on restart and not shared");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
