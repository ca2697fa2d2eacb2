//! # Infrastructure Layer
//!
//! Concrete implementations of the ports the OTP services depend on:
//!
//! - **Cache**: Redis-backed and in-memory `EphemeralStore`s
//! - **Dispatch**: mock and mail API `DispatchGateway`s
//!
//! ## Features
//!
//! - `redis-cache`: Enable Redis support (default)

/// Cache module - Redis client and the ephemeral stores
pub mod cache;

/// Dispatch module - delivery gateways
pub mod dispatch;

pub use cache::create_store;
pub use dispatch::create_dispatch_gateway;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration for the store and the gateway, assembled from
    //! `og_shared::AppConfig` by the binary

    use og_shared::{CacheConfig, DispatchConfig};
    use serde::{Deserialize, Serialize};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// Ephemeral store configuration
        pub cache: CacheConfig,
        /// Delivery gateway configuration
        pub dispatch: DispatchConfig,
    }
}

use std::sync::Arc;

use og_core::services::otp::{DispatchGateway, EphemeralStore};

/// Store and gateway, ready to hand to `OtpService`
#[derive(Clone)]
pub struct InfrastructureServices {
    pub store: Arc<dyn EphemeralStore>,
    pub gateway: Arc<dyn DispatchGateway>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The ephemeral store (Redis connection or in-memory map)
/// - The delivery gateway
pub async fn initialize(
    config: &config::InfrastructureConfig,
) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(
        backend = ?config.cache.backend,
        provider = ?config.dispatch.provider,
        "Initializing infrastructure services"
    );

    let store = create_store(&config.cache).await?;
    let gateway = create_dispatch_gateway(&config.dispatch)?;

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices { store, gateway })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Delivery gateway error
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}
