//! Tests for store selection and infrastructure start-up

use og_core::services::otp::{DispatchGateway, EphemeralStore};
use og_shared::{CacheBackend, CacheConfig, DispatchConfig};

use crate::cache::create_store;
use crate::config::InfrastructureConfig;

fn memory_config() -> CacheConfig {
    CacheConfig {
        backend: CacheBackend::Memory,
        url: String::new(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_memory_backend_needs_no_redis_url() {
    let store = create_store(&memory_config()).await.unwrap();
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
async fn test_initialize_with_memory_backend() {
    let config = InfrastructureConfig {
        cache: memory_config(),
        dispatch: DispatchConfig::default(),
    };
    let services = crate::initialize(&config).await.unwrap();

    services.store.set("otp:a@x.com", "123456", 300).await.unwrap();
    assert_eq!(
        services.store.get("otp:a@x.com").await.unwrap().as_deref(),
        Some("123456")
    );
    assert_eq!(services.gateway.provider_name(), "mock");
}

#[tokio::test]
async fn test_redis_backend_rejects_bad_url() {
    let config = CacheConfig {
        backend: CacheBackend::Redis,
        url: "not a url".to_string(),
        max_retries: 1,
        ..Default::default()
    };
    assert!(create_store(&config).await.is_err());
}
