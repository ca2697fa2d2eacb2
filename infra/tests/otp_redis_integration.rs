//! End-to-end OTP flow over Redis
//!
//! Run with: cargo test -p og_infra --test otp_redis_integration -- --ignored

use std::sync::Arc;

use og_core::errors::{DomainError, OtpError};
use og_core::services::otp::{OtpRequest, OtpService, OtpServiceConfig};
use og_core::OtpPurpose;
use og_infra::cache::{RedisClient, RedisStore};
use og_infra::dispatch::MockDispatchGateway;
use og_shared::{CacheConfig, OtpPolicyConfig};

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_issue_and_lock_out() {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix(format!("og_it_{}", uuid_suffix()));

    let store = Arc::new(RedisStore::new(RedisClient::new(&config).await.unwrap()));
    let gateway = Arc::new(MockDispatchGateway::with_options(false, false));
    let service = OtpService::new(
        store,
        gateway.clone(),
        OtpServiceConfig::from_parts(&OtpPolicyConfig::default(), &config),
    );

    let request = OtpRequest {
        identifier: "redis-it@x.com".to_string(),
        name: "Redis".to_string(),
        purpose: OtpPurpose::Registration,
    };
    service.request_code(&request).await.unwrap();
    assert_eq!(gateway.message_count(), 1);

    let err = service.request_code(&request).await.unwrap_err();
    assert!(matches!(err, DomainError::Otp(OtpError::Cooldown { .. })));

    // a code from the 100000..=999999 range never starts with 0
    for expected_left in [1, 0] {
        let err = service.verify_code("redis-it@x.com", "000000").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Otp(OtpError::InvalidCode { attempts_left }) if attempts_left == expected_left
        ));
    }
    let err = service.verify_code("redis-it@x.com", "000000").await.unwrap_err();
    assert!(matches!(err, DomainError::Otp(OtpError::AttemptsExhausted { .. })));

    let status = service.status("redis-it@x.com").await.unwrap();
    assert!(status.account_lock_remaining.is_some());
    assert!(!status.has_active_code());
}

fn uuid_suffix() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis().to_string())
        .unwrap_or_default()
}
