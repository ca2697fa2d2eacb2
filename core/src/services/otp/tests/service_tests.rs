//! End-to-end tests for the OTP service facade

use std::sync::Arc;

use og_shared::OtpPolicyConfig;

use super::mocks::{FixedCodeGenerator, MockDispatch, MockStore};
use crate::domain::{LockReason, OtpPurpose, CODE_MAX, CODE_MIN};
use crate::errors::{DomainError, ErrorKind, OtpError};
use crate::services::otp::{
    CodeGenerator, OtpRequest, OtpService, OtpServiceConfig, SecureCodeGenerator,
};

type TestService = OtpService<MockStore, MockDispatch>;

fn service_with(codes: &[&str]) -> (Arc<MockStore>, Arc<MockDispatch>, TestService) {
    let store = MockStore::new();
    let dispatch = MockDispatch::new(false);
    let service = OtpService::with_generator(
        store.clone(),
        dispatch.clone(),
        OtpServiceConfig::default(),
        FixedCodeGenerator::new(codes),
    );
    (store, dispatch, service)
}

fn request(email: &str) -> OtpRequest {
    OtpRequest {
        identifier: email.to_string(),
        name: "Test User".to_string(),
        purpose: OtpPurpose::Registration,
    }
}

fn otp_err<T: std::fmt::Debug>(result: Result<T, DomainError>) -> OtpError {
    match result {
        Err(DomainError::Otp(e)) => e,
        other => panic!("expected OTP outcome, got {:?}", other),
    }
}

#[test]
fn test_generated_codes_in_range() {
    let generator = SecureCodeGenerator;
    for _ in 0..10_000 {
        let code = generator.generate();
        assert_eq!(code.as_str().len(), 6);
        let value: u32 = code.as_str().parse().expect("numeric code");
        assert!((CODE_MIN..=CODE_MAX).contains(&value));
    }
}

#[test]
fn test_generated_codes_vary() {
    let generator = SecureCodeGenerator;
    let codes: std::collections::HashSet<String> = (0..100)
        .map(|_| generator.generate().as_str().to_string())
        .collect();
    assert!(codes.len() > 1);
}

#[tokio::test]
async fn test_cooldown_then_spam_lock_scenario() {
    let (store, dispatch, service) = service_with(&["123456"]);

    service.request_code(&request("a@x.com")).await.unwrap();

    let err = otp_err(service.request_code(&request("a@x.com")).await);
    assert_eq!(err, OtpError::Cooldown { retry_after_seconds: 60 });

    store.advance(61);
    service.request_code(&request("a@x.com")).await.unwrap();
    assert_eq!(store.peek("otp_requests_count:a@x.com").as_deref(), Some("2"));

    store.advance(61);
    let err = otp_err(service.request_code(&request("a@x.com")).await);
    assert_eq!(err, OtpError::SpamLocked { retry_after_seconds: 3600 });
    assert_eq!(dispatch.sent_count(), 2);

    // the spam lock holds for its full duration from when it was set
    store.advance(3599);
    let err = otp_err(service.request_code(&request("a@x.com")).await);
    assert!(matches!(err, OtpError::SpamLocked { .. }));
    store.advance(1);
    service.request_code(&request("a@x.com")).await.unwrap();
}

#[tokio::test]
async fn test_wrong_code_lockout_scenario() {
    let (store, _dispatch, service) = service_with(&["123456"]);
    service.request_code(&request("b@x.com")).await.unwrap();

    assert_eq!(
        otp_err(service.verify_code("b@x.com", "000000").await),
        OtpError::InvalidCode { attempts_left: 1 }
    );
    assert_eq!(
        otp_err(service.verify_code("b@x.com", "000000").await),
        OtpError::InvalidCode { attempts_left: 0 }
    );
    assert_eq!(
        otp_err(service.verify_code("b@x.com", "000000").await),
        OtpError::AttemptsExhausted { retry_after_seconds: 2700 }
    );
    assert_eq!(
        otp_err(service.verify_code("b@x.com", "123456").await),
        OtpError::AccountLocked { retry_after_seconds: 2700 }
    );

    // requests are refused too, even after cooldown has passed
    store.advance(120);
    assert!(matches!(
        otp_err(service.request_code(&request("b@x.com")).await),
        OtpError::AccountLocked { .. }
    ));

    store.advance(2700);
    service.request_code(&request("b@x.com")).await.unwrap();
}

#[tokio::test]
async fn test_verify_success_clears_code() {
    let (_store, dispatch, service) = service_with(&["654321"]);
    service.request_code(&request("c@x.com")).await.unwrap();

    let code = dispatch.last_code().unwrap();
    service.verify_code("c@x.com", &code).await.unwrap();
    assert_eq!(
        otp_err(service.verify_code("c@x.com", &code).await),
        OtpError::ExpiredOrMissing
    );
}

#[tokio::test]
async fn test_unverified_code_expires() {
    let (store, _dispatch, service) = service_with(&["123456"]);
    service.request_code(&request("d@x.com")).await.unwrap();
    store.advance(300);
    assert_eq!(
        otp_err(service.verify_code("d@x.com", "123456").await),
        OtpError::ExpiredOrMissing
    );
}

#[tokio::test]
async fn test_identifier_is_normalized() {
    let (store, _dispatch, service) = service_with(&["123456"]);
    service
        .request_code(&request("  Alice@Example.COM "))
        .await
        .unwrap();
    assert!(store.peek("otp:alice@example.com").is_some());
    service
        .verify_code("alice@example.com", "123456")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_email_is_rejected_without_store_access() {
    let (store, dispatch, service) = service_with(&["123456"]);
    store.fail(true);

    let err = service.request_code(&request("not-an-email")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    let err = service.verify_code("", "123456").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert_eq!(dispatch.sent_count(), 0);
}

#[tokio::test]
async fn test_malformed_code_is_not_counted() {
    let (store, _dispatch, service) = service_with(&["123456"]);
    service.request_code(&request("e@x.com")).await.unwrap();

    for bad in ["12345", "abcdef", "1234567", ""] {
        let err = service.verify_code("e@x.com", bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
    assert!(store.peek("otp_attempts:e@x.com").is_none());
    service.verify_code("e@x.com", "123456").await.unwrap();
}

#[tokio::test]
async fn test_password_reset_template() {
    let (_store, dispatch, service) = service_with(&["123456"]);
    let mut req = request("f@x.com");
    req.purpose = OtpPurpose::PasswordReset;
    service.request_code(&req).await.unwrap();

    let sent = dispatch.last().unwrap();
    assert_eq!(sent.template_id, "forgot-password-user-mail");
    assert_eq!(sent.subject, "Reset your password");
}

#[tokio::test]
async fn test_status_reports_guards() {
    let (store, _dispatch, service) = service_with(&["123456"]);
    let status = service.status("g@x.com").await.unwrap();
    assert!(!status.has_active_code());
    assert_eq!(status.failed_attempts, 0);
    assert_eq!(status.resend_after(), 0);

    service.request_code(&request("g@x.com")).await.unwrap();
    let _ = service.verify_code("g@x.com", "000000").await;
    store.advance(10);

    let status = service.status("g@x.com").await.unwrap();
    assert_eq!(status.code_expires_in, Some(290));
    assert_eq!(status.failed_attempts, 1);
    assert_eq!(status.requests_in_window, 1);
    assert_eq!(status.blocked_by(), Some((LockReason::Cooldown, 50)));
    assert_eq!(status.resend_after(), 50);
}

#[tokio::test]
async fn test_store_outage_is_infrastructure_error() {
    let (store, _dispatch, service) = service_with(&["123456"]);
    assert!(service.ping().await.is_ok());

    store.fail(true);
    let err = service.request_code(&request("h@x.com")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Infrastructure);
    assert!(service.ping().await.is_err());
}

#[tokio::test]
async fn test_custom_policy_and_prefix() {
    let store = MockStore::new();
    let dispatch = MockDispatch::new(false);
    let policy = OtpPolicyConfig {
        max_failed_attempts: 1,
        account_lock_seconds: 30,
        ..Default::default()
    };
    let service = OtpService::with_generator(
        store.clone(),
        dispatch.clone(),
        OtpServiceConfig::new(policy, Some("test".to_string())),
        FixedCodeGenerator::new(&["123456"]),
    );

    service.request_code(&request("i@x.com")).await.unwrap();
    assert!(store.peek("test:otp:i@x.com").is_some());
    assert_eq!(
        otp_err(service.verify_code("i@x.com", "000000").await),
        OtpError::AttemptsExhausted { retry_after_seconds: 30 }
    );
    assert_eq!(store.remaining("test:otp_lock:i@x.com"), Some(30));
}
