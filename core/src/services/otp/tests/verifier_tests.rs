//! Tests for code verification

use og_shared::OtpPolicyConfig;

use super::mocks::MockStore;
use crate::domain::OtpKeys;
use crate::errors::{DomainError, OtpError};
use crate::services::otp::OtpVerifier;

const ID: &str = "b@x.com";

fn setup() -> (std::sync::Arc<MockStore>, OtpVerifier<MockStore>) {
    let store = MockStore::new();
    store.put("otp:b@x.com", "123456", 300);
    let verifier = OtpVerifier::new(store.clone(), OtpKeys::default(), OtpPolicyConfig::default());
    (store, verifier)
}

fn otp_err(result: Result<(), DomainError>) -> OtpError {
    match result {
        Err(DomainError::Otp(e)) => e,
        other => panic!("expected OTP outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_correct_code_clears_state() {
    let (store, verifier) = setup();
    verifier.verify(ID, "123456").await.unwrap();

    assert!(store.peek("otp:b@x.com").is_none());
    assert!(store.peek("otp_attempts:b@x.com").is_none());
    assert_eq!(otp_err(verifier.verify(ID, "123456").await), OtpError::ExpiredOrMissing);
}

#[tokio::test]
async fn test_correct_after_wrong_attempts() {
    for wrong in 0..3 {
        let (store, verifier) = setup();
        for _ in 0..wrong {
            assert!(verifier.verify(ID, "000000").await.is_err());
        }
        verifier.verify(ID, "123456").await.unwrap();
        assert!(store.peek("otp:b@x.com").is_none());
        assert!(store.peek("otp_attempts:b@x.com").is_none());
    }
}

#[tokio::test]
async fn test_three_wrong_attempts_lock() {
    let (store, verifier) = setup();

    assert_eq!(
        otp_err(verifier.verify(ID, "000000").await),
        OtpError::InvalidCode { attempts_left: 1 }
    );
    assert_eq!(store.remaining("otp_attempts:b@x.com"), Some(300));
    assert_eq!(
        otp_err(verifier.verify(ID, "000000").await),
        OtpError::InvalidCode { attempts_left: 0 }
    );
    assert_eq!(
        otp_err(verifier.verify(ID, "000000").await),
        OtpError::AttemptsExhausted {
            retry_after_seconds: 2700
        }
    );

    assert_eq!(store.remaining("otp_lock:b@x.com"), Some(2700));
    assert!(store.peek("otp:b@x.com").is_none());
    assert!(store.peek("otp_attempts:b@x.com").is_none());

    // even the right code is refused while locked
    assert_eq!(
        otp_err(verifier.verify(ID, "123456").await),
        OtpError::AccountLocked {
            retry_after_seconds: 2700
        }
    );
}

#[tokio::test]
async fn test_lock_expires() {
    let (store, verifier) = setup();
    for _ in 0..3 {
        let _ = verifier.verify(ID, "000000").await;
    }
    store.advance(2699);
    assert!(matches!(
        otp_err(verifier.verify(ID, "123456").await),
        OtpError::AccountLocked { .. }
    ));
    store.advance(1);
    assert_eq!(otp_err(verifier.verify(ID, "123456").await), OtpError::ExpiredOrMissing);
}

#[tokio::test]
async fn test_expired_code() {
    let (store, verifier) = setup();
    store.advance(300);
    assert_eq!(otp_err(verifier.verify(ID, "123456").await), OtpError::ExpiredOrMissing);
    assert!(store.peek("otp_attempts:b@x.com").is_none());
}

#[tokio::test]
async fn test_missing_code_has_no_side_effect() {
    let store = MockStore::new();
    let verifier = OtpVerifier::new(store.clone(), OtpKeys::default(), OtpPolicyConfig::default());
    assert_eq!(otp_err(verifier.verify(ID, "000000").await), OtpError::ExpiredOrMissing);
    assert!(store.peek("otp_attempts:b@x.com").is_none());
    assert_eq!(verifier.failed_attempts(ID).await.unwrap(), 0);
}

#[tokio::test]
async fn test_failed_attempts_counter() {
    let (_store, verifier) = setup();
    let _ = verifier.verify(ID, "000000").await;
    let _ = verifier.verify(ID, "111111").await;
    assert_eq!(verifier.failed_attempts(ID).await.unwrap(), 2);
}

#[tokio::test]
async fn test_account_lock_reports_time_left() {
    let (store, verifier) = setup();
    for _ in 0..3 {
        let _ = verifier.verify(ID, "000000").await;
    }

    store.advance(700);
    assert_eq!(
        otp_err(verifier.verify(ID, "123456").await),
        OtpError::AccountLocked {
            retry_after_seconds: 2000
        }
    );
}
