//! Unit tests for the store key layout

use crate::domain::keys::OtpKeys;

#[test]
fn test_bare_key_shapes() {
    let keys = OtpKeys::default();
    assert_eq!(keys.code("a@x.com"), "otp:a@x.com");
    assert_eq!(keys.cooldown("a@x.com"), "otp_cooldown:a@x.com");
    assert_eq!(keys.request_count("a@x.com"), "otp_requests_count:a@x.com");
    assert_eq!(keys.spam_lock("a@x.com"), "otp_spam_lock:a@x.com");
    assert_eq!(keys.attempts("a@x.com"), "otp_attempts:a@x.com");
    assert_eq!(keys.account_lock("a@x.com"), "otp_lock:a@x.com");
}

#[test]
fn test_prefixed_keys() {
    let keys = OtpKeys::new(Some("staging".to_string()));
    assert_eq!(keys.code("b@x.com"), "staging:otp:b@x.com");
    assert_eq!(keys.account_lock("b@x.com"), "staging:otp_lock:b@x.com");
}

#[test]
fn test_empty_prefix_is_ignored() {
    let keys = OtpKeys::new(Some(String::new()));
    assert_eq!(keys, OtpKeys::default());
    assert_eq!(keys.attempts("c@x.com"), "otp_attempts:c@x.com");
}
