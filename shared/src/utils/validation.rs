//! Identifier validation and log masking utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Loose email shape: something, an `@`, something, a dot, something.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Check if an email address has a deliverable shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Canonical form of an identifier used for keying store entries.
///
/// Surrounding whitespace is dropped and the value is lower-cased so that
/// `Alice@Example.com` and `alice@example.com ` share one set of guards.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Check that a submitted passcode is exactly `length` ASCII digits
pub fn is_numeric_code(code: &str, length: usize) -> bool {
    code.len() == length && code.chars().all(|c| c.is_ascii_digit())
}

/// Mask an identifier for logging.
///
/// Emails keep the first character of the local part and the full domain
/// (`a****@example.com`); anything else keeps only its last 4 characters.
pub fn mask_identifier(identifier: &str) -> String {
    if let Some((local, domain)) = identifier.split_once('@') {
        let first: String = local.chars().take(1).collect();
        let hidden = local.chars().count().saturating_sub(1).max(1);
        return format!("{}{}@{}", first, "*".repeat(hidden), domain);
    }

    let len = identifier.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let tail: String = identifier.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), tail)
}
