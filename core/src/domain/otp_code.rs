//! One-time passcode value object.

use std::fmt;

use constant_time_eq::constant_time_eq;
use rand::{CryptoRng, Rng};

/// Number of digits in a passcode
pub const CODE_LENGTH: usize = 6;

/// Smallest passcode value (inclusive)
pub const CODE_MIN: u32 = 100_000;

/// Largest passcode value (inclusive)
pub const CODE_MAX: u32 = 999_999;

/// A six digit numeric passcode.
///
/// The inner value never appears in `Debug` output so that codes do not leak
/// into logs through `{:?}`.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Build a code from a number in `CODE_MIN..=CODE_MAX`
    pub fn from_number(value: u32) -> Option<Self> {
        (CODE_MIN..=CODE_MAX)
            .contains(&value)
            .then(|| Self(value.to_string()))
    }

    /// Draw a code uniformly from `CODE_MIN..=CODE_MAX`
    pub fn random<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self(rng.gen_range(CODE_MIN..=CODE_MAX).to_string())
    }

    /// Parse a stored or submitted value; `None` unless it is exactly
    /// `CODE_LENGTH` ASCII digits
    pub fn parse(value: &str) -> Option<Self> {
        if og_shared::validation::is_numeric_code(value, CODE_LENGTH) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a submitted value
    pub fn matches(&self, submitted: &str) -> bool {
        if self.0.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}
