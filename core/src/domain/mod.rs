//! Domain layer: store key layout, the passcode value object, the lock
//! guards and the per-identifier challenge state machine.

pub mod challenge;
pub mod keys;
pub mod lock;
pub mod otp_code;
pub mod purpose;

#[cfg(test)]
mod tests;

// Re-export commonly used domain types
pub use challenge::{ChallengeState, Submission, VerifyStep};
pub use keys::OtpKeys;
pub use lock::{LockReason, LockSnapshot};
pub use otp_code::{OtpCode, CODE_LENGTH, CODE_MAX, CODE_MIN};
pub use purpose::OtpPurpose;
