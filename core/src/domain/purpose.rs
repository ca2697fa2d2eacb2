//! Why a passcode is being issued. The purpose selects the message the
//! delivery gateway renders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Email verification during signup
    Registration,
    /// Proof of ownership before a password reset
    PasswordReset,
}

impl OtpPurpose {
    /// Template rendered by the delivery gateway
    pub fn template_id(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "user-activation-mail",
            OtpPurpose::PasswordReset => "forgot-password-user-mail",
        }
    }

    /// Message subject
    pub fn subject(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "Verify your email",
            OtpPurpose::PasswordReset => "Reset your password",
        }
    }
}

impl Default for OtpPurpose {
    fn default() -> Self {
        OtpPurpose::Registration
    }
}
