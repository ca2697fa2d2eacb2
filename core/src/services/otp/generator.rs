//! Passcode generation

use rand::rngs::OsRng;

use crate::domain::OtpCode;

/// Source of new passcodes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> OtpCode;
}

/// Draws codes from the operating system CSPRNG. A failing entropy source
/// panics inside `OsRng`; there is no fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> OtpCode {
        OtpCode::random(&mut OsRng)
    }
}
