//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Ephemeral store (Redis or in-memory) configuration
//! - `dispatch` - Delivery gateway for one-time passcodes
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Passcode lifetimes, cooldowns, spam and lockout thresholds
//! - `server` - HTTP server configuration

pub mod cache;
pub mod dispatch;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::{CacheBackend, CacheConfig};
pub use dispatch::{DispatchConfig, DispatchProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpPolicyConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Ephemeral store configuration
    pub cache: CacheConfig,

    /// OTP policy (TTLs and thresholds)
    #[serde(default)]
    pub otp: OtpPolicyConfig,

    /// Delivery gateway configuration
    pub dispatch: DispatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            otp: OtpPolicyConfig::default(),
            dispatch: DispatchConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            otp: OtpPolicyConfig::from_env(),
            dispatch: DispatchConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is missing or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
