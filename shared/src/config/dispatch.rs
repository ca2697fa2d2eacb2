//! Delivery gateway configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Delivery provider used to send passcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchProvider {
    /// Log the message instead of sending it
    Mock,
    /// POST the message to a transactional mail API
    Http,
}

impl std::str::FromStr for DispatchProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(DispatchProvider::Mock),
            "http" | "mail-api" => Ok(DispatchProvider::Http),
            _ => Err(format!("Invalid dispatch provider: {}", s)),
        }
    }
}

/// Delivery gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// Provider implementation
    pub provider: DispatchProvider,

    /// Endpoint of the mail API (http provider only)
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token for the mail API
    #[serde(default)]
    pub api_key: String,

    /// Sender address
    pub from_address: String,

    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            provider: DispatchProvider::Mock,
            endpoint: String::new(),
            api_key: String::new(),
            from_address: String::from("no-reply@otpguard.local"),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl DispatchConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            provider: env_or("DISPATCH_PROVIDER", d.provider),
            endpoint: std::env::var("DISPATCH_ENDPOINT").unwrap_or(d.endpoint),
            api_key: std::env::var("DISPATCH_API_KEY").unwrap_or(d.api_key),
            from_address: std::env::var("DISPATCH_FROM_ADDRESS").unwrap_or(d.from_address),
            request_timeout_secs: env_or("DISPATCH_REQUEST_TIMEOUT_SECS", d.request_timeout_secs),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}
