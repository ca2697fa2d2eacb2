//! Dispatch module: delivery gateways for one-time passcodes
//!
//! - **Mock**: logs the message, for development
//! - **Http**: POSTs the message to a transactional mail API

pub mod http_dispatch;
pub mod mock_dispatch;


use std::sync::Arc;

use og_core::services::otp::DispatchGateway;
use og_shared::config::{DispatchConfig, DispatchProvider};

use crate::InfrastructureError;

pub use http_dispatch::HttpDispatchGateway;
pub use mock_dispatch::MockDispatchGateway;

/// Create the gateway selected by `config.provider`
pub fn create_dispatch_gateway(
    config: &DispatchConfig,
) -> Result<Arc<dyn DispatchGateway>, InfrastructureError> {
    match config.provider {
        DispatchProvider::Mock => {
            tracing::warn!("Using mock dispatch gateway; no mail will be delivered");
            Ok(Arc::new(MockDispatchGateway::new()))
        }
        DispatchProvider::Http => Ok(Arc::new(HttpDispatchGateway::new(config.clone())?)),
    }
}
