//! Mock delivery gateway
//!
//! Logs messages instead of sending them. With console output enabled the
//! template data, including the code, is logged so it can be read during
//! local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use og_core::services::otp::DispatchGateway;
use og_shared::validation::mask_identifier;

/// Mock gateway for development and testing
#[derive(Clone)]
pub struct MockDispatchGateway {
    /// Number of messages sent
    message_count: Arc<AtomicU64>,
    /// Fail every send
    simulate_failure: Arc<AtomicBool>,
    /// Log template data
    console_output: bool,
}

impl MockDispatchGateway {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for MockDispatchGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DispatchGateway for MockDispatchGateway {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> Result<String, String> {
        let masked = mask_identifier(recipient);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(recipient = %masked, "Mock dispatch simulating failure");
            return Err("Simulated delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "dispatch",
            provider = "mock",
            recipient = %masked,
            subject = subject,
            template = template_id,
            message_id = %message_id,
            count = count,
            "Message sent (mock)"
        );
        if self.console_output {
            info!(target: "dispatch", data = ?data, "Mock message data");
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
