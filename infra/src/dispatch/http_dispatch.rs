//! Transactional mail API gateway
//!
//! Sends one JSON request per message:
//!
//! ```text
//! POST {endpoint}
//! Authorization: Bearer {api_key}
//! { "from", "to", "subject", "template", "data" }
//! ```
//!
//! The provider's message id is read from `id` or `message_id` in the
//! response body. Failures are not retried.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use og_core::services::otp::DispatchGateway;
use og_shared::config::DispatchConfig;
use og_shared::validation::mask_identifier;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    template: &'a str,
    data: &'a HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct MailResponse {
    id: Option<String>,
    message_id: Option<String>,
}

/// Gateway posting to a mail API over HTTPS
pub struct HttpDispatchGateway {
    client: Client,
    config: DispatchConfig,
}

impl HttpDispatchGateway {
    pub fn new(config: DispatchConfig) -> Result<Self, InfrastructureError> {
        if config.endpoint.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "DISPATCH_ENDPOINT must be set for the http provider".to_string(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "DISPATCH_API_KEY must be set for the http provider".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            endpoint = %config.endpoint,
            from = %config.from_address,
            "HTTP dispatch gateway initialized"
        );

        Ok(Self { client, config })
    }

    async fn post(
        &self,
        request: &MailRequest<'_>,
    ) -> Result<String, InfrastructureError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Dispatch(format!(
                "Mail API returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response.text().await?;
        let parsed: MailResponse = serde_json::from_str(&body).unwrap_or_default();
        Ok(parsed
            .id
            .or(parsed.message_id)
            .unwrap_or_else(|| format!("http_{}", uuid::Uuid::new_v4())))
    }
}

#[async_trait]
impl DispatchGateway for HttpDispatchGateway {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> Result<String, String> {
        let request = MailRequest {
            from: &self.config.from_address,
            to: recipient,
            subject,
            template: template_id,
            data,
        };

        debug!(
            recipient = %mask_identifier(recipient),
            template = template_id,
            "Posting message to mail API"
        );

        self.post(&request).await.map_err(|e| {
            error!(
                recipient = %mask_identifier(recipient),
                error = %e,
                "Mail API request failed"
            );
            e.to_string()
        })
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}
