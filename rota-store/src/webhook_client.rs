use async_trait::async_trait;
use rota_core::{RelayOutcome, WebhookPayload, WebhookRelay};
use std::time::Duration;

use crate::app_config::WebhookConfig;
use crate::cap_error_body;

/// Posts search results to the workflow-automation webhook
pub struct HttpWebhookRelay {
    client: reqwest::Client,
    url: Option<String>,
}

impl HttpWebhookRelay {
    pub fn new(config: &WebhookConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone().filter(|u| !u.trim().is_empty()),
        })
    }
}

#[async_trait]
impl WebhookRelay for HttpWebhookRelay {
    async fn relay(&self, payload: &WebhookPayload) -> RelayOutcome {
        let Some(url) = self.url.as_deref() else {
            tracing::warn!("Webhook relay requested but no webhook URL is configured");
            return RelayOutcome::failed("Webhook URL not configured");
        };

        let response = match self.client.post(url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Webhook delivery failed");
                return RelayOutcome::failed(format!("Webhook request failed: {}", e));
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            tracing::info!(flights = payload.flights.len(), source = %payload.source, "Webhook delivered");
            RelayOutcome::delivered(message_from(&text))
        } else {
            tracing::warn!(status = status.as_u16(), "Webhook rejected payload");
            let mut detail = message_from(&text).unwrap_or(text);
            cap_error_body(&mut detail);
            RelayOutcome::failed(format!("Webhook returned HTTP {}: {}", status.as_u16(), detail))
        }
    }
}

/// `message` field of a JSON response body, if any
fn message_from(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}
