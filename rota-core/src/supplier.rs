use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::flight::NormalizedFlight;
use crate::provider::{ProviderSearchRequest, SimplifiedOffer};
use crate::search::SearchParams;

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("Endpoint not configured")]
    NotConfigured,
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unreadable response body: {0}")]
    Decode(String),
}

/// Remote flight-shopping endpoint (GDS directly or through a relay workflow)
#[async_trait]
pub trait SearchEndpoint: Send + Sync {
    async fn fetch_offers(
        &self,
        request: &ProviderSearchRequest,
    ) -> Result<Vec<SimplifiedOffer>, EndpointError>;
}

/// Body posted to the workflow-automation webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub source: String,
    pub search: SearchParams,
    pub flights: Vec<NormalizedFlight>,
}

/// What the caller learns from a webhook delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayOutcome {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayOutcome {
    pub fn delivered(message: Option<String>) -> Self {
        Self { ok: true, message, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { ok: false, message: None, error: Some(error.into()) }
    }
}

/// Outbound webhook. Delivery failures are reported in the outcome, never as panics or errors.
#[async_trait]
pub trait WebhookRelay: Send + Sync {
    async fn relay(&self, payload: &WebhookPayload) -> RelayOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_outcome_shape() {
        let ok = serde_json::to_value(RelayOutcome::delivered(None)).unwrap();
        assert_eq!(ok, serde_json::json!({ "ok": true }));

        let failed = serde_json::to_value(RelayOutcome::failed("HTTP 500")).unwrap();
        assert_eq!(failed["ok"], false);
        assert_eq!(failed["error"], "HTTP 500");
    }

    #[test]
    fn test_endpoint_error_messages() {
        let err = EndpointError::Status { status: 503, body: "down".into() };
        assert_eq!(err.to_string(), "Upstream returned HTTP 503: down");
    }
}
