use async_trait::async_trait;
use rota_core::provider::extract_offers;
use rota_core::{EndpointError, ProviderSearchRequest, SearchEndpoint, SimplifiedOffer};
use std::time::Duration;

use crate::app_config::SearchConfig;
use crate::cap_error_body;

/// `SearchEndpoint` over HTTP POST + JSON
pub struct HttpSearchEndpoint {
    client: reqwest::Client,
    url: Option<String>,
    api_key: Option<String>,
}

impl HttpSearchEndpoint {
    pub fn new(config: &SearchConfig) -> Result<Self, EndpointError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: config.endpoint_url.clone().filter(|u| !u.trim().is_empty()),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

#[async_trait]
impl SearchEndpoint for HttpSearchEndpoint {
    async fn fetch_offers(
        &self,
        request: &ProviderSearchRequest,
    ) -> Result<Vec<SimplifiedOffer>, EndpointError> {
        let url = self.url.as_deref().ok_or(EndpointError::NotConfigured)?;

        let mut builder = self.client.post(url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            cap_error_body(&mut body);
            return Err(EndpointError::Status { status: status.as_u16(), body });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EndpointError::Decode(e.to_string()))?;

        let offers = extract_offers(body).map_err(|e| EndpointError::Decode(e.to_string()))?;
        tracing::debug!(url, count = offers.len(), "Search endpoint answered");
        Ok(offers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use rota_core::SearchParams;
    use serde_json::{json, Value};

    fn config_for(url: Option<String>) -> SearchConfig {
        SearchConfig { endpoint_url: url, ..SearchConfig::default() }
    }

    fn request() -> ProviderSearchRequest {
        ProviderSearchRequest::from_params(&SearchParams::one_way("GRU", "LIS", "2099-03-10"), "BRL", 20)
    }

    #[tokio::test]
    async fn test_posts_payload_and_reads_array() {
        // Echo the requested route back inside the offer so the payload is checked too
        let router = Router::new().route(
            "/offers",
            post(|Json(body): Json<Value>| async move {
                Json(json!([{
                    "airline": "TP",
                    "outbound": {
                        "departure": { "airport": body["originLocationCode"], "time": "2099-03-10T22:00:00" },
                        "arrival": { "airport": body["destinationLocationCode"], "time": "2099-03-11T11:00:00" }
                    }
                }]))
            }),
        );
        let base = serve(router).await;
        let endpoint = HttpSearchEndpoint::new(&config_for(Some(format!("{}/offers", base)))).unwrap();

        let offers = endpoint.fetch_offers(&request()).await.unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].origin_airport(), Some("GRU"));
        assert_eq!(offers[0].destination_airport(), Some("LIS"));
    }

    #[tokio::test]
    async fn test_reads_wrapped_results() {
        let router = Router::new().route(
            "/offers",
            post(|| async { Json(json!({ "results": [{ "airline": "LA" }, { "airline": "AD" }] })) }),
        );
        let base = serve(router).await;
        let endpoint = HttpSearchEndpoint::new(&config_for(Some(format!("{}/offers", base)))).unwrap();

        let offers = endpoint.fetch_offers(&request()).await.unwrap();
        assert_eq!(offers.len(), 2);
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let router = Router::new().route(
            "/offers",
            post(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer secret-token") => (StatusCode::OK, Json(json!([]))),
                    _ => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "no token" }))),
                }
            }),
        );
        let base = serve(router).await;
        let mut config = config_for(Some(format!("{}/offers", base)));
        config.api_key = Some("secret-token".into());
        let endpoint = HttpSearchEndpoint::new(&config).unwrap();

        assert!(endpoint.fetch_offers(&request()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let router = Router::new().route(
            "/offers",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base = serve(router).await;
        let endpoint = HttpSearchEndpoint::new(&config_for(Some(format!("{}/offers", base)))).unwrap();

        match endpoint.fetch_offers(&request()).await {
            Err(EndpointError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparsable_body_is_decode_error() {
        let router = Router::new().route("/offers", post(|| async { "<html>oops</html>" }));
        let base = serve(router).await;
        let endpoint = HttpSearchEndpoint::new(&config_for(Some(format!("{}/offers", base)))).unwrap();

        assert!(matches!(endpoint.fetch_offers(&request()).await, Err(EndpointError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint() {
        let endpoint = HttpSearchEndpoint::new(&config_for(Some("  ".into()))).unwrap();
        assert!(!endpoint.is_configured());
        assert!(matches!(endpoint.fetch_offers(&request()).await, Err(EndpointError::NotConfigured)));
    }
}
