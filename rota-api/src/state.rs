use rota_core::{ParamsValidator, WebhookRelay};
use rota_offer::SearchOrchestrator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SearchOrchestrator>,
    pub validator: Arc<dyn ParamsValidator>,
    pub relay: Arc<dyn WebhookRelay>,
    /// `source` field stamped on relayed payloads
    pub webhook_source: String,
}
