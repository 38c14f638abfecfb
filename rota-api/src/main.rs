use anyhow::Context;
use rota_api::{app, AppState};
use rota_core::{ParamsValidator, StandardValidator};
use rota_offer::{Ranker, SearchOrchestrator};
use rota_store::{app_config::Config, HttpSearchEndpoint, HttpWebhookRelay};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rota_api=debug,rota_offer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Rota API on port {}", config.server.port);

    let endpoint = HttpSearchEndpoint::new(&config.search).context("Failed to build search client")?;
    if !endpoint.is_configured() {
        tracing::warn!("No search endpoint configured; every search will return fallback flights");
    }
    let relay = HttpWebhookRelay::new(&config.webhook).context("Failed to build webhook client")?;

    let validator: Arc<dyn ParamsValidator> = Arc::new(StandardValidator);
    let orchestrator = SearchOrchestrator::new(
        Arc::new(endpoint),
        validator.clone(),
        Ranker::new(config.ranking.clone()),
        config.search.clone(),
    );

    let app_state = AppState {
        orchestrator: Arc::new(orchestrator),
        validator,
        relay: Arc::new(relay),
        webhook_source: config.webhook.source.clone(),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
