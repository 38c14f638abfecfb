use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Shopping endpoint and request shaping
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Absent or empty: every search goes straight to the fallback flights
    pub endpoint_url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            api_key: None,
            timeout_seconds: default_timeout(),
            currency_code: default_currency(),
            max_results: default_max_results(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    pub url: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            source: default_source(),
            timeout_seconds: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    /// Fare-equivalent added per stop under BEST ranking
    #[serde(default = "default_stop_penalty")]
    pub stop_penalty: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { stop_penalty: default_stop_penalty() }
    }
}

fn default_timeout() -> u64 { 20 }
fn default_currency() -> String { "BRL".to_string() }
fn default_max_results() -> u32 { 50 }
fn default_source() -> String { "rota-backoffice".to_string() }
fn default_stop_penalty() -> f64 { 5000.0 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `ROTA__SEARCH__ENDPOINT_URL=https://...`
            .add_source(config::Environment::with_prefix("ROTA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
