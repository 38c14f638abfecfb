pub mod app_config;
pub mod search_client;
pub mod webhook_client;

pub use search_client::HttpSearchEndpoint;
pub use webhook_client::HttpWebhookRelay;

/// Upstream error bodies are cut to this many bytes before they reach logs or callers
pub(crate) const MAX_ERROR_BODY: usize = 512;

/// Truncate `body` to at most `MAX_ERROR_BODY` bytes on a char boundary
pub(crate) fn cap_error_body(body: &mut String) {
    if body.len() > MAX_ERROR_BODY {
        let end = (0..=MAX_ERROR_BODY).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        body.truncate(end);
    }
}
