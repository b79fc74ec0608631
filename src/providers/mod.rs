mod gemini;
mod gemini_types;
mod traits;

pub use gemini::GeminiProvider;
pub use traits::Provider;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::Config;

/// Build the provider configured for this deployment.
pub fn create_provider(config: &Config) -> Arc<dyn Provider> {
    Arc::new(GeminiProvider::new(config.api_key.as_deref()))
}

/// Shared outbound HTTP client: generous read timeout for generation calls,
/// tight connect timeout so a dead endpoint fails fast.
pub(crate) fn build_provider_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
