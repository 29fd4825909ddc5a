//! HTTP client for the identity provider's log-out endpoint.

use crate::config::SessionConfig;
use crate::error::SessionResult;
use reqwest::Client;
use tracing::debug;

/// Client for the single authenticated provider call the session core
/// makes: logging a user out of the identity provider after local
/// revocation.
pub struct ProviderClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ProviderClient {
    pub fn new(config: &SessionConfig) -> Self {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: config.provider_base_url.trim_end_matches('/').to_string(),
            api_key: config.provider_api_key.clone(),
        }
    }

    /// Logs the user out at the provider. Timeout and non-success
    /// statuses surface as errors; the caller decides whether local
    /// logout already happened.
    pub async fn log_out(&self, external_id: &str) -> SessionResult<()> {
        let url = format!("{}/users/{}/log_out", self.base_url, external_id);
        self.http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?;

        debug!(external_id, "provider log-out completed");
        Ok(())
    }
}
