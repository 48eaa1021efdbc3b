use async_trait::async_trait;
use quote_store::{error_detail, ProviderQuote};
use serde_json::Value;
use std::sync::Arc;

use crate::config::{Config, UpstreamConfig};
use crate::proxy::AppError;

/// Common functionality shared across all providers
pub mod common {
    use crate::config::Config;

    /// Create the outbound HTTP client from the upstream settings
    pub fn create_client(config: &Config) -> Result<reqwest::Client, Box<dyn std::error::Error>> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.upstream.timeout));

        // Add proxy configuration if specified
        if let Some(proxies) = &config.upstream.proxies {
            if let Some(http_proxy) = proxies.get("http") {
                client_builder = client_builder.proxy(reqwest::Proxy::http(http_proxy)?);
            }
            if let Some(https_proxy) = proxies.get("https") {
                client_builder = client_builder.proxy(reqwest::Proxy::https(https_proxy)?);
            }
        }

        Ok(client_builder.build()?)
    }
}

/// A remote service that hands out quotes
#[async_trait]
pub trait Provider: Send + Sync {
    /// Build the upstream request, credentials included
    fn build_request(
        &self,
        client: &reqwest::Client,
        upstream: &UpstreamConfig,
        category: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, AppError>;

    /// Map the upstream success body onto quote records
    fn transform_response(&self, upstream_response: Value) -> Result<Vec<ProviderQuote>, AppError>;

    /// Fetch quotes from upstream
    async fn fetch_quotes(
        &self,
        client: &reqwest::Client,
        config: Arc<Config>,
        category: Option<String>,
    ) -> Result<Vec<ProviderQuote>, AppError> {
        let request = self.build_request(client, &config.upstream, category.as_deref())?;

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request to upstream: {}", e);
            AppError::BackendError(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.bytes().await.unwrap_or_default();
            tracing::error!(
                "Upstream returned error {}: {}",
                status,
                String::from_utf8_lossy(&error_body)
            );
            return Err(AppError::Upstream {
                status,
                message: error_detail(status, &error_body),
            });
        }

        let upstream_response: Value = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse upstream response: {}", e);
            AppError::BackendError(e.to_string())
        })?;

        self.transform_response(upstream_response)
    }
}

pub mod api_ninjas;
