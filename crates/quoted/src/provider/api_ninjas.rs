use async_trait::async_trait;
use quote_store::ProviderQuote;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::provider::Provider;
use crate::proxy::AppError;

const API_KEY_HEADER: &str = "X-Api-Key";

/// API Ninjas quotes provider
/// Based on: https://api-ninjas.com/api/quotes
pub struct ApiNinjasProvider;

impl ApiNinjasProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for ApiNinjasProvider {
    /// `GET <endpoint>[?category=..]` with the key in `X-Api-Key`
    fn build_request(
        &self,
        client: &reqwest::Client,
        upstream: &UpstreamConfig,
        category: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, AppError> {
        let api_key = upstream
            .api_key()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let mut request = client
            .get(&upstream.endpoint)
            .header(API_KEY_HEADER, api_key);

        if let Some(category) = category.filter(|c| !c.is_empty()) {
            request = request.query(&[("category", category)]);
        }

        Ok(request)
    }

    /// The upstream answers `[{ "quote", "author", "category" }]`, which is
    /// already the record shape clients expect.
    fn transform_response(&self, upstream_response: Value) -> Result<Vec<ProviderQuote>, AppError> {
        serde_json::from_value(upstream_response).map_err(|e| {
            AppError::TransformError(format!("Unexpected quote list from upstream: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, api_key: Option<&str>) -> Arc<Config> {
        let mut config = Config::default();
        config.upstream.endpoint = format!("{}/v1/quotes", server.uri());
        config.upstream.api_key = api_key.map(str::to_string);
        Arc::new(config)
    }

    #[test]
    fn test_transform_response_valid() {
        let provider = ApiNinjasProvider::new();
        let quotes = provider
            .transform_response(json!([
                {"quote": "Be yourself.", "author": "Oscar Wilde", "category": "inspirational"}
            ]))
            .unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].quote, "Be yourself.");
        assert_eq!(quotes[0].author.as_deref(), Some("Oscar Wilde"));
        assert_eq!(quotes[0].category.as_deref(), Some("inspirational"));
    }

    #[test]
    fn test_transform_response_not_a_list() {
        let provider = ApiNinjasProvider::new();
        let result = provider.transform_response(json!({"quote": "single"}));
        assert!(matches!(result, Err(AppError::TransformError(_))));
    }

    #[tokio::test]
    async fn test_fetch_sends_api_key_and_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/quotes"))
            .and(header("X-Api-Key", "secret"))
            .and(query_param("category", "happiness"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"quote": "Smile.", "author": "Someone", "category": "happiness"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let provider = ApiNinjasProvider::new();
        let quotes = provider
            .fetch_quotes(
                &reqwest::Client::new(),
                config_for(&server, Some("secret")),
                Some("happiness".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(quotes[0].quote, "Smile.");
    }

    #[tokio::test]
    async fn test_fetch_forwards_upstream_error_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/quotes"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid API Key."})),
            )
            .mount(&server)
            .await;

        let provider = ApiNinjasProvider::new();
        let err = provider
            .fetch_quotes(&reqwest::Client::new(), config_for(&server, Some("bad")), None)
            .await
            .unwrap_err();

        match err {
            AppError::Upstream { status, message } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(message, "Invalid API Key.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_without_key_never_reaches_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = ApiNinjasProvider::new();
        let err = provider
            .fetch_quotes(&reqwest::Client::new(), config_for(&server, None), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }
}
