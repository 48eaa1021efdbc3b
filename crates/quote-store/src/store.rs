//! The quote state container and its fetch action.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::endpoint::QuoteEndpoint;
use crate::error::FetchError;
use crate::quote::{extract_quote, Quote};
use crate::state::QuoteState;

/// Prefix of every error message shown to the user.
const ERROR_PREFIX: &str = "Oops! Could not fetch quote:";

/// Observable holder of the current quote, loading flag and error message.
///
/// Cloning is cheap and every clone shares the same state, so a UI can hand
/// copies to whatever triggers a fetch and subscribe from anywhere else.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    client: reqwest::Client,
    endpoint: Arc<QuoteEndpoint>,
    state: Arc<watch::Sender<QuoteState>>,
}

impl QuoteStore {
    /// Create an idle store talking to `endpoint` with a default HTTP client.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized. Use
    /// [`QuoteStore::try_new`] to handle that case.
    pub fn new(endpoint: QuoteEndpoint) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Like [`QuoteStore::new`], but reports a client that fails to build.
    pub fn try_new(endpoint: QuoteEndpoint) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::ClientInit(e.to_string()))?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Create an idle store using a caller-configured HTTP client.
    pub fn with_client(client: reqwest::Client, endpoint: QuoteEndpoint) -> Self {
        let (state, _) = watch::channel(QuoteState::default());
        Self {
            client,
            endpoint: Arc::new(endpoint),
            state: Arc::new(state),
        }
    }

    /// The endpoint this store fetches from.
    pub fn endpoint(&self) -> &QuoteEndpoint {
        &self.endpoint
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QuoteState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<QuoteState> {
        self.state.subscribe()
    }

    /// Quote from the last successful fetch, if any.
    pub fn current_quote(&self) -> Option<Quote> {
        self.state.borrow().current_quote.clone()
    }

    /// Whether a fetch is in progress.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Message from the last failed fetch, if any.
    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().error_message.clone()
    }

    /// See [`QuoteState::has_quote`].
    pub fn has_quote(&self) -> bool {
        self.state.borrow().has_quote()
    }

    /// See [`QuoteState::formatted_tags`].
    pub fn formatted_tags(&self) -> String {
        self.state.borrow().formatted_tags()
    }

    /// Fetch one random quote and publish the outcome.
    ///
    /// The previous quote and error are cleared up front. Failures never
    /// escape: they end up in [`QuoteState::error_message`]. Overlapping calls
    /// are not coordinated, whichever finishes last sets the visible state.
    pub async fn fetch_random_quote(&self) {
        self.state.send_replace(QuoteState::loading());
        let mut guard = LoadingGuard {
            state: &self.state,
            armed: true,
        };

        let next = match self.request_quote().await {
            Ok(quote) => {
                info!("Fetched quote by {}", quote.author);
                QuoteState {
                    current_quote: Some(quote),
                    is_loading: false,
                    error_message: None,
                }
            }
            Err(e) => {
                error!("Failed to fetch quote: {}", e);
                QuoteState {
                    current_quote: None,
                    is_loading: false,
                    error_message: Some(format!("{} {}", ERROR_PREFIX, e)),
                }
            }
        };

        guard.armed = false;
        self.state.send_replace(next);
    }

    async fn request_quote(&self) -> Result<Quote, FetchError> {
        debug!("Fetching from: {}", self.endpoint.url);

        let response = self
            .client
            .get(&self.endpoint.url)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to quote endpoint: {}", e);
                FetchError::Network(e)
            })?;

        let status = response.status();
        debug!("Fetch response status: {}", status);

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            error!(
                "Quote endpoint returned error {}: {}",
                status,
                String::from_utf8_lossy(&body)
            );
            return Err(FetchError::from_response(status, &body));
        }

        let body = response.bytes().await?;
        let data: Value =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!("Quote data received: {}", data);

        extract_quote(data, self.endpoint.shape)
    }
}

/// Clears the loading flag if a fetch future is dropped before it finishes.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<QuoteState>,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(|state| state.is_loading = false);
        }
    }
}
