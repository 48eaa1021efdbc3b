//! Random quote command implementation
//!
//! Drives a `QuoteStore` through one fetch and renders the resulting state,
//! optionally narrating each state transition as it happens.

use clap::Args;
use log::{debug, info};
use quote_store::{DeploymentMode, QuoteEndpoint, QuoteState, QuoteStore, ResponseShape};

use crate::commands::EX_UNAVAILABLE;
use crate::config::{CliConfig, EndpointOverrides};

/// Fetch and print a random quote
#[derive(Args, Debug, Default)]
pub struct RandomArgs {
    /// Deployment mode of the quote endpoint (proxy, serverless)
    #[arg(short, long)]
    pub mode: Option<DeploymentMode>,

    /// Base URL the mode's path is appended to
    #[arg(long, conflicts_with = "url")]
    pub base_url: Option<String>,

    /// Full endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// Response body shape (array, object)
    #[arg(long)]
    pub shape: Option<ResponseShape>,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,

    /// Print every state transition while fetching
    #[arg(short, long)]
    pub watch: bool,
}

impl RandomArgs {
    /// Execute the command and return the process exit code
    pub fn execute(&self, config: &CliConfig) -> anyhow::Result<i32> {
        let endpoint = config.resolve_endpoint(&self.overrides());
        info!("Using quote endpoint: {} ({})", endpoint.url, endpoint.shape);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let store = QuoteStore::try_new(endpoint)?;
        let state = runtime.block_on(self.fetch(store));

        if self.json {
            println!("{}", serde_json::to_string_pretty(&state)?);
        } else if state.has_quote() {
            println!("{}", render_text(&state));
        } else {
            eprintln!("{}", render_text(&state));
        }

        Ok(exit_code(&state))
    }

    fn overrides(&self) -> EndpointOverrides {
        EndpointOverrides {
            mode: self.mode,
            base_url: self.base_url.clone(),
            url: self.url.clone(),
            shape: self.shape,
        }
    }

    async fn fetch(&self, store: QuoteStore) -> QuoteState {
        if self.watch {
            let mut updates = store.subscribe();
            let watcher = async move {
                while updates.changed().await.is_ok() {
                    let state = updates.borrow_and_update().clone();
                    eprintln!("{}", render_progress(&state));
                    if !state.is_loading {
                        break;
                    }
                }
            };
            tokio::join!(store.fetch_random_quote(), watcher);
        } else {
            store.fetch_random_quote().await;
        }

        debug!("Final state: {:?}", store.state());
        store.state()
    }
}

/// Human-readable rendering of a settled state
pub fn render_text(state: &QuoteState) -> String {
    match (&state.current_quote, &state.error_message) {
        (Some(quote), _) => {
            let mut out = format!("\"{}\"\n  - {}", quote.content, quote.author);
            let tags = state.formatted_tags();
            if !tags.is_empty() {
                out.push_str(&format!("\n  [{}]", tags));
            }
            out
        }
        (None, Some(message)) => message.clone(),
        (None, None) => "No quote loaded.".to_string(),
    }
}

/// One-line description of a transition, for `--watch`
pub fn render_progress(state: &QuoteState) -> String {
    if state.is_loading {
        "Fetching quote...".to_string()
    } else if state.has_quote() {
        "Quote received.".to_string()
    } else {
        "Fetch failed.".to_string()
    }
}

/// 0 when a quote is held, EX_UNAVAILABLE otherwise
pub fn exit_code(state: &QuoteState) -> i32 {
    if state.has_quote() {
        0
    } else {
        EX_UNAVAILABLE
    }
}
