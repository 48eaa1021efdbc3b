//! Reactive state container for a single random quote.
//!
//! A [`QuoteStore`] holds the current [`Quote`], a loading flag and an error
//! message, and publishes every transition through a `watch` channel. The one
//! action, [`QuoteStore::fetch_random_quote`], talks to a quote endpoint that
//! is injected as a [`QuoteEndpoint`] rather than chosen at build time.
//!
//! ```no_run
//! use quote_store::{DeploymentMode, QuoteEndpoint, QuoteStore};
//!
//! # async fn run() {
//! let endpoint = QuoteEndpoint::for_mode("http://127.0.0.1:8080", DeploymentMode::Proxy);
//! let store = QuoteStore::new(endpoint);
//! store.fetch_random_quote().await;
//! if let Some(quote) = store.current_quote() {
//!     println!("{} ({})", quote.content, store.formatted_tags());
//! }
//! # }
//! ```

mod endpoint;
mod error;
mod quote;
mod state;
mod store;

pub use endpoint::{DeploymentMode, ParseEnumError, QuoteEndpoint, ResponseShape};
pub use error::{error_detail, FetchError};
pub use quote::{extract_quote, ProviderQuote, Quote, UNKNOWN_AUTHOR};
pub use state::QuoteState;
pub use store::QuoteStore;
