use serde::Serialize;

use crate::quote::Quote;

/// Snapshot of everything a UI renders: result, loading flag, error.
///
/// The derived values (`has_quote`, `formatted_tags`) are computed from the
/// snapshot on every call, so they can never drift from the triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteState {
    /// Quote from the last successful fetch
    pub current_quote: Option<Quote>,
    /// A fetch is in progress
    pub is_loading: bool,
    /// User-facing message from the last failed fetch
    pub error_message: Option<String>,
}

impl QuoteState {
    /// State published when a fetch starts.
    pub(crate) fn loading() -> Self {
        Self {
            current_quote: None,
            is_loading: true,
            error_message: None,
        }
    }

    /// True when a quote is held.
    pub fn has_quote(&self) -> bool {
        self.current_quote.is_some()
    }

    /// Tags joined with `", "`, or an empty string when there are none.
    pub fn formatted_tags(&self) -> String {
        match &self.current_quote {
            Some(quote) if !quote.tags.is_empty() => quote.tags.join(", "),
            _ => String::new(),
        }
    }
}
