//! Failures of a quote fetch.
//!
//! Every variant renders as the text a UI shows after "Could not fetch quote:".

use reqwest::StatusCode;
use serde_json::Value;

/// Everything that can go wrong between issuing the request and holding a
/// [`Quote`](crate::Quote).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status
    #[error("API error! {detail}")]
    Api {
        /// Response status
        status: StatusCode,
        /// Message taken from the error body, or `Status: <code>`
        detail: String,
    },

    /// The success body was not valid JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The success body carried no quote record
    #[error("Received no quote data from API")]
    NoData,

    /// A quote record was present but unusable
    #[error("Malformed quote data: {0}")]
    MalformedQuote(String),

    /// The HTTP client could not be built
    #[error("Could not initialize HTTP client: {0}")]
    ClientInit(String),
}

impl FetchError {
    /// Build the error for a non-2xx response from its raw body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        FetchError::Api {
            status,
            detail: error_detail(status, body),
        }
    }
}

/// Pick a human-readable message out of an error response body.
///
/// `message` wins over `error`. Non-empty strings, non-zero numbers and
/// `true` count as a message; numbers and booleans are shown as written. An
/// `error` object carrying its own `message` is also understood. Anything
/// else falls back to `Status: <code>`.
pub fn error_detail(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| message_from_body(&value))
        .unwrap_or_else(|| format!("Status: {}", status.as_u16()))
}

fn message_from_body(body: &Value) -> Option<String> {
    let non_empty = |v: &Value| match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    };

    body.get("message")
        .and_then(non_empty)
        .or_else(|| body.get("error").and_then(non_empty))
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(non_empty)
        })
}
