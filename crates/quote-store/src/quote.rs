use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoint::ResponseShape;
use crate::error::FetchError;

/// Author shown when the provider does not name one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A quote as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote text
    pub content: String,
    /// Attributed author, [`UNKNOWN_AUTHOR`] when the provider gave none
    pub author: String,
    /// Zero or one tag, taken from the provider's category
    pub tags: Vec<String>,
}

/// A quote record as the provider sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderQuote {
    /// Quote text
    pub quote: String,
    /// Author, possibly absent or null
    #[serde(default)]
    pub author: Option<String>,
    /// Single category, possibly absent or null
    #[serde(default)]
    pub category: Option<String>,
}

impl ProviderQuote {
    /// Map provider field names onto the store's [`Quote`].
    pub fn into_quote(self) -> Quote {
        let author = self
            .author
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        let tags = self.category.filter(|c| !c.is_empty()).into_iter().collect();

        Quote {
            content: self.quote,
            author,
            tags,
        }
    }
}

/// Pull the quote record out of a success body and map it.
///
/// With [`ResponseShape::Array`] the first element is used; an empty array,
/// a `null` body or a body of the other shape carries no data.
pub fn extract_quote(body: Value, shape: ResponseShape) -> Result<Quote, FetchError> {
    let record = match (shape, body) {
        (ResponseShape::Array, Value::Array(items)) => items.into_iter().next(),
        (ResponseShape::Object, record @ Value::Object(_)) => Some(record),
        _ => None,
    }
    .ok_or(FetchError::NoData)?;

    let provider: ProviderQuote = serde_json::from_value(record)
        .map_err(|e| FetchError::MalformedQuote(e.to_string()))?;

    Ok(provider.into_quote())
}
