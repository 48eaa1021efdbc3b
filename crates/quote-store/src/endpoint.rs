//! Where quotes come from, and what the response body looks like.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path served by the local proxy in front of the quote provider.
const PROXY_PATH: &str = "/api/v1/quotes";

/// Path served by the serverless function in front of the quote provider.
const SERVERLESS_PATH: &str = "/.netlify/functions/get-quote";

/// Shape of a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// `[{ "quote": .., "author": .., "category": .. }]`, first element wins
    Array,
    /// `{ "quote": .., "author": .., "category": .. }`
    Object,
}

/// Deployment flavour, each with its own route and response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Local proxy (development)
    #[default]
    Proxy,
    /// Serverless function (production)
    Serverless,
}

impl DeploymentMode {
    /// Route of the quote endpoint for this mode.
    pub fn path(self) -> &'static str {
        match self {
            DeploymentMode::Proxy => PROXY_PATH,
            DeploymentMode::Serverless => SERVERLESS_PATH,
        }
    }

    /// Body shape returned by this mode's endpoint.
    pub fn response_shape(self) -> ResponseShape {
        match self {
            DeploymentMode::Proxy => ResponseShape::Array,
            DeploymentMode::Serverless => ResponseShape::Object,
        }
    }
}

/// Error returned when parsing a [`DeploymentMode`] or [`ResponseShape`] fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for DeploymentMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proxy" | "dev" | "development" => Ok(DeploymentMode::Proxy),
            "serverless" | "prod" | "production" => Ok(DeploymentMode::Serverless),
            _ => Err(ParseEnumError {
                kind: "deployment mode",
                value: s.to_string(),
                expected: "proxy, serverless",
            }),
        }
    }
}

impl FromStr for ResponseShape {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(ResponseShape::Array),
            "object" => Ok(ResponseShape::Object),
            _ => Err(ParseEnumError {
                kind: "response shape",
                value: s.to_string(),
                expected: "array, object",
            }),
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Proxy => f.write_str("proxy"),
            DeploymentMode::Serverless => f.write_str("serverless"),
        }
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseShape::Array => f.write_str("array"),
            ResponseShape::Object => f.write_str("object"),
        }
    }
}

/// A fully resolved quote endpoint: URL plus the body shape it returns.
///
/// The shape is configuration, never guessed from the body, because the
/// proxy and the serverless function disagree on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteEndpoint {
    /// Absolute URL requested with `GET`
    pub url: String,
    /// Expected body shape on success
    pub shape: ResponseShape,
}

impl QuoteEndpoint {
    /// Build an endpoint from an explicit URL and shape.
    pub fn new(url: impl Into<String>, shape: ResponseShape) -> Self {
        Self {
            url: url.into(),
            shape,
        }
    }

    /// Build the endpoint a deployment mode exposes under `base_url`.
    pub fn for_mode(base_url: &str, mode: DeploymentMode) -> Self {
        let url = format!("{}{}", base_url.trim_end_matches('/'), mode.path());
        Self::new(url, mode.response_shape())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode_proxy() {
        let endpoint = QuoteEndpoint::for_mode("http://localhost:5173", DeploymentMode::Proxy);
        assert_eq!(endpoint.url, "http://localhost:5173/api/v1/quotes");
        assert_eq!(endpoint.shape, ResponseShape::Array);
    }

    #[test]
    fn test_for_mode_serverless_trailing_slash() {
        let endpoint =
            QuoteEndpoint::for_mode("https://quotes.example.org/", DeploymentMode::Serverless);
        assert_eq!(
            endpoint.url,
            "https://quotes.example.org/.netlify/functions/get-quote"
        );
        assert_eq!(endpoint.shape, ResponseShape::Object);
    }

    #[test]
    fn test_mode_aliases() {
        assert_eq!("dev".parse::<DeploymentMode>(), Ok(DeploymentMode::Proxy));
        assert_eq!("PROD".parse::<DeploymentMode>(), Ok(DeploymentMode::Serverless));
        assert_eq!(
            " serverless ".parse::<DeploymentMode>(),
            Ok(DeploymentMode::Serverless)
        );
    }

    #[test]
    fn test_invalid_mode_message() {
        let err = "staging".parse::<DeploymentMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid deployment mode 'staging', expected one of: proxy, serverless"
        );
    }

    #[test]
    fn test_shape_parse_and_display() {
        assert_eq!("Array".parse::<ResponseShape>(), Ok(ResponseShape::Array));
        assert_eq!(ResponseShape::Object.to_string(), "object");
        assert!("list".parse::<ResponseShape>().is_err());
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let mode: DeploymentMode = serde_json::from_str("\"serverless\"").unwrap();
        assert_eq!(mode, DeploymentMode::Serverless);
        assert_eq!(serde_json::to_string(&DeploymentMode::Proxy).unwrap(), "\"proxy\"");
    }
}
