use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable consulted when the config file carries no API key.
pub const API_KEY_ENV: &str = "API_NINJAS_KEY";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "QUOTED_CONFIG";

const DEFAULT_ENDPOINT: &str = "https://api.api-ninjas.com/v1/quotes";
const DEFAULT_TIMEOUT: u64 = 30;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no API key configured; set upstream.api_key or API_NINJAS_KEY")]
    MissingApiKey,
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

/// The quote provider we forward to
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Never sent to clients
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Optional outbound proxies keyed by scheme ("http", "https")
    #[serde(default)]
    pub proxies: Option<HashMap<String, String>>,
}

/// Where the daemon listens
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout: default_timeout(),
            proxies: None,
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl UpstreamConfig {
    /// The configured API key, empty strings counting as unset.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a config file that must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Fill in the API key from the environment when the file has none.
    pub fn with_env_api_key(mut self, env_key: Option<String>) -> Self {
        let file_key_missing = self.upstream.api_key().is_err();
        if file_key_missing {
            if let Some(key) = env_key.filter(|k| !k.is_empty()) {
                self.upstream.api_key = Some(key);
            }
        }
        self
    }
}

/// Resolve and load the daemon configuration.
///
/// An explicit path (from `$QUOTED_CONFIG`) must exist; an empty one counts
/// as unset. Otherwise the XDG location is tried and defaults are used when it
/// is absent. `env_key` fills in a missing API key, and a config that still
/// has no key is rejected.
pub fn load(
    explicit: Option<String>,
    xdg_config_dirs: Option<String>,
    env_key: Option<String>,
) -> Result<Config, ConfigError> {
    let explicit = explicit.filter(|p| !p.is_empty());
    let path = config_path(explicit.clone(), xdg_config_dirs);
    info!("Loading configuration from {}", path.display());

    let config = match explicit {
        Some(_) => Config::from_file(&path)?,
        None => Config::from_file_or_default(&path)?,
    };
    let config = config.with_env_api_key(env_key);

    // Refuse to start rather than fail every request later
    config.upstream.api_key()?;
    Ok(config)
}

/// `$QUOTED_CONFIG` if set, otherwise `quoted/config.toml` under the first
/// entry of `$XDG_CONFIG_DIRS` (default `/etc/xdg`).
pub fn config_path(explicit: Option<String>, xdg_config_dirs: Option<String>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let dirs = xdg_config_dirs.unwrap_or_default();
    let base = dirs
        .split(':')
        .find(|d| !d.is_empty())
        .unwrap_or("/etc/xdg");
    Path::new(base).join("quoted").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.upstream.endpoint, "https://api.api-ninjas.com/v1/quotes");
        assert_eq!(config.upstream.timeout, 30);
        assert!(config.upstream.api_key.is_none());
        assert_eq!(config.proxy.host, "127.0.0.1");
        assert_eq!(config.proxy.port, 8080);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            [upstream]
            endpoint = "https://quotes.internal/v1/quotes"
            api_key = "secret"
            timeout = 5

            [upstream.proxies]
            https = "http://proxy.internal:3128"

            [proxy]
            host = "0.0.0.0"
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.endpoint, "https://quotes.internal/v1/quotes");
        assert_eq!(config.upstream.api_key().unwrap(), "secret");
        assert_eq!(config.upstream.timeout, 5);
        assert_eq!(
            config
                .upstream
                .proxies
                .as_ref()
                .and_then(|p| p.get("https"))
                .map(String::as_str),
            Some("http://proxy.internal:3128")
        );
        assert_eq!(config.proxy.host, "0.0.0.0");
        assert_eq!(config.proxy.port, 9000);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[proxy]\nport = \"eighty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_key_fills_missing_key() {
        let config = Config::default().with_env_api_key(Some("from-env".to_string()));
        assert_eq!(config.upstream.api_key().unwrap(), "from-env");
    }

    #[test]
    fn test_file_key_wins_over_env() {
        let config = Config::from_toml_str("[upstream]\napi_key = \"from-file\"")
            .unwrap()
            .with_env_api_key(Some("from-env".to_string()));
        assert_eq!(config.upstream.api_key().unwrap(), "from-file");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let config = Config::from_toml_str("[upstream]\napi_key = \"\"")
            .unwrap()
            .with_env_api_key(None);
        assert!(matches!(
            config.upstream.api_key(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            Config::from_file_or_default(Path::new("/nonexistent/quoted/config.toml")).unwrap();
        assert_eq!(config.proxy.port, 8080);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::from_file(Path::new("/nonexistent/quoted/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quoted/config.toml"));
    }

    #[test]
    fn test_load_treats_empty_explicit_path_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let xdg = dir.path().join("missing").display().to_string();

        let config = load(Some(String::new()), Some(xdg), Some("from-env".to_string())).unwrap();
        assert_eq!(config.proxy.port, 8080);
        assert_eq!(config.upstream.api_key().unwrap(), "from-env");
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("quoted.toml");
        std::fs::write(&file, "[upstream]\napi_key = \"k\"\n[proxy]\nport = 9090\n").unwrap();

        let config = load(Some(file.display().to_string()), None, None).unwrap();
        assert_eq!(config.proxy.port, 9090);
        assert_eq!(config.upstream.api_key().unwrap(), "k");
    }

    #[test]
    fn test_load_rejects_missing_explicit_file_and_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml").display().to_string();
        assert!(matches!(
            load(Some(missing), None, Some("k".to_string())),
            Err(ConfigError::Read { .. })
        ));

        let xdg = dir.path().display().to_string();
        assert!(matches!(
            load(None, Some(xdg), None),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_config_path_resolution() {
        assert_eq!(
            config_path(Some("/tmp/q.toml".to_string()), None),
            PathBuf::from("/tmp/q.toml")
        );
        assert_eq!(
            config_path(None, Some("/opt/xdg:/etc/xdg".to_string())),
            PathBuf::from("/opt/xdg/quoted/config.toml")
        );
        assert_eq!(
            config_path(Some(String::new()), None),
            PathBuf::from("/etc/xdg/quoted/config.toml")
        );
    }
}
