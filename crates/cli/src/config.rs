use anyhow::Context;
use etcetera::{choose_app_strategy, AppStrategy, AppStrategyArgs};
use once_cell::sync::Lazy;
use quote_store::{DeploymentMode, QuoteEndpoint, ResponseShape};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Base URL used when neither the config file nor a flag gives one
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Application strategy configuration for determining config directory paths
pub static QUOTE_APP_STRATEGY: Lazy<AppStrategyArgs> = Lazy::new(|| AppStrategyArgs {
    top_level_domain: "org".to_string(),
    author: "quote".to_string(),
    app_name: "quote".to_string(),
});

/// Contents of `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Root the mode's path is appended to
    pub base_url: String,
    /// Deployment mode selecting path and body shape
    pub mode: DeploymentMode,
    /// Full endpoint URL, bypassing `base_url` and the mode path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Body shape, overriding the mode's
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ResponseShape>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: DeploymentMode::default(),
            url: None,
            shape: None,
        }
    }
}

/// Command-line overrides, all optional
#[derive(Debug, Clone, Default)]
pub struct EndpointOverrides {
    /// `--mode`
    pub mode: Option<DeploymentMode>,
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--url`
    pub url: Option<String>,
    /// `--shape`
    pub shape: Option<ResponseShape>,
}

impl CliConfig {
    /// Load the config at `path`; a missing file means defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Combine file settings with command-line overrides.
    ///
    /// Flags win over the file. A URL (flag, or file when no `--base-url`)
    /// wins over base URL plus mode path. An explicit shape always wins over
    /// the mode's shape.
    pub fn resolve_endpoint(&self, overrides: &EndpointOverrides) -> QuoteEndpoint {
        let mode = overrides.mode.unwrap_or(self.mode);
        let shape = overrides.shape.or(self.shape);

        let url = match (&overrides.url, &overrides.base_url) {
            (Some(url), _) => Some(url.clone()),
            (None, Some(_)) => None,
            (None, None) => self.url.clone(),
        };

        let endpoint = match url {
            Some(url) => QuoteEndpoint::new(url, mode.response_shape()),
            None => {
                let base_url = overrides.base_url.as_deref().unwrap_or(&self.base_url);
                QuoteEndpoint::for_mode(base_url, mode)
            }
        };

        match shape {
            Some(shape) => QuoteEndpoint { shape, ..endpoint },
            None => endpoint,
        }
    }
}

/// `config.toml` inside the per-user config directory
pub fn config_file_path() -> anyhow::Result<PathBuf> {
    let strategy = choose_app_strategy(QUOTE_APP_STRATEGY.clone())
        .context("HOME environment variable not set")?;
    Ok(strategy.in_config_dir("config.toml"))
}
