//! Config command implementation

use clap::Args;
use std::path::Path;

use crate::config::{CliConfig, EndpointOverrides};

/// Show the resolved configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only print where the config file is looked up
    #[arg(long)]
    pub path: bool,
}

impl ConfigArgs {
    /// Execute the config command
    pub fn execute(&self, path: &Path, config: &CliConfig) -> anyhow::Result<i32> {
        if self.path {
            println!("{}", path.display());
        } else {
            print!("{}", render(path, config)?);
        }
        Ok(0)
    }
}

fn render(path: &Path, config: &CliConfig) -> anyhow::Result<String> {
    let endpoint = config.resolve_endpoint(&EndpointOverrides::default());
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };

    Ok(format!(
        "# {}\n{}\n# endpoint: {} ({})\n",
        source,
        toml::to_string(config)?,
        endpoint.url,
        endpoint.shape
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let out = render(&path, &CliConfig::default()).unwrap();

        assert!(out.contains("(not found, using defaults)"));
        assert!(out.contains("mode = \"proxy\""));
        assert!(out.contains("# endpoint: http://127.0.0.1:8080/api/v1/quotes (array)"));
    }

    #[test]
    fn test_render_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let out = render(file.path(), &CliConfig::default()).unwrap();

        assert!(!out.contains("not found"));
        assert!(out.starts_with(&format!("# {}", file.path().display())));
    }
}
