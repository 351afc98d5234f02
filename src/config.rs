//! Configuration management with optional TOML file and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Desktop Chrome user-agent sent by both the browser and the HTTP client.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Scraper configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User-Agent header / browser UA override
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Origin used to build Amazon search and product URLs
    #[serde(default = "default_amazon_origin")]
    pub amazon_origin: String,

    /// Mercari homepage scraped for new listings
    #[serde(default = "default_mercari_origin")]
    pub mercari_origin: String,

    /// Fixed dwell after navigating to an Amazon search page
    #[serde(default = "default_amazon_render_wait_ms")]
    pub amazon_render_wait_ms: u64,

    /// Fixed dwell after navigating to the Mercari homepage
    #[serde(default = "default_mercari_render_wait_ms")]
    pub mercari_render_wait_ms: u64,

    /// Timeout for direct HTTP fetches
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Chromium binary; auto-detected when unset
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_amazon_origin() -> String {
    "https://www.amazon.co.jp".to_string()
}

fn default_mercari_origin() -> String {
    "https://jp.mercari.com".to_string()
}

fn default_amazon_render_wait_ms() -> u64 {
    3000
}

fn default_mercari_render_wait_ms() -> u64 {
    5000
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_headless() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            amazon_origin: default_amazon_origin(),
            mercari_origin: default_mercari_origin(),
            amazon_render_wait_ms: default_amazon_render_wait_ms(),
            mercari_render_wait_ms: default_mercari_render_wait_ms(),
            http_timeout_secs: default_http_timeout_secs(),
            chrome_executable: None,
            headless: default_headless(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads the explicit config file if one was given, defaults otherwise.
    ///
    /// No file is ever discovered implicitly.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match explicit_path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn amazon_render_wait(&self) -> Duration {
        Duration::from_millis(self.amazon_render_wait_ms)
    }

    pub fn mercari_render_wait(&self) -> Duration {
        Duration::from_millis(self.mercari_render_wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.amazon_origin, "https://www.amazon.co.jp");
        assert_eq!(config.mercari_origin, "https://jp.mercari.com");
        assert_eq!(config.amazon_render_wait_ms, 3000);
        assert_eq!(config.mercari_render_wait_ms, 5000);
        assert_eq!(config.http_timeout_secs, 10);
        assert!(config.chrome_executable.is_none());
        assert!(config.headless);
    }

    #[test]
    fn test_durations() {
        let config = Config::new();
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.amazon_render_wait(), Duration::from_secs(3));
        assert_eq!(config.mercari_render_wait(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_from_toml_partial() {
        let toml = r#"
            amazon_render_wait_ms = 0
            headless = false
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.amazon_render_wait_ms, 0);
        assert!(!config.headless);
        // Untouched fields keep their defaults
        assert_eq!(config.mercari_render_wait_ms, 5000);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            user_agent = "test-agent/1.0"
            amazon_origin = "http://127.0.0.1:8080"
            mercari_origin = "http://127.0.0.1:9090"
            amazon_render_wait_ms = 100
            mercari_render_wait_ms = 200
            http_timeout_secs = 2
            chrome_executable = "/usr/bin/chromium"
            headless = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.amazon_origin, "http://127.0.0.1:8080");
        assert_eq!(config.mercari_origin, "http://127.0.0.1:9090");
        assert_eq!(config.amazon_render_wait_ms, 100);
        assert_eq!(config.mercari_render_wait_ms, 200);
        assert_eq!(config.http_timeout_secs, 2);
        assert_eq!(config.chrome_executable, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http_timeout_secs = 4").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.http_timeout_secs, 4);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_no_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.amazon_origin, "https://www.amazon.co.jp");
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"mercari_origin = "http://localhost:1234""#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.mercari_origin, "http://localhost:1234");
    }
}
