//! Producer configuration.
//!
//! Loaded from a TOML file with an `[api]` table:
//!
//! ```toml
//! [api]
//! api_key = "sk-or-..."
//! site_url = "https://example.com"
//! app_name = "slidegen"
//! ```

use serde::{Deserialize, Serialize};
use slidegen_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "slidegen.toml";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Default OpenRouter API base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for the OpenRouter producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// Bearer token for the API.
    #[serde(default)]
    pub api_key: String,

    /// Sent as `HTTP-Referer`.
    #[serde(default)]
    pub site_url: String,

    /// Sent as `X-Title`.
    #[serde(default)]
    pub app_name: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            site_url: String::new(),
            app_name: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProducerConfig {
    /// Replace the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Replace the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Check that the settings needed for a request are present.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key is not set".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(Error::Config("model is not set".to_string()));
        }
        Ok(())
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Layout of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ProducerConfig,
}

/// Parse config file contents.
pub fn parse_config(raw: &str) -> Result<ProducerConfig> {
    let file: ConfigFile =
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))?;
    Ok(file.api)
}

/// Load the producer configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProducerConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    let config = parse_config(&raw)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// `slidegen.toml` next to the executable, or in the current directory
/// when there is none beside the executable.
pub fn default_config_path() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)));

    match beside_exe {
        Some(path) if path.exists() => path,
        _ => PathBuf::from(CONFIG_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            [api]
            api_key = "sk-or-test"
            site_url = "https://example.com"
            app_name = "AI PPT"
            model = "anthropic/claude-3-haiku"
            base_url = "http://localhost:8080/v1"
            timeout_secs = 30
        "#;
        let config = parse_config(raw).unwrap();
        assert_eq!(config.api_key, "sk-or-test");
        assert_eq!(config.site_url, "https://example.com");
        assert_eq!(config.app_name, "AI PPT");
        assert_eq!(config.model, "anthropic/claude-3-haiku");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_parse_defaults() {
        let config = parse_config("[api]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.site_url, "");

        assert_eq!(parse_config("").unwrap(), ProducerConfig::default());
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_config("[api]\ntimeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate() {
        assert!(ProducerConfig::default().validate().is_err());
        assert!(ProducerConfig::default().with_api_key("k").validate().is_ok());
        assert!(ProducerConfig::default()
            .with_api_key("k")
            .with_model(" ")
            .validate()
            .is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/slidegen.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
