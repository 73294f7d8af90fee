use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "restaurant-relay.toml";

/// Case-sensitive; matches the variable existing `.env` files define.
pub const DEFAULT_API_KEY_ENV: &str = "Maps_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            provider: ProviderConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RelayError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Priority: explicit path > `restaurant-relay.toml` in CWD > built-in defaults.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
        if candidate.exists() {
            tracing::info!(path = %candidate.display(), "Loading config");
            return Self::load(&candidate);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Nearby Search endpoint under the configured base URL.
    pub fn nearby_search_url(&self) -> String {
        format!(
            "{}/nearbysearch/json",
            self.provider.base_url.trim_end_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    /// Resolve the provider credential from the configured environment variable.
    pub fn resolve_api_key(&self) -> Result<String> {
        Self::api_key_from(
            &self.provider.api_key_env,
            std::env::var(&self.provider.api_key_env).ok(),
        )
    }

    /// A missing or blank credential is a configuration error, never an empty key.
    pub fn api_key_from(var_name: &str, value: Option<String>) -> Result<String> {
        match value {
            Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            Some(_) => Err(RelayError::config(format!(
                "Environment variable '{var_name}' is set but empty."
            ))),
            None => Err(RelayError::config(format!(
                "Environment variable '{var_name}' not set. Set it with your Google Maps API key."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
port = 5000

[provider]
api_key_env = "PLACES_KEY"
timeout_secs = 3
"#
        )
        .unwrap();

        let config = RelayConfig::load(f.path()).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.provider.api_key_env, "PLACES_KEY");
        assert_eq!(config.provider.timeout_secs, 3);
        assert_eq!(
            config.provider.base_url,
            "https://maps.googleapis.com/maps/api/place"
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let f = NamedTempFile::new().unwrap();
        let config = RelayConfig::load(f.path()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.provider.api_key_env, "Maps_API_KEY");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_api_key_env_keeps_mixed_case_name() {
        let config = RelayConfig::default();
        assert_eq!(config.provider.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.provider.api_key_env, "Maps_API_KEY");
        assert_ne!(config.provider.api_key_env, "MAPS_API_KEY");
    }

    #[test]
    fn test_nearby_search_url_trims_trailing_slash() {
        let mut config = RelayConfig::default();
        config.provider.base_url = "http://127.0.0.1:9999/place/".to_string();
        assert_eq!(
            config.nearby_search_url(),
            "http://127.0.0.1:9999/place/nearbysearch/json"
        );
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = RelayConfig::api_key_from("Maps_API_KEY", None).unwrap_err();
        assert!(matches!(err, RelayError::Config { .. }));
        assert!(err.to_string().contains("Maps_API_KEY"));
        assert!(!err.to_string().contains("MAPS_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let err = RelayConfig::api_key_from("Maps_API_KEY", Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, RelayError::Config { .. }));
    }

    #[test]
    fn test_api_key_is_trimmed() {
        let key = RelayConfig::api_key_from("Maps_API_KEY", Some(" abc123\n".to_string())).unwrap();
        assert_eq!(key, "abc123");
    }
}
