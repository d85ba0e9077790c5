use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WATCHLIST_KEY: &str = "epicscreen-watchlist";
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TmdbConfig {
    /// Overridden by the `TMDB_API_KEY` environment variable when that is set
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// Durable, one file per key under the data directory
    #[default]
    File,
    /// Process lifetime only
    Memory,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,
    #[serde(default = "default_watchlist_key")]
    pub key: String,
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

fn default_watchlist_key() -> String {
    DEFAULT_WATCHLIST_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            key: default_watchlist_key(),
            quota_bytes: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or defaults when it does not exist yet
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.tmdb.base_url.starts_with("http://") || self.tmdb.base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("tmdb.base_url must be an http(s) URL: {}", self.tmdb.base_url));
        }
        if !(self.tmdb.image_base_url.starts_with("http://") || self.tmdb.image_base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("tmdb.image_base_url must be an http(s) URL: {}", self.tmdb.image_base_url));
        }
        if self.storage.key.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.key cannot be empty"));
        }
        if self.storage.quota_bytes == Some(0) {
            return Err(anyhow::anyhow!("storage.quota_bytes must be greater than zero"));
        }
        Ok(())
    }

    /// API key from `TMDB_API_KEY`, falling back to the config file
    pub fn resolved_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(std::env::var(TMDB_API_KEY_ENV).ok())
    }

    fn resolve_api_key_with(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| Some(self.tmdb.api_key.clone()).filter(|k| !k.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            tmdb: TmdbConfig {
                api_key: "test_key".to_string(),
                ..TmdbConfig::default()
            },
            storage: StorageConfig {
                backend: StorageBackendKind::Memory,
                key: "custom-watchlist".to_string(),
                quota_bytes: Some(5 * 1024 * 1024),
            },
        };

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[tmdb]\napi_key = \"abc\"\n").unwrap();
        assert_eq!(config.tmdb.api_key, "abc");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.storage.backend, StorageBackendKind::File);
        assert_eq!(config.storage.key, DEFAULT_WATCHLIST_KEY);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tmdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.tmdb.base_url = default_base_url();
        config.storage.key = "  ".to_string();
        assert!(config.validate().is_err());

        config.storage.key = default_watchlist_key();
        config.storage.quota_bytes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_resolution() {
        let mut config = Config::default();
        assert_eq!(config.resolve_api_key_with(None), None);
        assert_eq!(config.resolve_api_key_with(Some("".to_string())), None);
        assert_eq!(config.resolve_api_key_with(Some("from_env".to_string())), Some("from_env".to_string()));

        config.tmdb.api_key = "from_file".to_string();
        assert_eq!(config.resolve_api_key_with(None), Some("from_file".to_string()));
        assert_eq!(config.resolve_api_key_with(Some("from_env".to_string())), Some("from_env".to_string()));
    }
}
