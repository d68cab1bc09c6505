use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix put in front of every stored collection key
pub const DEFAULT_KEY_PREFIX: &str = "movieflix_";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,
    /// Optional `language` query parameter (e.g., "en-US")
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Store directory; defaults to `<data_dir>/store`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
            language: None,
        }
    }
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_youtube_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            dir: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(anyhow::anyhow!("http.timeout_secs must be greater than zero"));
        }

        if self.storage.key_prefix.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.key_prefix cannot be empty"));
        }

        for (name, url) in [
            ("tmdb.base_url", &self.tmdb.base_url),
            ("tmdb.image_base_url", &self.tmdb.image_base_url),
            ("youtube.base_url", &self.youtube.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.tmdb.language = Some("en-US".to_string());
        config.storage.key_prefix = "test_".to_string();
        config.http.timeout_secs = 3;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.tmdb.language.as_deref(), Some("en-US"));
        assert_eq!(loaded.storage.key_prefix, "test_");
        assert_eq!(loaded.http.timeout_secs, 3);
        assert_eq!(loaded.http.retry_backoff_ms, 500);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[http]\ntimeout_secs = 20\n").unwrap();
        assert_eq!(loaded.http.timeout_secs, 20);
        assert_eq!(loaded.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(loaded.storage.key_prefix, DEFAULT_KEY_PREFIX);
        assert!(loaded.youtube.enabled);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.http.timeout_secs = 5;

        config.storage.key_prefix = "  ".to_string();
        assert!(config.validate().is_err());
        config.storage.key_prefix = DEFAULT_KEY_PREFIX.to_string();

        config.tmdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }
}
