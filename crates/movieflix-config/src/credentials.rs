use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const TMDB_API_KEY: &str = "tmdb_api_key";
const YOUTUBE_API_KEY: &str = "youtube_api_key";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// API keys kept out of `config.toml`
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    /// TMDB key: `MOVIEFLIX_TMDB_API_KEY` wins over the stored value
    pub fn tmdb_api_key(&self) -> Option<String> {
        env_or_stored("MOVIEFLIX_TMDB_API_KEY", self.get(TMDB_API_KEY))
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set(TMDB_API_KEY.to_string(), key);
    }

    /// YouTube key: `MOVIEFLIX_YOUTUBE_API_KEY` wins over the stored value
    pub fn youtube_api_key(&self) -> Option<String> {
        env_or_stored("MOVIEFLIX_YOUTUBE_API_KEY", self.get(YOUTUBE_API_KEY))
    }

    pub fn set_youtube_api_key(&mut self, key: String) {
        self.set(YOUTUBE_API_KEY.to_string(), key);
    }
}

fn env_or_stored(var: &str, stored: Option<&String>) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| stored.filter(|v| !v.trim().is_empty()).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_tmdb_api_key("tmdb_key".to_string());
        store.set_youtube_api_key("yt_key".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get(TMDB_API_KEY), Some(&"tmdb_key".to_string()));
        assert_eq!(loaded_store.get(YOUTUBE_API_KEY), Some(&"yt_key".to_string()));
    }

    #[test]
    fn test_credential_store_remove() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set("key1".to_string(), "value1".to_string());
        store.set("key2".to_string(), "value2".to_string());

        assert_eq!(store.get("key1"), Some(&"value1".to_string()));
        store.remove("key1");
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.get("key2"), Some(&"value2".to_string()));
    }

    #[test]
    fn test_env_or_stored_ignores_blank_values() {
        let blank = "   ".to_string();
        assert_eq!(env_or_stored("MOVIEFLIX_TEST_UNSET_VARIABLE", Some(&blank)), None);
        let stored = "abc".to_string();
        assert_eq!(env_or_stored("MOVIEFLIX_TEST_UNSET_VARIABLE", Some(&stored)), Some("abc".to_string()));
    }
}
