use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Value shipped in example configs; treated the same as a missing key
pub const PLACEHOLDER_API_KEY: &str = "your_tmdb_api_key_here";

/// Environment variable that overrides `tmdb.api_key`
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub mock_server: MockServerConfig,
    #[serde(default)]
    pub home: HomeConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MockServerConfig {
    #[serde(default = "default_mock_base_url")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HomeConfig {
    #[serde(default = "default_spotlight_languages")]
    pub spotlight_languages: Vec<String>,
    #[serde(default = "default_spotlight_min_votes")]
    pub spotlight_min_votes: u32,
    #[serde(default = "default_max_new_notifications")]
    pub max_new_notifications: usize,
    #[serde(default = "default_seen_ids_capacity")]
    pub seen_ids_capacity: usize,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_mock_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_spotlight_languages() -> Vec<String> {
    ["te", "ta", "ml", "hi"].iter().map(|s| s.to_string()).collect()
}

fn default_spotlight_min_votes() -> u32 {
    50
}

fn default_max_new_notifications() -> usize {
    5
}

fn default_seen_ids_capacity() -> usize {
    100
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_mock_base_url(),
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            spotlight_languages: default_spotlight_languages(),
            spotlight_min_votes: default_spotlight_min_votes(),
            max_new_notifications: default_max_new_notifications(),
            seen_ids_capacity: default_seen_ids_capacity(),
        }
    }
}

/// Prefer a non-empty environment value over the configured key
fn pick_api_key(env_value: Option<String>, configured: Option<&String>) -> Option<String> {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.cloned())
}

/// True when the key is usable: present, non-empty and not the placeholder
pub fn is_usable_api_key(key: Option<&str>) -> bool {
    match key {
        Some(k) => {
            let k = k.trim();
            !k.is_empty() && k != PLACEHOLDER_API_KEY
        }
        None => false,
    }
}

impl TmdbConfig {
    /// API key after applying the environment override
    pub fn effective_api_key(&self) -> Option<String> {
        pick_api_key(std::env::var(TMDB_API_KEY_ENV).ok(), self.api_key.as_ref())
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
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
        if self.tmdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.base_url cannot be empty"));
        }
        if self.tmdb.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("tmdb.timeout_seconds must be greater than zero"));
        }
        if self.mock_server.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("mock_server.base_url cannot be empty"));
        }
        if self.home.spotlight_languages.iter().any(|l| l.trim().is_empty()) {
            return Err(anyhow::anyhow!("home.spotlight_languages contains an empty language code"));
        }
        if self.home.seen_ids_capacity == 0 {
            return Err(anyhow::anyhow!("home.seen_ids_capacity must be greater than zero"));
        }
        Ok(())
    }

    pub fn is_tmdb_configured(&self) -> bool {
        is_usable_api_key(self.tmdb.effective_api_key().as_deref())
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
        config.tmdb.api_key = Some("test_key".to_string());
        config.tmdb.language = "fr-FR".to_string();
        config.home.spotlight_languages = vec!["ko".to_string()];

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.tmdb.api_key.as_deref(), Some("test_key"));
        assert_eq!(loaded.tmdb.language, "fr-FR");
        assert_eq!(loaded.home.spotlight_languages, vec!["ko".to_string()]);
        assert_eq!(loaded.mock_server.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[tmdb]\napi_key = \"abc\"\n").unwrap();
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.timeout_seconds, 30);
        assert_eq!(config.home.spotlight_languages, vec!["te", "ta", "ml", "hi"]);
        assert_eq!(config.home.spotlight_min_votes, 50);
        assert_eq!(config.home.max_new_notifications, 5);
        assert_eq!(config.home.seen_ids_capacity, 100);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert!(config.tmdb.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.tmdb.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.home.seen_ids_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.home.spotlight_languages = vec!["te".to_string(), " ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_usability() {
        assert!(!is_usable_api_key(None));
        assert!(!is_usable_api_key(Some("")));
        assert!(!is_usable_api_key(Some(PLACEHOLDER_API_KEY)));
        assert!(is_usable_api_key(Some("0123abcd")));
    }

    #[test]
    fn test_env_key_overrides_configured() {
        let configured = "from_file".to_string();
        assert_eq!(pick_api_key(Some("from_env".to_string()), Some(&configured)).as_deref(), Some("from_env"));
        assert_eq!(pick_api_key(Some("  ".to_string()), Some(&configured)).as_deref(), Some("from_file"));
        assert_eq!(pick_api_key(None, None), None);
    }
}
