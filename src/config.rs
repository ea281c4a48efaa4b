use crate::error::{Result, SearchTravelsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TOKEN_ENV: &str = "SEARCH_TRAVELS_TOKEN";
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub token: Option<String>,
    pub endpoint: String,
    pub max_image_size: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_ENDPOINT.into(),
            max_image_size: 1024,
            timeout_seconds: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            if config.timeout_seconds == 0 {
                return Err(SearchTravelsError::Config(format!(
                    "timeout_seconds は1以上にしてください: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "設定を読み込みました");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SearchTravelsError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("search-travels").join("config.json"))
    }

    pub fn get_token(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                return Ok(token);
            }
        }

        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(SearchTravelsError::MissingToken)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.max_image_size, 1024);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            token: Some("ya29.test".into()),
            timeout_seconds: 3,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.token.as_deref(), Some("ya29.test"));
        assert_eq!(loaded.timeout_seconds, 3);
        assert_eq!(loaded.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"endpoint": "http://localhost:8080"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeout_seconds": 0}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, SearchTravelsError::Config(_)));
    }

    #[test]
    fn test_blank_stored_token_is_missing() {
        if std::env::var(TOKEN_ENV).is_ok() {
            return;
        }
        let config = Config {
            token: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(config.get_token(), Err(SearchTravelsError::MissingToken)));
    }
}
