use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};
use tracing::warn;

use crate::ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_SPLASH_MS: u64 = 2000;

/// Optional on-disk settings, `<config_dir>/prizzy/config.json`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub splash_ms: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Missing file means defaults; a file that fails to parse is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("prizzy").join("config.json"))
    }
}

/// Effective settings after merging environment and config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub splash: Duration,
}

impl Settings {
    /// Resolve from the process environment and the user's config file.
    ///
    /// Never fails: an unreadable config is logged and skipped.
    pub fn load() -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("Ignoring config file: {:#}", e);
            Config::default()
        });
        Self::resolve(&config, |name| std::env::var(name).ok())
    }

    /// Environment wins over the config file; blank values count as unset.
    pub fn resolve(config: &Config, env: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let api_key = non_blank(env("GEMINI_API_KEY"))
            .or_else(|| non_blank(env("API_KEY")))
            .or_else(|| non_blank(config.api_key.clone()));

        let model = non_blank(env("PRIZZY_MODEL"))
            .or_else(|| non_blank(config.model.clone()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = non_blank(config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let splash = Duration::from_millis(config.splash_ms.unwrap_or(DEFAULT_SPLASH_MS));

        Self { api_key, model, base_url, splash }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parses_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"model": "gemini-2.0-flash", "splash_ms": 0}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(config.splash_ms, Some(0));
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_defaults_without_any_source() {
        let settings = Settings::resolve(&Config::default(), env_of(&[]));
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.splash, Duration::from_millis(DEFAULT_SPLASH_MS));
    }

    #[test]
    fn test_env_overrides_config() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            model: Some("file-model".to_string()),
            ..Default::default()
        };

        let settings = Settings::resolve(
            &config,
            env_of(&[("GEMINI_API_KEY", "from-env"), ("PRIZZY_MODEL", "env-model")]),
        );
        assert_eq!(settings.api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.model, "env-model");

        let settings = Settings::resolve(&config, env_of(&[("API_KEY", "legacy")]));
        assert_eq!(settings.api_key.as_deref(), Some("legacy"));

        let settings = Settings::resolve(&config, env_of(&[("GEMINI_API_KEY", "  ")]));
        assert_eq!(settings.api_key.as_deref(), Some("from-file"));
        assert_eq!(settings.model, "file-model");
    }
}
