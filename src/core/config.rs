//! Configuration management

use crate::catalog::{LocaleCode, Scope, DEFAULT_LOCALE, LANGUAGE_COOKIE_NAME, LANGUAGE_STORAGE_KEY};
use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data directories
pub const APP_DIR_NAME: &str = "jaws-i18n";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join(APP_DIR_NAME);

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, writing defaults if absent
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
            return Ok(config);
        }

        Self::load_from(&path)
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// [`Config::load`] for startup: configuration errors are returned, other
    /// failures (unreadable file, no config directory) fall back to defaults
    pub fn load_or_default() -> Result<Self> {
        Self::or_default(Self::load())
    }

    fn or_default(loaded: Result<Self>) -> Result<Self> {
        match loaded {
            Ok(config) => Ok(config),
            Err(e) if e.is_configuration() => Err(e),
            Err(e) => {
                log::warn!("Failed to load config, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The default locale must exist in the catalog and be selectable everywhere
    pub fn validate(&self) -> Result<()> {
        let default = self.default_locale()?;
        for scope in Scope::ALL {
            if !scope.allows(default) {
                return Err(Error::Config(format!(
                    "Default locale {} is not allowed in scope {}",
                    default, scope
                )));
            }
        }

        if self.translate.batch_size == 0 {
            return Err(Error::Config("translate.batch_size must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Parsed default locale
    pub fn default_locale(&self) -> Result<LocaleCode> {
        self.general
            .default_locale
            .parse()
            .map_err(|_| Error::Config(format!("Unknown default locale: {}", self.general.default_locale)))
    }

    /// Preference database path, explicit or under the platform data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;

        let app_dir = data_dir.join(APP_DIR_NAME);
        fs::create_dir_all(&app_dir)?;

        Ok(app_dir.join("preferences.db"))
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Locale used as the authoritative fallback document
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Directory of `<code>.json` documents; bundled documents when unset
    #[serde(default)]
    pub locales_dir: Option<PathBuf>,
}

fn default_locale() -> String { DEFAULT_LOCALE.as_str().to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales_dir: None,
        }
    }
}

/// Preference persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file; platform data directory when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Preference key the selected locale is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Cookie carrying the locale for server-side rendering
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Cookie lifetime in seconds
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age_secs: u64,
}

fn default_storage_key() -> String { LANGUAGE_STORAGE_KEY.to_string() }
fn default_cookie_name() -> String { LANGUAGE_COOKIE_NAME.to_string() }
fn default_cookie_max_age() -> u64 { 31_536_000 } // one year

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            storage_key: default_storage_key(),
            cookie_name: default_cookie_name(),
            cookie_max_age_secs: default_cookie_max_age(),
        }
    }
}

/// Machine translation sync settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Use the free API endpoint
    #[serde(default = "default_true")]
    pub api_free: bool,
    /// Max texts per API call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause between batches in milliseconds
    #[serde(default = "default_batch_delay")]
    pub batch_delay_ms: u64,
    /// API key; `DEEPL_API_KEY` takes precedence
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_true() -> bool { true }
fn default_batch_size() -> usize { 50 }
fn default_batch_delay() -> u64 { 500 }

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            api_free: true,
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay(),
            api_key: None,
        }
    }
}

impl TranslateConfig {
    /// Apply `DEEPL_API_KEY` and `DEEPL_API_FREE` from the environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("DEEPL_API_KEY") {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(free) = std::env::var("DEEPL_API_FREE") {
            self.api_free = free != "false";
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.general.default_locale, "en");
        assert_eq!(config.storage.storage_key, "jaws-language");
        assert_eq!(config.storage.cookie_max_age_secs, 31_536_000);
        assert_eq!(config.translate.batch_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[translate]\nbatch_size = 10\n").unwrap();
        assert_eq!(config.translate.batch_size, 10);
        assert_eq!(config.translate.batch_delay_ms, 500);
        assert_eq!(config.general.default_locale, "en");
    }

    #[test]
    fn test_default_locale_must_be_valid_everywhere() {
        let mut config = Config::default();
        config.general.default_locale = "fr".into();
        let err = config.validate().unwrap_err();
        assert!(err.is_configuration());

        config.general.default_locale = "xx".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.general.default_locale, "en");
        assert!(loaded.general.locales_dir.is_none());
    }

    #[test]
    fn test_or_default_keeps_configuration_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[translate]\nbatch_size = 0\n").unwrap();
        let err = Config::or_default(Config::load_from(&path)).unwrap_err();
        assert!(err.is_configuration());

        fs::write(&path, "general = 3").unwrap();
        assert!(Config::or_default(Config::load_from(&path)).is_err());

        let missing = dir.path().join("absent.toml");
        let config = Config::or_default(Config::load_from(&missing)).unwrap();
        assert_eq!(config.general.default_locale, "en");
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "general = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
