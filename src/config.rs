use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::events::Language;

/// Endpoint of the hosted reply function
pub const DEFAULT_ENDPOINT: &str =
    "https://functions.poehali.dev/da5a9482-af32-4f73-8ef3-6923bcc3f9fe";

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV: &str = "MEGACHAT_ENDPOINT";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reply service URL
    pub endpoint: String,

    /// Language the chat starts in
    pub language: Language,

    /// UI preferences
    pub ui: UiConfig,

    /// Megachat home directory
    #[serde(skip)]
    pub home: PathBuf,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_timestamps: bool,
    pub notice_duration_ms: u64,
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            notice_duration_ms: 3000,
            tick_rate_ms: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));

        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language: Language::default(),
            ui: UiConfig::default(),
            home: home.join(".megachat"),
        }
    }
}

impl Config {
    /// Load configuration from `~/.megachat/config.toml`
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        let mut config = Self::load_from(&home.join(".megachat"))?;
        config.endpoint = resolve_endpoint(None, std::env::var(ENDPOINT_ENV).ok(), config.endpoint);
        Ok(config)
    }

    /// Load configuration from a specific megachat home directory
    pub fn load_from(home: &Path) -> Result<Self> {
        fs::create_dir_all(home).context("Failed to create megachat directory")?;

        let config_path = home.join("config.toml");
        let mut config: Config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            toml::from_str(&content)
                .context("Failed to parse config file")?
        } else {
            Config::default()
        };

        config.home = home.to_path_buf();
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.home).context("Failed to create megachat directory")?;
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(self.config_path(), content)
            .context("Failed to write config file")?;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    pub fn log_path(&self) -> PathBuf {
        self.home.join("megachat.log")
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.ui.notice_duration_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(50))
    }
}

/// Pick the endpoint: command line flag, then environment, then file.
pub fn resolve_endpoint(flag: Option<String>, env: Option<String>, file: String) -> String {
    flag.filter(|s| !s.trim().is_empty())
        .or_else(|| env.filter(|s| !s.trim().is_empty()))
        .unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("megachat");

        let config = Config::load_from(&home).unwrap();

        assert!(home.is_dir());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.language, Language::Ru);
        assert_eq!(config.ui.notice_duration_ms, 3000);
        assert_eq!(config.home, home);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "language = \"en\"\n\n[ui]\nshow_timestamps = false\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();

        assert_eq!(config.language, Language::En);
        assert!(!config.ui.show_timestamps);
        assert_eq!(config.ui.tick_rate_ms, 300);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::load_from(dir.path()).unwrap();
        config.endpoint = "http://localhost:9000/chat".into();
        config.language = Language::En;
        config.save().unwrap();

        let loaded = Config::load_from(dir.path()).unwrap();
        assert_eq!(loaded.endpoint, "http://localhost:9000/chat");
        assert_eq!(loaded.language, Language::En);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "language = 5").unwrap();

        let err = Config::load_from(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn endpoint_precedence() {
        let file = "file".to_string();
        assert_eq!(resolve_endpoint(Some("flag".into()), Some("env".into()), file.clone()), "flag");
        assert_eq!(resolve_endpoint(None, Some("env".into()), file.clone()), "env");
        assert_eq!(resolve_endpoint(Some(" ".into()), None, file.clone()), "file");
    }

    #[test]
    fn tick_rate_has_a_floor() {
        let mut config = Config::default();
        config.ui.tick_rate_ms = 1;
        assert_eq!(config.tick_rate(), Duration::from_millis(50));
    }
}
