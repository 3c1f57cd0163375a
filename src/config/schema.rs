//! Configuration schema and loading.

use anyhow::{anyhow, bail, Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use crate::hours::BusinessHours;
use crate::templates::MessageCatalog;

/// Top-level intakebot configuration, loaded from `config.toml`.
///
/// Resolution order: `INTAKEBOT_CONFIG_DIR` env → `~/.intakebot/config.toml`.
/// A default file is written on first run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Attended-hours window (`[hours]`).
    #[serde(default)]
    pub hours: HoursConfig,

    /// Session housekeeping (`[session]`).
    #[serde(default)]
    pub session: SessionConfig,

    /// Outbound text overrides (`[templates]`). Any field left out keeps the
    /// shipped copy.
    #[serde(default)]
    pub templates: MessageCatalog,
}

/// Attended-hours window (`[hours]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursConfig {
    /// Opening hour, inclusive, in local time. Default: `9`.
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    /// Closing hour, exclusive, in local time. Default: `18`.
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
    /// IANA timezone the window is evaluated in. Default: `"UTC"`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_open_hour() -> u32 {
    9
}

fn default_close_hour() -> u32 {
    18
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
            timezone: default_timezone(),
        }
    }
}

impl HoursConfig {
    /// Validate and convert into the runtime predicate.
    pub fn business_hours(&self) -> Result<BusinessHours> {
        if self.close_hour > 24 {
            bail!("hours.close_hour must be at most 24, got {}", self.close_hour);
        }
        if self.open_hour >= self.close_hour {
            bail!(
                "hours.open_hour ({}) must be before hours.close_hour ({})",
                self.open_hour,
                self.close_hour
            );
        }
        let timezone: chrono_tz::Tz = self
            .timezone
            .parse()
            .map_err(|e| anyhow!("unknown timezone '{}': {e}", self.timezone))?;

        Ok(BusinessHours::new(self.open_hour, self.close_hour, timezone))
    }
}

/// Session housekeeping (`[session]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle longer than this are eligible for `purge_idle`. Unset
    /// means sessions live for the process lifetime. Nothing schedules the
    /// purge automatically.
    #[serde(default)]
    pub idle_eviction_minutes: Option<u64>,
    /// Sender id used by the interactive console channel. Default: `"local"`.
    #[serde(default = "default_console_sender")]
    pub console_sender: String,
}

fn default_console_sender() -> String {
    "local".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_eviction_minutes: None,
            console_sender: default_console_sender(),
        }
    }
}

impl Config {
    /// Resolve the config directory: `INTAKEBOT_CONFIG_DIR` (tilde-expanded)
    /// or `~/.intakebot`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("INTAKEBOT_CONFIG_DIR") {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(shellexpand::tilde(&dir).into_owned()));
            }
        }
        let user_dirs = UserDirs::new().context("could not determine home directory")?;
        Ok(user_dirs.home_dir().join(".intakebot"))
    }

    /// Load `config.toml` from the resolved directory, writing a default
    /// file first if none exists.
    pub async fn load_or_init() -> Result<Self> {
        Self::load_or_init_from(&Self::config_dir()?).await
    }

    /// Same as [`Config::load_or_init`], against an explicit directory.
    pub async fn load_or_init_from(dir: &std::path::Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
        let path = dir.join("config.toml");

        let mut config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<Self>(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            let config = Self::default();
            fs::write(&path, toml::to_string_pretty(&config)?)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            config
        };

        config.config_path = path;
        // Surface a bad window or timezone at startup, not mid-conversation.
        config
            .hours
            .business_hours()
            .context("invalid [hours] section")?;
        Ok(config)
    }

    /// Write the current configuration back to `config_path`.
    pub async fn save(&self) -> Result<()> {
        fs::write(&self.config_path, toml::to_string_pretty(self)?)
            .await
            .with_context(|| format!("failed to write {}", self.config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        let hours = config.hours.business_hours().unwrap();
        assert_eq!(hours.open_hour, 9);
        assert_eq!(hours.close_hour, 18);
        assert_eq!(config.session.console_sender, "local");
    }

    #[test]
    fn hours_config_toml_roundtrip() {
        let hours = HoursConfig {
            open_hour: 8,
            close_hour: 17,
            timezone: "America/Argentina/Buenos_Aires".to_string(),
        };
        let raw = toml::to_string(&hours).unwrap();
        let parsed: HoursConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.open_hour, 8);
        assert_eq!(parsed.timezone, hours.timezone);
        parsed.business_hours().unwrap();
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let hours = HoursConfig {
            timezone: "America/Atlantis".to_string(),
            ..HoursConfig::default()
        };
        let err = hours.business_hours().unwrap_err();
        assert!(err.to_string().contains("unknown timezone"));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let hours = HoursConfig {
            open_hour: 18,
            close_hour: 9,
            ..HoursConfig::default()
        };
        assert!(hours.business_hours().is_err());
    }

    #[test]
    fn close_hour_past_midnight_is_rejected() {
        let hours = HoursConfig {
            close_hour: 25,
            ..HoursConfig::default()
        };
        assert!(hours.business_hours().is_err());
    }

    #[test]
    fn template_overrides_parse_from_toml() {
        let raw = "[templates]\nfallback = \"¿perdón?\"\n";
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.templates.fallback, "¿perdón?");
        assert_eq!(config.templates.menu, MessageCatalog::default().menu);
    }

    #[tokio::test]
    async fn load_or_init_writes_then_reloads_the_default_file() {
        let dir = tempfile::tempdir().unwrap();

        let first = Config::load_or_init_from(dir.path()).await.unwrap();
        assert!(first.config_path.exists());

        let second = Config::load_or_init_from(dir.path()).await.unwrap();
        assert_eq!(second.hours.open_hour, first.hours.open_hour);
        assert_eq!(second.templates.menu, first.templates.menu);
    }

    #[tokio::test]
    async fn save_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_or_init_from(dir.path()).await.unwrap();

        config.hours.open_hour = 10;
        config.save().await.unwrap();

        let reloaded = Config::load_or_init_from(dir.path()).await.unwrap();
        assert_eq!(reloaded.hours.open_hour, 10);
    }

    #[tokio::test]
    async fn malformed_config_file_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.toml"), "not valid toml [")
            .await
            .unwrap();

        let err = Config::load_or_init_from(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
