//! Configuration management for checkdesk.
//!
//! A kiosk deploys as a self-contained working directory, so every default
//! path is relative to it: the roster, the check-in database, and the photo
//! directory all sit next to the binary's invocation point. Configuration is
//! loaded with figment from defaults, an optional TOML file, and environment
//! variables.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "checkdesk.toml";

/// Default roster file name.
const ROSTER_FILE_NAME: &str = "participantes.csv";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "checkin_log.db";

/// Default photo directory name.
const PHOTO_DIR_NAME: &str = "fotos";

/// Default cooldown after a successful display, in seconds.
pub const DEFAULT_COOLDOWN_SECS: u64 = 7;

/// Application configuration.
///
/// Loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CHECKDESK_`, sections split
///    with `__`, e.g. `CHECKDESK_KIOSK__COOLDOWN_SECS`)
/// 2. TOML config file at `./checkdesk.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Roster configuration.
    pub roster: RosterConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Kiosk behavior configuration.
    pub kiosk: KioskConfig,
}

/// Roster-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Path to the roster CSV file.
    /// Defaults to `./participantes.csv`.
    pub path: Option<PathBuf>,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the check-in database file.
    /// Defaults to `./checkin_log.db`.
    pub database_path: Option<PathBuf>,
}

/// Kiosk behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// Seconds a successful check-in stays on screen before a submission
    /// clears it. Submissions inside this window are ignored.
    pub cooldown_secs: u64,
    /// Directory holding participant photos.
    /// Defaults to `./fotos`.
    pub photo_dir: Option<PathBuf>,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            photo_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("CHECKDESK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path (working-directory relative).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.kiosk.cooldown_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "kiosk.cooldown_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get the roster path, resolving defaults if not set.
    #[must_use]
    pub fn roster_path(&self) -> PathBuf {
        self.roster
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(ROSTER_FILE_NAME))
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    /// Get the photo directory, resolving defaults if not set.
    #[must_use]
    pub fn photo_dir(&self) -> PathBuf {
        self.kiosk
            .photo_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(PHOTO_DIR_NAME))
    }

    /// Get the cooldown as a Duration.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.kiosk.cooldown_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.roster.path.is_none());
        assert!(config.storage.database_path.is_none());
        assert!(config.kiosk.photo_dir.is_none());
        assert_eq!(config.kiosk.cooldown_secs, DEFAULT_COOLDOWN_SECS);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_cooldown() {
        let mut config = Config::default();
        config.kiosk.cooldown_secs = 0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cooldown_secs"));
    }

    #[test]
    fn test_roster_path_default() {
        let config = Config::default();
        assert_eq!(config.roster_path(), PathBuf::from("participantes.csv"));
    }

    #[test]
    fn test_roster_path_custom() {
        let mut config = Config::default();
        config.roster.path = Some(PathBuf::from("/data/roster.csv"));
        assert_eq!(config.roster_path(), PathBuf::from("/data/roster.csv"));
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        assert_eq!(config.database_path(), PathBuf::from("checkin_log.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/data/log.db"));
        assert_eq!(config.database_path(), PathBuf::from("/data/log.db"));
    }

    #[test]
    fn test_photo_dir_default() {
        let config = Config::default();
        assert_eq!(config.photo_dir(), PathBuf::from("fotos"));
    }

    #[test]
    fn test_cooldown_duration() {
        let config = Config::default();
        assert_eq!(config.cooldown(), Duration::from_secs(7));
    }

    #[test]
    fn test_default_config_path() {
        assert_eq!(
            Config::default_config_path(),
            PathBuf::from("checkdesk.toml")
        );
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults).
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/checkdesk.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "checkdesk_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[kiosk]\ncooldown_secs = 10\n\n[roster]\npath = \"listado.csv\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.kiosk.cooldown_secs, 10);
        assert_eq!(config.roster_path(), PathBuf::from("listado.csv"));
        // Untouched sections keep their defaults.
        assert_eq!(config.database_path(), PathBuf::from("checkin_log.db"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_rejects_zero_cooldown() {
        let path = std::env::temp_dir().join(format!(
            "checkdesk_config_zero_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[kiosk]\ncooldown_secs = 0\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        assert!(result.is_err());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("cooldown_secs"));
        assert!(json.contains("database_path"));
    }

    #[test]
    fn test_config_clone_and_eq() {
        let config = Config::default();
        assert_eq!(config, config.clone());
    }
}
