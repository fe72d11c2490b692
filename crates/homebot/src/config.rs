//! Configuration file parsing and structures.
//!
//! homebot reads an optional TOML file that sets the log level and the
//! building to operate on when the command line does not name one.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

use crate::model::DEFAULT_BUILDING_NAME;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "homebot.toml";

/// Top-level configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub building: BuildingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BuildingConfig {
    /// BDL file used when no `--file` is given
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Name for documents without a leading `$N(...)`
    #[serde(default = "default_building_name")]
    pub default_name: String,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            file: None,
            default_name: default_building_name(),
        }
    }
}

fn default_building_name() -> String {
    DEFAULT_BUILDING_NAME.to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().to_path_buf(), e))?;

        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Load `path` if given, else `homebot.toml` if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.building.file, None);
        assert_eq!(config.building.default_name, "house");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [logging]
            level = "debug"

            [building]
            file = "/etc/homebot/villa.bdl"
            default_name = "villa"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(
            config.building.file.as_deref(),
            Some(Path::new("/etc/homebot/villa.bdl"))
        );
        assert_eq!(config.building.default_name, "villa");
    }

    #[test]
    fn test_partial_building_section_keeps_default_name() {
        let config: Config = toml::from_str("[building]\nfile = \"home.bdl\"").unwrap();
        assert_eq!(config.building.default_name, "house");
    }

    #[test]
    fn test_invalid_log_level() {
        let err = toml::from_str::<Config>("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("loud"), "{err}");
    }

    #[test]
    fn test_log_level_to_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("homebot.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(ref p, _) if p == &path));
    }
}
