//! Optional user configuration. Everything has a default, so a missing file is
//! fine; only a file that exists but cannot be read or parsed is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::store::DEFAULT_AUTHOR_SEPARATOR;

/// Environment variable that overrides `log_level` from the file.
pub const LOG_ENV_VAR: &str = "RECORD_SHOP_LOG";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "record-shop-manager.log";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Raw shape of `config.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub author_separator: Option<String>,
}

impl FileConfig {
    /// Read `path`, returning `None` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Settings the application actually runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `EnvFilter` directive, e.g. `info` or `record_shop_manager=debug`.
    pub log_level: String,
    /// Where tracing output goes. `None` disables logging entirely.
    pub log_file: Option<PathBuf>,
    /// Joins author names in the records table.
    pub author_separator: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
            author_separator: DEFAULT_AUTHOR_SEPARATOR.to_string(),
        }
    }
}

impl AppConfig {
    /// Locate and load the config file from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("", "", "record-shop-manager");
        let file = match &dirs {
            Some(dirs) => FileConfig::load(&dirs.config_dir().join(CONFIG_FILE_NAME))?,
            None => None,
        };
        let default_log_file = dirs.map(|dirs| dirs.data_dir().join(LOG_FILE_NAME));
        let env_level = std::env::var(LOG_ENV_VAR).ok();
        Ok(Self::resolve(file, default_log_file, env_level))
    }

    /// Merge file values over defaults. The environment wins over the file for
    /// the log level.
    pub fn resolve(
        file: Option<FileConfig>,
        default_log_file: Option<PathBuf>,
        env_level: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let log_level = env_level
            .filter(|level| !level.trim().is_empty())
            .or(file.log_level)
            .unwrap_or(defaults.log_level);

        Self {
            log_level,
            log_file: file.log_file.or(default_log_file),
            author_separator: file
                .author_separator
                .unwrap_or(defaults.author_separator),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = FileConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn parses_all_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\nlog_file = \"/tmp/shop.log\"\nauthor_separator = \" & \""
        )
        .unwrap();

        let loaded = FileConfig::load(file.path()).unwrap().unwrap();
        assert_eq!(loaded.log_level.as_deref(), Some("debug"));
        assert_eq!(loaded.log_file, Some(PathBuf::from("/tmp/shop.log")));
        assert_eq!(loaded.author_separator.as_deref(), Some(" & "));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = [").unwrap();

        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn defaults_apply_without_file() {
        let config = AppConfig::resolve(None, Some(PathBuf::from("/data/shop.log")), None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, Some(PathBuf::from("/data/shop.log")));
        assert_eq!(config.author_separator, ", ");
    }

    #[test]
    fn env_level_overrides_file() {
        let file = FileConfig {
            log_level: Some("warn".to_string()),
            log_file: Some(PathBuf::from("/custom.log")),
            author_separator: None,
        };
        let config = AppConfig::resolve(Some(file), None, Some("trace".to_string()));
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.log_file, Some(PathBuf::from("/custom.log")));
    }

    #[test]
    fn blank_env_level_is_ignored() {
        let file = FileConfig {
            log_level: Some("warn".to_string()),
            ..FileConfig::default()
        };
        let config = AppConfig::resolve(Some(file), None, Some("  ".to_string()));
        assert_eq!(config.log_level, "warn");
    }
}
