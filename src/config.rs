use std::path::{Path, PathBuf};

use serde::Deserialize;
use tabula_data::project_dirs;
use tabula_list::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
use thiserror::Error;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_LOG_FILE: &str = "tabula.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub list: ListConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Directory of `<sector>.json` files; the bundled datasets are used
    /// when unset
    pub dir: Option<PathBuf>,
    /// Simulated fetch delay for the bundled datasets
    pub latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub level: String,
    /// Log file; defaults to `tabula.log` in the data directory
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Path of the config file in the platform config directory
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        match project_dirs() {
            Ok(dirs) => Some(dirs.config_dir().join(CONFIG_FILE)),
            Err(e) => {
                warn!(error = %e, "no config directory, using defaults");
                None
            }
        }
    }

    /// Loads `path`, falling back to the defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed,
    /// or when it holds unusable values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self =
            toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.list.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "list.page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.list.page_size_options.contains(&0) {
            return Err(ConfigError::Invalid {
                field: "list.page_size_options",
                reason: "entries must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Where the log goes: the configured file or `tabula.log` under the
    /// data directory
    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging.file.clone().or_else(|| {
            project_dirs()
                .ok()
                .map(|dirs| dirs.data_dir().join(DEFAULT_LOG_FILE))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.list.page_size_options, [10, 25, 50, 100]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let (_dir, path) = write(
            r#"
            [list]
            page_size = 25

            [data]
            dir = "/srv/tabula"
            "#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.list.page_size, 25);
        assert_eq!(config.list.page_size_options, [10, 25, 50, 100]);
        assert_eq!(config.data.dir, Some(PathBuf::from("/srv/tabula")));
        assert_eq!(config.data.latency_ms, 0);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_files_are_errors() {
        let (_dir, path) = write("[list]\npage_size = \"ten\"\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));

        let (_dir, path) = write("[lists]\npage_size = 10\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));

        let (_dir, path) = write("[list]\npage_size = 0\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Invalid { field: "list.page_size", .. })
        ));
    }

    #[test]
    fn test_configured_log_file_wins() {
        let mut config = Config::default();
        config.logging.file = Some(PathBuf::from("/tmp/t.log"));
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/t.log")));
    }
}
