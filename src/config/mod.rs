//! Configuration loading and resolution.
//!
//! Settings resolve through the precedence chain
//! defaults → config file → environment variables → CLI arguments.
//! Each stage is a pure function over the previous stage's result so the
//! chain is testable without touching the filesystem.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the collapsed payload height.
const ENV_COLLAPSE_HEIGHT: &str = "SCANVIEW_COLLAPSE_HEIGHT";

/// Environment variable overriding the log file path.
const ENV_LOG_FILE: &str = "SCANVIEW_LOG_FILE";

/// Errors from reading or parsing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The explicitly requested config file could not be read.
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`ConfigFile`].
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },
}

/// Raw, partial configuration as written in the TOML file.
///
/// Every field is optional; unset fields fall through to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    /// Payload lines shown while a row is collapsed.
    pub collapse_height: Option<u16>,
    /// Where tracing output is written.
    pub log_file_path: Option<PathBuf>,
}

/// Fully resolved configuration after the precedence chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Payload lines shown while a row is collapsed.
    pub collapse_height: u16,
    /// Where tracing output is written.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            collapse_height: 8,
            log_file_path: default_log_path(),
        }
    }
}

/// Default log location: `<state dir>/scanview/scanview.log`, falling back
/// to the system temp directory when no state/data dir is known.
fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("scanview")
        .join("scanview.log")
}

/// Default config file location: `<config dir>/scanview/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("scanview").join("config.toml"))
}

/// Load the config file.
///
/// With an explicit path, failure to read or parse is an error. Without
/// one, a missing default file is fine (`Ok(None)`), but a present-but-
/// malformed default file is still reported.
pub fn load_config_with_precedence(
    explicit: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match explicit {
        Some(path) => Ok(Some(read_config_file(&path)?)),
        None => match default_config_path() {
            Some(path) if path.exists() => Ok(Some(read_config_file(&path)?)),
            _ => Ok(None),
        },
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge the (possibly absent) config file over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();
    if let Some(file) = file {
        if let Some(height) = file.collapse_height {
            resolved.collapse_height = height;
        }
        if let Some(path) = file.log_file_path {
            resolved.log_file_path = path;
        }
    }
    resolved
}

/// Apply environment variable overrides.
///
/// Unparseable values are ignored rather than fatal; a typo in the
/// environment should not block the viewer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(ENV_COLLAPSE_HEIGHT) {
        if let Ok(height) = raw.parse() {
            config.collapse_height = height;
        }
    }
    if let Ok(raw) = std::env::var(ENV_LOG_FILE) {
        if !raw.is_empty() {
            config.log_file_path = PathBuf::from(raw);
        }
    }
    config
}

/// Apply CLI argument overrides (the final stage of the chain).
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    collapse_height: Option<u16>,
) -> ResolvedConfig {
    if let Some(height) = collapse_height {
        config.collapse_height = height;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ResolvedConfig::default();
        assert!(config.collapse_height > 0);
        assert!(config.log_file_path.ends_with("scanview/scanview.log"));
    }

    #[test]
    fn merge_with_no_file_keeps_defaults() {
        assert_eq!(merge_config(None), ResolvedConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = ConfigFile {
            collapse_height: Some(3),
            log_file_path: Some(PathBuf::from("/tmp/sv.log")),
        };
        let resolved = merge_config(Some(file));
        assert_eq!(resolved.collapse_height, 3);
        assert_eq!(resolved.log_file_path, PathBuf::from("/tmp/sv.log"));
    }

    #[test]
    fn partial_file_only_overrides_set_fields() {
        let file = ConfigFile {
            collapse_height: Some(5),
            log_file_path: None,
        };
        let resolved = merge_config(Some(file));
        assert_eq!(resolved.collapse_height, 5);
        assert_eq!(
            resolved.log_file_path,
            ResolvedConfig::default().log_file_path
        );
    }

    #[test]
    fn cli_override_beats_file_value() {
        let file = ConfigFile {
            collapse_height: Some(3),
            log_file_path: None,
        };
        let resolved = apply_cli_overrides(merge_config(Some(file)), Some(12));
        assert_eq!(resolved.collapse_height, 12);
    }

    #[test]
    fn cli_none_leaves_value_untouched() {
        let resolved = apply_cli_overrides(ResolvedConfig::default(), None);
        assert_eq!(resolved, ResolvedConfig::default());
    }

    #[test]
    fn config_file_parses_from_toml() {
        let file: ConfigFile = toml::from_str(
            "collapse_height = 4\nlog_file_path = \"/var/log/scanview.log\"\n",
        )
        .unwrap();
        assert_eq!(file.collapse_height, Some(4));
        assert_eq!(file.log_file_path, Some(PathBuf::from("/var/log/scanview.log")));
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let missing = std::env::temp_dir().join("scanview_missing_config.toml");
        let result = load_config_with_precedence(Some(missing));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn explicit_malformed_config_file_is_an_error() {
        let path = std::env::temp_dir().join("scanview_malformed_config.toml");
        std::fs::write(&path, "collapse_height = \"not a number\"").unwrap();
        let result = load_config_with_precedence(Some(path.clone()));
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn explicit_config_file_round_trips() {
        let path = std::env::temp_dir().join("scanview_valid_config.toml");
        std::fs::write(&path, "collapse_height = 6\n").unwrap();
        let result = load_config_with_precedence(Some(path.clone())).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(result.unwrap().collapse_height, Some(6));
    }
}
