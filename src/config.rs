use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::version::error::VersionError;

// =============================================================================
// Runtime descriptor constants
// =============================================================================

/// Line prefix holding the runtime version in a JVM `release` file
pub const RELEASE_VERSION_KEY: &str = "JAVA_VERSION=";

/// Default pattern for runtime versions: `major[.minor[.patch[_update]]]`
pub const DEFAULT_JAVA_VERSION_REGEX: &str = r"(\d+)(?:\.(\d+)(?:\.(\d+)(_\d+)?)?)?";

/// Name of the marker file recording an installed version
pub const VERSION_FILE_NAME: &str = "version.txt";

/// Name of the release descriptor at the root of a bundled runtime
pub const RELEASE_FILE_NAME: &str = "release";

/// Launcher build descriptor, looked up under a runtime's `conf/` directory
pub const LAUNCHER_VERSION_FILE_NAME: &str = "launcherVersion.properties";

/// Property holding the launcher build in [`LAUNCHER_VERSION_FILE_NAME`]
pub const LAUNCHER_VERSION_PROPERTY: &str = "launcherVersion";

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Codec configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecConfig {
    /// Pattern used to encode runtime versions
    pub java_version_regex: String,
    /// Line prefix looked up in release files
    pub release_key: String,
    /// Default log level when `RUST_LOG` is not set
    pub log_level: String,
    /// Log to this file instead of stderr
    pub log_file: Option<PathBuf>,
    /// Emit newline-delimited JSON log lines
    pub log_json: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            java_version_regex: DEFAULT_JAVA_VERSION_REGEX.to_string(),
            release_key: RELEASE_VERSION_KEY.to_string(),
            log_level: "info".to_string(),
            log_file: None,
            log_json: false,
        }
    }
}

impl CodecConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| VersionError::io(path, e))?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the data directory config if it exists,
    /// otherwise defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Returns the path to the data directory for runtime-version.
/// Uses $XDG_DATA_HOME/runtime-version if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/runtime-version,
/// or ./runtime-version if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    data_dir().join(CONFIG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("runtime-version")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn codec_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_str::<CodecConfig>(r#"{ "logLevel": "debug" }"#).unwrap();

        assert_eq!(result.log_level, "debug");
        assert_eq!(result.java_version_regex, DEFAULT_JAVA_VERSION_REGEX);
        assert_eq!(result.release_key, RELEASE_VERSION_KEY);
        assert_eq!(result.log_file, None);
        assert!(!result.log_json);
    }

    #[test]
    fn codec_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_str::<CodecConfig>(
            r#"{
                "javaVersionRegex": "(\\d+)\\.(\\d+)",
                "releaseKey": "RUNTIME_VERSION=",
                "logLevel": "warn",
                "logFile": "/tmp/runtime-version.log",
                "logJson": true
            }"#,
        )
        .unwrap();

        assert_eq!(
            result,
            CodecConfig {
                java_version_regex: r"(\d+)\.(\d+)".to_string(),
                release_key: "RUNTIME_VERSION=".to_string(),
                log_level: "warn".to_string(),
                log_file: Some(PathBuf::from("/tmp/runtime-version.log")),
                log_json: true,
            }
        );
    }

    #[test]
    fn codec_config_load_reads_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "releaseKey": "X=" }"#).unwrap();

        let config = CodecConfig::load(Some(&path)).unwrap();

        assert_eq!(config.release_key, "X=");
    }

    #[test]
    fn codec_config_load_fails_on_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();

        assert!(CodecConfig::load(Some(&temp_dir.path().join("absent.json"))).is_err());
    }

    #[test]
    fn codec_config_load_fails_on_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(CodecConfig::from_file(&path).is_err());
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/runtime-version"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/runtime-version"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./runtime-version"));
    }
}
