//! Settings loading for the results viewer
//!
//! Each setting is resolved independently, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable (a `.env` file is loaded into the environment first)
//! 3. TOML config file
//! 4. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default display name shown in page titles
pub const DEFAULT_PROJECT_NAME: &str = "Llama.cpp Stress Test";
/// Default results root (container layout of the stress-test producer)
pub const DEFAULT_RESULT_DIR: &str = "/app/results";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

pub const ENV_PROJECT_NAME: &str = "PROJECT_NAME";
pub const ENV_RESULT_DIR: &str = "RESULT_DIR";
pub const ENV_HOST: &str = "STRESS_UI_HOST";
pub const ENV_PORT: &str = "STRESS_UI_PORT";

/// Fully resolved service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Display name used in HTML page titles and headings
    pub project_name: String,
    /// Root directory holding one subdirectory per run
    pub result_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            result_dir: PathBuf::from(DEFAULT_RESULT_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Merge one override layer over the TOML file and the compiled defaults
    ///
    /// `overrides` is usually `cli.or(SettingsOverrides::from_env())`.
    pub fn resolve(overrides: SettingsOverrides, file: TomlConfig) -> Self {
        let defaults = Settings::default();

        Self {
            project_name: overrides
                .project_name
                .or(file.project_name)
                .unwrap_or(defaults.project_name),
            result_dir: overrides
                .result_dir
                .or(file.result_dir)
                .unwrap_or(defaults.result_dir),
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
        }
    }

    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Optional per-field values from the command line or the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub project_name: Option<String>,
    pub result_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl SettingsOverrides {
    /// Read overrides from process environment variables
    ///
    /// Empty values are ignored. An unparseable port is logged and ignored.
    pub fn from_env() -> Self {
        let port = non_empty_env(ENV_PORT).and_then(|raw| match raw.parse::<u16>() {
            Ok(port) => Some(port),
            Err(e) => {
                warn!("Ignoring {}={:?}: {}", ENV_PORT, raw, e);
                None
            }
        });

        Self {
            project_name: non_empty_env(ENV_PROJECT_NAME),
            result_dir: non_empty_env(ENV_RESULT_DIR).map(PathBuf::from),
            host: non_empty_env(ENV_HOST),
            port,
        }
    }

    /// Field-wise fallback: values in `self` win, gaps are filled from `lower`
    pub fn or(self, lower: SettingsOverrides) -> Self {
        Self {
            project_name: self.project_name.or(lower.project_name),
            result_dir: self.result_dir.or(lower.result_dir),
            host: self.host.or(lower.host),
            port: self.port.or(lower.port),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Settings file contents; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TomlConfig {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub result_dir: Option<PathBuf>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Parse a TOML settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load the settings file, degrading to an empty config on any problem
    ///
    /// `explicit` is a path given on the command line; otherwise the
    /// platform config directory is searched. A missing file is normal.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => {
                debug!("No config directory on this platform; using defaults");
                return Self::default();
            }
        };

        if !path.exists() {
            if explicit.is_some() {
                warn!("Config file not found: {} (using defaults)", path.display());
            } else {
                debug!("No config file at {}", path.display());
            }
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file ({}); using defaults", e);
                Self::default()
            }
        }
    }
}

/// Default settings file location: `<config dir>/stress-ui/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stress-ui").join("config.toml"))
}

/// Load a `.env` file into the process environment
///
/// With no explicit path the working directory and its parents are searched.
/// Variables already present in the environment are never overwritten.
/// Returns the file that was loaded, if any.
pub fn load_dotenv(explicit: Option<&Path>) -> Option<PathBuf> {
    let loaded = match explicit {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => {
            info!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => {
            if let Some(path) = explicit {
                warn!(".env file not found: {}", path.display());
            }
            None
        }
        Err(e) => {
            warn!("Failed to load .env file: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_nothing_uses_defaults() {
        let settings = Settings::resolve(SettingsOverrides::default(), TomlConfig::default());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.project_name, "Llama.cpp Stress Test");
        assert_eq!(settings.result_dir, PathBuf::from("/app/results"));
    }

    #[test]
    fn test_resolve_is_per_field() {
        let overrides = SettingsOverrides {
            port: Some(9000),
            ..Default::default()
        };
        let file = TomlConfig {
            port: Some(7000),
            result_dir: Some(PathBuf::from("/data/results")),
            ..Default::default()
        };

        let settings = Settings::resolve(overrides, file);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.result_dir, PathBuf::from("/data/results"));
        assert_eq!(settings.host, DEFAULT_HOST);
    }

    #[test]
    fn test_overrides_or_prefers_self() {
        let cli = SettingsOverrides {
            project_name: Some("cli".to_string()),
            ..Default::default()
        };
        let env = SettingsOverrides {
            project_name: Some("env".to_string()),
            host: Some("0.0.0.0".to_string()),
            ..Default::default()
        };

        let merged = cli.or(env);
        assert_eq!(merged.project_name.as_deref(), Some("cli"));
        assert_eq!(merged.host.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    fn test_toml_partial_keys() {
        let config = TomlConfig::from_toml_str("result_dir = \"/srv/results\"\n").unwrap();
        assert_eq!(config.result_dir, Some(PathBuf::from("/srv/results")));
        assert!(config.project_name.is_none());
        assert!(config.port.is_none());
    }

    #[test]
    fn test_toml_bad_port_type_is_config_error() {
        let err = TomlConfig::from_toml_str("port = \"eighty\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bind_address() {
        let settings = Settings::default();
        assert_eq!(settings.bind_address(), "127.0.0.1:8000");
    }
}
