//! Settings resolution tests
//!
//! Covers the priority order (command line > environment > TOML file >
//! defaults), `.env` loading, and graceful handling of missing or broken
//! config files.
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Every test that reads or writes the settings variables is #[serial].

use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use stress_common::config::{
    load_dotenv, Settings, SettingsOverrides, TomlConfig, ENV_HOST, ENV_PORT, ENV_PROJECT_NAME,
    ENV_RESULT_DIR,
};
use tempfile::TempDir;

fn clear_settings_env() {
    for name in [ENV_PROJECT_NAME, ENV_RESULT_DIR, ENV_HOST, ENV_PORT] {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_from_env_with_nothing_set() {
    clear_settings_env();

    let overrides = SettingsOverrides::from_env();
    assert_eq!(overrides, SettingsOverrides::default());
}

#[test]
#[serial]
fn test_from_env_reads_all_variables() {
    clear_settings_env();
    env::set_var(ENV_PROJECT_NAME, "Nightly Stress");
    env::set_var(ENV_RESULT_DIR, "/tmp/stress-results");
    env::set_var(ENV_HOST, "0.0.0.0");
    env::set_var(ENV_PORT, "8123");

    let overrides = SettingsOverrides::from_env();
    assert_eq!(overrides.project_name.as_deref(), Some("Nightly Stress"));
    assert_eq!(overrides.result_dir, Some(PathBuf::from("/tmp/stress-results")));
    assert_eq!(overrides.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(overrides.port, Some(8123));

    clear_settings_env();
}

#[test]
#[serial]
fn test_from_env_ignores_invalid_port_and_empty_values() {
    clear_settings_env();
    env::set_var(ENV_PORT, "not-a-port");
    env::set_var(ENV_PROJECT_NAME, "   ");

    let overrides = SettingsOverrides::from_env();
    assert!(overrides.port.is_none());
    assert!(overrides.project_name.is_none());

    clear_settings_env();
}

#[test]
#[serial]
fn test_priority_cli_over_env_over_file_over_default() {
    clear_settings_env();
    env::set_var(ENV_RESULT_DIR, "/from/env");
    env::set_var(ENV_PROJECT_NAME, "From Env");

    let cli = SettingsOverrides {
        result_dir: Some(PathBuf::from("/from/cli")),
        ..Default::default()
    };
    let file = TomlConfig {
        project_name: Some("From File".to_string()),
        port: Some(9100),
        ..Default::default()
    };

    let settings = Settings::resolve(cli.or(SettingsOverrides::from_env()), file);

    assert_eq!(settings.result_dir, PathBuf::from("/from/cli"));
    assert_eq!(settings.project_name, "From Env");
    assert_eq!(settings.port, 9100);
    assert_eq!(settings.host, Settings::default().host);

    clear_settings_env();
}

#[test]
#[serial]
fn test_dotenv_file_populates_environment() {
    clear_settings_env();
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(
        &env_file,
        "PROJECT_NAME=\"Dotenv Project\"\nRESULT_DIR=/tmp/dotenv-results\n",
    )
    .unwrap();

    let loaded = load_dotenv(Some(&env_file));
    assert_eq!(loaded, Some(env_file.clone()));

    let overrides = SettingsOverrides::from_env();
    assert_eq!(overrides.project_name.as_deref(), Some("Dotenv Project"));
    assert_eq!(overrides.result_dir, Some(PathBuf::from("/tmp/dotenv-results")));

    clear_settings_env();
}

#[test]
#[serial]
fn test_dotenv_does_not_override_existing_variables() {
    clear_settings_env();
    env::set_var(ENV_PROJECT_NAME, "Already Set");

    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, "PROJECT_NAME=\"From Dotenv\"\n").unwrap();

    load_dotenv(Some(&env_file));

    assert_eq!(env::var(ENV_PROJECT_NAME).unwrap(), "Already Set");

    clear_settings_env();
}

#[test]
#[serial]
fn test_missing_dotenv_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let loaded = load_dotenv(Some(&dir.path().join("missing.env")));
    assert!(loaded.is_none());
}

#[test]
fn test_toml_file_loads_all_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
project_name = "File Project"
result_dir = "/srv/stress/results"
host = "0.0.0.0"
port = 8080
"#,
    )
    .unwrap();

    let config = TomlConfig::from_file(&path).unwrap();
    assert_eq!(config.project_name.as_deref(), Some("File Project"));
    assert_eq!(config.result_dir, Some(PathBuf::from("/srv/stress/results")));
    assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(config.port, Some(8080));
}

#[test]
fn test_load_or_default_with_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = TomlConfig::load_or_default(Some(&dir.path().join("nope.toml")));
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_load_or_default_with_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "this is = = not toml").unwrap();

    // Malformed config degrades to defaults instead of aborting startup
    let config = TomlConfig::load_or_default(Some(&path));
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_from_file_reports_path_in_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "port = -1").unwrap();

    let err = TomlConfig::from_file(&path).unwrap_err().to_string();
    assert!(err.contains("config.toml"), "unexpected error: {}", err);
}
