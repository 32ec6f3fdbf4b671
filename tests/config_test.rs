//! Integration tests for Settings loading with layered precedence.
//!
//! Precedence: defaults < global file < local file < CAMELSPACE_* env vars.
//! The global layer is passed explicitly so the user's real config is never read.

use std::fs;

use tempfile::TempDir;

use camelspace::application::{ApplicationError, OutputFormat};
use camelspace::config::{local_config_path, Settings};
use camelspace::domain::EnvMap;

fn env(pairs: &[(&str, &str)]) -> EnvMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let project = TempDir::new().unwrap();
    let local = local_config_path(project.path());
    fs::write(
        &local,
        r#"
scope = ["myApp", "core"]
strict_keys = true
format = "json"
"#,
    )
    .unwrap();

    let settings = Settings::load_layers(None, Some(&local), &EnvMap::new()).expect("load");

    assert_eq!(settings.scope, vec!["myApp".to_string(), "core".to_string()]);
    assert!(settings.strict_keys);
    assert_eq!(settings.format, OutputFormat::Json);
}

#[test]
fn given_global_and_local_when_load_then_local_wins_where_specified() {
    let global_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let global = global_dir.path().join("camelspace.toml");
    let local = local_config_path(project.path());

    fs::write(&global, "scope = [\"globalApp\"]\nstrict_keys = true\n").unwrap();
    fs::write(&local, "scope = [\"localApp\"]\n").unwrap();

    let settings =
        Settings::load_layers(Some(&global), Some(&local), &EnvMap::new()).expect("load");

    assert_eq!(settings.scope, vec!["localApp".to_string()]);
    // not specified locally: inherited from global
    assert!(settings.strict_keys);
    assert_eq!(settings.format, OutputFormat::Toml);
}

#[test]
fn given_env_override_when_load_then_env_beats_files() {
    let project = TempDir::new().unwrap();
    let local = local_config_path(project.path());
    fs::write(&local, "strict_keys = true\nformat = \"json\"\n").unwrap();

    let settings = Settings::load_layers(
        None,
        Some(&local),
        &env(&[("CAMELSPACE_STRICT_KEYS", "0"), ("CAMELSPACE_SCOPE", "telemetry")]),
    )
    .expect("load");

    assert!(!settings.strict_keys);
    assert_eq!(settings.format, OutputFormat::Json);
    assert_eq!(settings.scope, vec!["telemetry".to_string()]);
}

#[test]
fn given_missing_files_when_load_then_uses_defaults() {
    let project = TempDir::new().unwrap();
    let missing = project.path().join("nope.toml");

    let settings =
        Settings::load_layers(Some(&missing), Some(&missing), &EnvMap::new()).expect("load");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_malformed_file_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    let local = local_config_path(project.path());
    fs::write(&local, "strict_keys = \"not a bool\"\n").unwrap();

    let err = Settings::load_layers(None, Some(&local), &EnvMap::new()).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_project_dir_when_load_then_reads_local_config() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "scope = [\"fromProject\"]\n",
    )
    .unwrap();

    let settings = Settings::load(Some(project.path()), &EnvMap::new()).expect("load");

    assert_eq!(settings.scope, vec!["fromProject".to_string()]);
}
