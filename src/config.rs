//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/camelspace/camelspace.toml`
//! 3. Local config: `<project_dir>/.camelspace.toml`
//! 4. Environment variables: `CAMELSPACE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, OutputFormat};
use crate::domain::{EnvMap, Scope};

/// Namespace of the environment overrides, as a scope label.
pub const ENV_NAMESPACE: &str = "camelspace";

/// Unified configuration for camelspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Scope labels applied when a command is given none
    pub scope: Vec<String>,
    /// Require the whole key to be an env var name (anchored match)
    pub strict_keys: bool,
    /// Output format for camel-cased config
    pub format: OutputFormat,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub scope: Option<Vec<String>>,
    pub strict_keys: Option<bool>,
    pub format: Option<OutputFormat>,
}

/// Get the XDG config directory for camelspace.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "camelspace").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("camelspace.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".camelspace.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    debug!("load_raw_settings: {}", path.display());
    Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(true))
        .build()
        .and_then(|config| config.try_deserialize())
        .map_err(|e| ApplicationError::Config {
            message: format!("{}: {}", path.display(), e),
        })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            scope: overlay.scope.clone().unwrap_or_else(|| self.scope.clone()),
            strict_keys: overlay.strict_keys.unwrap_or(self.strict_keys),
            format: overlay.format.unwrap_or(self.format),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    /// * `env` - Snapshot of the environment, for `CAMELSPACE_*` overrides
    pub fn load(project_dir: Option<&Path>, env: &EnvMap) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        let local = project_dir.map(local_config_path);
        Self::load_layers(global.as_deref(), local.as_deref(), env)
    }

    /// Load settings from explicit file locations. Missing files are skipped.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
        env: &EnvMap,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current.apply_env_overrides(env)
    }

    /// Apply `CAMELSPACE_*` variables as explicit overrides.
    ///
    /// The variables are read through the crate's own root scope, so
    /// `CAMELSPACE_STRICT_KEYS` arrives as `strictKeys`.
    fn apply_env_overrides(mut self, env: &EnvMap) -> Result<Self, ApplicationError> {
        let overrides = Scope::root().narrow(ENV_NAMESPACE).from_env(env);

        for (key, value) in overrides {
            match key.as_str() {
                "scope" => self.scope = split_list(value),
                "strictKeys" => self.strict_keys = parse_bool(&key, value)?,
                "format" => {
                    self.format = value.parse().map_err(|e: ApplicationError| {
                        ApplicationError::Config {
                            message: format!("{}: {}", key, e),
                        }
                    })?
                }
                other => debug!("apply_env_overrides: ignoring unknown key {:?}", other),
            }
        }

        Ok(self)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# camelspace configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/camelspace/camelspace.toml
#   Local:  <project_dir>/.camelspace.toml
#   Env:    CAMELSPACE_* environment variables (explicit overrides)

# Scope labels used when a command is given none.
# ["myApp", "core"] reads MY_APP_CORE_* variables.
# scope = []

# Only accept keys that are entirely uppercase env var names.
# The default also accepts keys that merely contain such a name (e.g. fooBAR).
# strict_keys = false

# Output format for imported config: "toml" or "json"
# format = "toml"
"#
        .to_string()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ApplicationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ApplicationError::Config {
            message: format!("{}: expected a boolean, got '{}'", key, other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn given_no_config_when_loading_layers_then_uses_defaults() {
        let settings = Settings::load_layers(None, None, &EnvMap::new()).expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert!(settings.scope.is_empty());
        assert!(!settings.strict_keys);
        assert_eq!(settings.format, OutputFormat::Toml);
    }

    #[test]
    fn given_env_overrides_when_loading_then_applies_them() {
        let env = env(&[
            ("CAMELSPACE_SCOPE", "myApp, core"),
            ("CAMELSPACE_STRICT_KEYS", "true"),
            ("CAMELSPACE_FORMAT", "json"),
            ("CAMELSPACE_SOMETHING_ELSE", "ignored"),
            ("OTHER_SCOPE", "not ours"),
        ]);
        let settings = Settings::load_layers(None, None, &env).unwrap();
        assert_eq!(settings.scope, vec!["myApp".to_string(), "core".to_string()]);
        assert!(settings.strict_keys);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn given_bad_boolean_when_loading_then_config_error() {
        let env = env(&[("CAMELSPACE_STRICT_KEYS", "maybe")]);
        let err = Settings::load_layers(None, None, &env).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_bad_format_when_loading_then_config_error() {
        let env = env(&[("CAMELSPACE_FORMAT", "yaml")]);
        let err = Settings::load_layers(None, None, &env).unwrap_err();
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_split_list_drops_empty_items() {
        assert_eq!(split_list("a,,b , "), vec!["a".to_string(), "b".to_string()]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_template_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.scope.is_none());
    }

    #[test]
    fn test_to_toml_contains_fields() {
        let out = Settings::default().to_toml().unwrap();
        assert!(out.contains("strict_keys = false"));
        assert!(out.contains("format = \"toml\""));
    }
}
