//! Rendering and parsing of flat and camel-cased mappings
//!
//! Flat mappings are written as `export KEY=value` lines, the same shape env
//! files and `.envrc` use. Camel-cased objects go out as TOML or JSON.

use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CamelMap, EnvMap};

/// Output format for camel-cased configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toml" => Ok(OutputFormat::Toml),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApplicationError::InvalidInput {
                message: format!("unknown format '{}' (expected toml or json)", other),
            }),
        }
    }
}

/// Input format for camel-cased configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    /// `.json` files are JSON, everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Toml,
        }
    }
}

/// Render a flat mapping as `export KEY=value` lines.
pub fn render_exports(flat: &EnvMap) -> String {
    let mut out = String::new();
    for (key, value) in flat {
        out.push_str(&format!("export {}={}\n", key, shell_quote(value)));
    }
    out
}

/// Single-quote a value if the shell would otherwise split or expand it.
fn shell_quote(value: &str) -> String {
    let is_plain = value.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | ',' | '@' | '+' | '=')
    });
    if is_plain && !value.is_empty() {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

pub fn render_camel(camel: &CamelMap, format: OutputFormat) -> ApplicationResult<String> {
    render(camel, format)
}

/// Render sections keyed by scope label.
pub fn render_sections(
    sections: &BTreeMap<String, CamelMap>,
    format: OutputFormat,
) -> ApplicationResult<String> {
    render(sections, format)
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> ApplicationResult<String> {
    match format {
        OutputFormat::Toml => {
            toml::to_string_pretty(value).map_err(|e| ApplicationError::OperationFailed {
                context: "render TOML".to_string(),
                source: Box::new(e),
            })
        }
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|s| s + "\n")
            .map_err(|e| ApplicationError::OperationFailed {
                context: "render JSON".to_string(),
                source: Box::new(e),
            }),
    }
}

/// Parse a camel-cased object. Every value must already be a string.
pub fn parse_camel(content: &str, format: InputFormat) -> ApplicationResult<CamelMap> {
    match format {
        InputFormat::Toml => toml::from_str(content).map_err(|e| ApplicationError::InvalidInput {
            message: format!("expected a flat TOML table of strings: {}", e),
        }),
        InputFormat::Json => {
            serde_json::from_str(content).map_err(|e| ApplicationError::InvalidInput {
                message: format!("expected a flat JSON object of strings: {}", e),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_exports_one_line_per_key() {
        let out = render_exports(&flat(&[("MY_APP_MODE", "test"), ("HOST", "a.b:80")]));
        assert_eq!(out, "export HOST=a.b:80\nexport MY_APP_MODE=test\n");
    }

    #[test]
    fn test_render_exports_quotes_when_needed() {
        let out = render_exports(&flat(&[
            ("A", ""),
            ("B", "Who knows!"),
            ("C", "it's"),
        ]));
        assert_eq!(
            out,
            "export A=''\nexport B='Who knows!'\nexport C='it'\\''s'\n"
        );
    }

    #[test]
    fn test_render_camel_toml() {
        let camel = flat(&[("mode", "test"), ("token", "abc")]);
        let out = render_camel(&camel, OutputFormat::Toml).unwrap();
        assert_eq!(out, "mode = \"test\"\ntoken = \"abc\"\n");
    }

    #[test]
    fn test_render_camel_json() {
        let camel = flat(&[("mode", "test")]);
        let out = render_camel(&camel, OutputFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"mode\": \"test\"\n}\n");
    }

    #[test]
    fn test_parse_camel_rejects_non_string_values() {
        let err = parse_camel("port = 8080\n", InputFormat::Toml).unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput { .. }));
    }

    #[test]
    fn test_parse_camel_json() {
        let camel = parse_camel(r#"{"coreMode": "test"}"#, InputFormat::Json).unwrap();
        assert_eq!(camel.get("coreMode"), Some(&"test".to_string()));
    }

    #[test]
    fn test_input_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.toml")), InputFormat::Toml);
        assert_eq!(InputFormat::from_path(Path::new("a")), InputFormat::Toml);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
