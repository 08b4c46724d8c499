//! Generator configuration from the protoc plugin parameter

use crate::error::{GenerateError, GenerateResult};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Generator options.
///
/// protoc passes these as one comma-separated parameter string, e.g.
/// `--twirp_ruby_opt=skip_empty,log_level=debug`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Omit output for files that declare no services
    #[serde(default, alias = "skip-empty")]
    pub skip_empty: bool,

    /// Log verbosity on stderr
    #[serde(default, alias = "log-level")]
    pub log_level: LogLevel,
}

impl GeneratorConfig {
    /// Create a configuration with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the protoc parameter string.
    ///
    /// Entries are separated by commas. `key=value` sets an option, a bare
    /// `key` sets it to `true`. Later entries win over earlier ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use twirp_ruby_codegen::{GeneratorConfig, LogLevel};
    ///
    /// let config = GeneratorConfig::from_parameter("skip_empty,log_level=debug").unwrap();
    /// assert!(config.skip_empty);
    /// assert_eq!(config.log_level, LogLevel::Debug);
    /// ```
    pub fn from_parameter(parameter: &str) -> GenerateResult<Self> {
        let mut options = Map::new();

        for entry in parameter.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = match entry.split_once('=') {
                Some((key, value)) => (key.trim(), parse_value(value.trim())),
                None => (entry, Value::Bool(true)),
            };
            if key.is_empty() {
                return Err(GenerateError::InvalidParameter(format!(
                    "missing option name in '{entry}'"
                )));
            }
            options.insert(key.to_string(), value);
        }

        serde_json::from_value(Value::Object(options))
            .map_err(|e| GenerateError::InvalidParameter(e.to_string()))
    }
}

fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_string()),
    }
}

/// Log levels accepted by the `log_level` option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}
