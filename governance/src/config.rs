//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use stakedao_types::{GovernanceParams, ParamsError};
use stakedao_utils::LogFormat;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid governance parameters: {0}")]
    Params(#[from] ParamsError),
}

/// Configuration for a governance engine.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Global governance parameters.
    #[serde(default)]
    pub params: GovernanceParams,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GovernanceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), stakedao_utils::TryInitError> {
        stakedao_utils::init_logging(self.log_format, &self.log_level)
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: GovernanceParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakedao_types::ActorId;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = GovernanceConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = GovernanceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.params, config.params);
        assert_eq!(parsed.log_level, "info");
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = GovernanceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.params.min_stake, 1000);
        assert_eq!(config.params.quorum_threshold, 50);
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            log_format = "json"

            [params]
            min_stake = 250
            treasury = "ST1TREASURY"
        "#;
        let config = GovernanceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.params.min_stake, 250);
        assert_eq!(config.params.treasury, ActorId::new("ST1TREASURY"));
        assert_eq!(config.params.max_proposals, 1000);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[params]\nquorum_threshold = 66").unwrap();
        let config = GovernanceConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.params.quorum_threshold, 66);
    }

    #[test]
    fn missing_file_returns_io_error() {
        let err = GovernanceConfig::from_toml_file("/nonexistent/stakedao.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_toml_returns_parse_error() {
        let err = GovernanceConfig::from_toml_str("[params]\nmin_stake = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
