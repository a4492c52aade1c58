//! Governance configuration with TOML file support.

use civic_types::{AccountId, GovernanceParams, StakeAmount};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a governance engine instance.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Amounts are `u64` here because
/// TOML integers are 64-bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Identity of the engine itself; it becomes the permission root.
    #[serde(default = "default_governance_account")]
    pub governance_account: String,

    /// Minimum current balance required to propose.
    #[serde(default = "default_proposal_threshold")]
    pub proposal_threshold: u64,

    /// Minimum for + against weight for execution.
    #[serde(default = "default_quorum")]
    pub quorum: u64,

    /// Voting window length in blocks.
    #[serde(default = "default_voting_period")]
    pub voting_period: u64,

    /// Blocks between voting close and execution eligibility.
    #[serde(default = "default_execution_delay")]
    pub execution_delay: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_governance_account() -> String {
    "governance".to_string()
}

fn default_proposal_threshold() -> u64 {
    10_000
}

fn default_quorum() -> u64 {
    20_000
}

fn default_voting_period() -> u64 {
    17_280
}

fn default_execution_delay() -> u64 {
    5_760
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.account().is_valid() {
            return Err(ConfigError::Invalid(format!(
                "governance_account {:?} is not a valid account id",
                self.governance_account
            )));
        }
        self.params()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Short voting and delay windows for local runs.
    pub fn devnet() -> Self {
        Self {
            voting_period: 20,
            execution_delay: 5,
            ..Self::default()
        }
    }

    pub fn account(&self) -> AccountId {
        AccountId::new(self.governance_account.clone())
    }

    pub fn params(&self) -> GovernanceParams {
        GovernanceParams {
            proposal_threshold: StakeAmount::new(u128::from(self.proposal_threshold)),
            quorum: StakeAmount::new(u128::from(self.quorum)),
            voting_period: self.voting_period,
            execution_delay: self.execution_delay,
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            governance_account: default_governance_account(),
            proposal_threshold: default_proposal_threshold(),
            quorum: default_quorum(),
            voting_period: default_voting_period(),
            execution_delay: default_execution_delay(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = GovernanceConfig::from_toml_str("").unwrap();
        assert_eq!(config, GovernanceConfig::default());
        assert_eq!(config.params(), GovernanceParams::mainnet_defaults());
    }

    #[test]
    fn partial_override() {
        let config = GovernanceConfig::from_toml_str(
            r#"
            quorum = 500
            voting_period = 10
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.quorum, 500);
        assert_eq!(config.voting_period, 10);
        assert_eq!(config.execution_delay, 5_760);
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn devnet_matches_devnet_params() {
        let config = GovernanceConfig::devnet();
        assert_eq!(config.params(), GovernanceParams::devnet_defaults());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_voting_period_is_invalid() {
        let err = GovernanceConfig::from_toml_str("voting_period = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn blank_account_is_invalid() {
        let err = GovernanceConfig::from_toml_str(r#"governance_account = """#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GovernanceConfig::from_toml_str("quorum = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_file_roundtrip() {
        let config = GovernanceConfig {
            governance_account: "dao".into(),
            quorum: 42,
            ..GovernanceConfig::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes())
            .unwrap();

        let loaded = GovernanceConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GovernanceConfig::from_toml_file("/nonexistent/civic.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
