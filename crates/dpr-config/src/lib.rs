//! # dpr-config
//!
//! Layered configuration loading for the DPR validator using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DPRV_*` prefix, `__` as separator)
//! 2. Project-level `.dprv/config.toml`
//! 3. User-level `~/.config/dprv/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DPRV_ORACLE__ENDPOINT` -> `oracle.endpoint`,
//! `DPRV_SCORING__WEIGHTS__QUALITY` -> `scoring.weights.quality`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use dpr_config::DprConfig;
//!
//! let config = DprConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.oracle.is_configured() {
//!     println!("oracle: {}", config.oracle.endpoint);
//! }
//! ```

mod error;
mod general;
mod oracle;
mod scoring;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use oracle::{OracleConfig, RETRY_CAP};
pub use scoring::ScoringConfig;

use dpr_core::{PolicyBounds, SectionType};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tolerance when checking that tier weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Accepted values for `general.default_format`.
pub const OUTPUT_FORMATS: &[&str] = &["json", "narrative", "table"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DprConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub policy: PolicyBounds,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DprConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".dprv/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("DPRV_").split("__"));

        figment
    }

    /// Reject values the engine cannot score with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for negative or non-normalised tier
    /// weights, an unknown section type in `scoring.policies`, an inverted grant
    /// range, a zero oracle timeout, or an unknown default output format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.scoring.weights;
        let all = [
            ("scoring.weights.structure", weights.structure),
            ("scoring.weights.content", weights.content),
            ("scoring.weights.compliance", weights.compliance),
            ("scoring.weights.quality", weights.quality),
        ];
        for (field, weight) in all {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::invalid(field, format!("weight {weight} must be >= 0")));
            }
        }
        if (weights.total() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::invalid(
                "scoring.weights",
                format!("weights sum to {:.3}, expected 1.0", weights.total()),
            ));
        }

        for key in self.scoring.policies.keys() {
            if key.parse::<SectionType>().is_err() {
                return Err(ConfigError::invalid(
                    "scoring.policies",
                    format!("unknown section type '{key}'"),
                ));
            }
        }

        if self.policy.grant_pct_min > self.policy.grant_pct_max {
            return Err(ConfigError::invalid(
                "policy.grant_pct_min",
                format!(
                    "{} is greater than grant_pct_max {}",
                    self.policy.grant_pct_min, self.policy.grant_pct_max
                ),
            ));
        }

        if self.oracle.timeout_secs == 0 {
            return Err(ConfigError::invalid("oracle.timeout_secs", "must be at least 1"));
        }

        if !OUTPUT_FORMATS.contains(&self.general.default_format.as_str()) {
            return Err(ConfigError::invalid(
                "general.default_format",
                format!(
                    "'{}' is not one of {}",
                    self.general.default_format,
                    OUTPUT_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dprv").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DprConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.oracle.is_configured());
        assert!(config.general.input_dir.is_empty());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = DprConfig::figment();
        let config: DprConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.oracle.timeout_secs, 15);
        assert_eq!(config.policy, PolicyBounds::default());
    }

    #[test]
    fn unnormalised_weights_are_rejected() {
        let mut config = DprConfig::default();
        config.scoring.weights.quality = 0.5;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "scoring.weights"));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut config = DprConfig::default();
        config.scoring.weights.structure = -0.25;
        config.scoring.weights.content = 0.80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_policy_key_is_rejected() {
        let mut config = DprConfig::default();
        config
            .scoring
            .policies
            .insert("market_analysis".into(), dpr_core::AggregationPolicy::FlatCheck);
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_grant_range_is_rejected() {
        let mut config = DprConfig::default();
        config.policy.grant_pct_min = 90.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_default_format_is_rejected() {
        let mut config = DprConfig::default();
        config.general.default_format = "yaml".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_format"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = DprConfig::default();
        config.oracle.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
