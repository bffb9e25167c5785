//! Engine Configuration - pricing defaults, cash flow schedule and sweep grid
//!
//! Every field has a serde default, so an empty or partial TOML file yields a
//! working configuration. Values here are defaults for callers; the engine
//! functions take their parameters explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::credits::{CREDITING_PERIOD_YEARS, GWP_CH4};
use crate::economics::{linspace, CashFlowSchedule, SensitivityGrid};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "WELL_CREDITS_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "well_credits.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$WELL_CREDITS_CONFIG`
/// 2. `./well_credits.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub cash_flow: CashFlowConfig,

    /// Parameters for the diagnostic credit breakdown
    #[serde(default)]
    pub credits: CreditsConfig,

    #[serde(default)]
    pub sensitivity: SensitivityConfig,
}

impl EngineConfig {
    /// Load configuration using the standard search order. Falls back to
    /// defaults (with a warning) when a file exists but fails to load.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded engine config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./well_credits.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded engine config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(Some(path.to_path_buf()), err),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    ///
    /// Unknown keys are logged as warnings; range violations are errors.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(None, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate value ranges. Suspicious-but-legal values are logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(Option<PathBuf>, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(Some(path), e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Parse(None, e) => write!(f, "Config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {e}"),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Pricing
// ============================================================================

/// Default market and finance parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Carbon credit token price, $ per tCO2e
    #[serde(default = "default_token_price")]
    pub token_price: f64,

    /// Platform fee as a fraction of gross revenue (0.02 = 2%)
    #[serde(default = "default_path_fee_rate")]
    pub path_fee_rate: f64,

    /// Per-period discount rate for NPV (0.08 = 8%)
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
}

fn default_token_price() -> f64 { defaults::TOKEN_PRICE }
fn default_path_fee_rate() -> f64 { defaults::PATH_FEE_RATE }
fn default_discount_rate() -> f64 { defaults::DISCOUNT_RATE }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            token_price: default_token_price(),
            path_fee_rate: default_path_fee_rate(),
            discount_rate: default_discount_rate(),
        }
    }
}

// ============================================================================
// Cash Flow
// ============================================================================

/// Month offsets for the project cash flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowConfig {
    #[serde(default)]
    pub capital_month: usize,
    #[serde(default = "default_fee_month")]
    pub fee_month: usize,
    #[serde(default = "default_revenue_month")]
    pub revenue_month: usize,
}

fn default_fee_month() -> usize { 1 }
fn default_revenue_month() -> usize { 2 }

impl Default for CashFlowConfig {
    fn default() -> Self {
        Self {
            capital_month: 0,
            fee_month: default_fee_month(),
            revenue_month: default_revenue_month(),
        }
    }
}

impl CashFlowConfig {
    pub fn schedule(&self) -> CashFlowSchedule {
        CashFlowSchedule {
            capital_month: self.capital_month,
            fee_month: self.fee_month,
            revenue_month: self.revenue_month,
        }
    }
}

// ============================================================================
// Credits
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditsConfig {
    #[serde(default = "default_gwp")]
    pub gwp: f64,
    #[serde(default = "default_period")]
    pub crediting_period_years: f64,
}

fn default_gwp() -> f64 { GWP_CH4 }
fn default_period() -> f64 { CREDITING_PERIOD_YEARS }

impl Default for CreditsConfig {
    fn default() -> Self {
        Self {
            gwp: default_gwp(),
            crediting_period_years: default_period(),
        }
    }
}

// ============================================================================
// Sensitivity
// ============================================================================

/// Sweep bounds; both ends inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityConfig {
    #[serde(default = "default_price_min")]
    pub token_price_min: f64,
    #[serde(default = "default_price_max")]
    pub token_price_max: f64,
    #[serde(default = "default_price_steps")]
    pub token_price_steps: usize,
    #[serde(default = "default_fee_min")]
    pub fee_rate_min: f64,
    #[serde(default = "default_fee_max")]
    pub fee_rate_max: f64,
    #[serde(default = "default_fee_steps")]
    pub fee_rate_steps: usize,
}

fn default_price_min() -> f64 { defaults::SWEEP_TOKEN_PRICE_MIN }
fn default_price_max() -> f64 { defaults::SWEEP_TOKEN_PRICE_MAX }
fn default_price_steps() -> usize { defaults::SWEEP_TOKEN_PRICE_STEPS }
fn default_fee_min() -> f64 { defaults::SWEEP_FEE_RATE_MIN }
fn default_fee_max() -> f64 { defaults::SWEEP_FEE_RATE_MAX }
fn default_fee_steps() -> usize { defaults::SWEEP_FEE_RATE_STEPS }

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            token_price_min: default_price_min(),
            token_price_max: default_price_max(),
            token_price_steps: default_price_steps(),
            fee_rate_min: default_fee_min(),
            fee_rate_max: default_fee_max(),
            fee_rate_steps: default_fee_steps(),
        }
    }
}

impl SensitivityConfig {
    pub fn grid(&self) -> SensitivityGrid {
        SensitivityGrid {
            token_prices: linspace(self.token_price_min, self.token_price_max, self.token_price_steps),
            fee_rates: linspace(self.fee_rate_min, self.fee_rate_max, self.fee_rate_steps),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
