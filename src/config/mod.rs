//! Engine Configuration Module
//!
//! TOML-backed defaults for pricing, the cash flow schedule, the credit
//! breakdown and the sensitivity grid.
//!
//! ## Loading Order
//!
//! 1. `WELL_CREDITS_CONFIG` environment variable (path to TOML file)
//! 2. `well_credits.toml` in the current working directory
//! 3. Built-in defaults
//!
//! There is no process-wide instance: load an `EngineConfig` and pass the
//! values you need into the engine functions.
//!
//! ```ignore
//! let config = EngineConfig::load();
//! let rows = evaluate(&wells, config.pricing.token_price, config.pricing.path_fee_rate)?;
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;
