//! Default constants for the engine configuration.

// ============================================================================
// Pricing
// ============================================================================

/// Token price, $ per tCO2e.
pub const TOKEN_PRICE: f64 = 20.0;

/// Platform fee as a fraction of gross revenue.
pub const PATH_FEE_RATE: f64 = 0.02;

/// Discount rate applied per cash flow month.
pub const DISCOUNT_RATE: f64 = 0.08;

// ============================================================================
// Sensitivity Sweep
// ============================================================================

pub const SWEEP_TOKEN_PRICE_MIN: f64 = 1.0;
pub const SWEEP_TOKEN_PRICE_MAX: f64 = 30.0;
pub const SWEEP_TOKEN_PRICE_STEPS: usize = 10;

pub const SWEEP_FEE_RATE_MIN: f64 = 0.01;
pub const SWEEP_FEE_RATE_MAX: f64 = 0.03;
pub const SWEEP_FEE_RATE_STEPS: usize = 5;
