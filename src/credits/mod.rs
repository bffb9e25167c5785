//! Methane leak rate to carbon credit conversion
//!
//! A leak measured in liters/minute is converted to mass, annualised,
//! extended over the crediting period and scaled by methane's global warming
//! potential:
//!
//! ```text
//! credits = lpm × 0.000714 × 525 600 / 1 000 × 50 × 28
//! ```

use serde::{Deserialize, Serialize};

/// Methane density, kg per liter at standard conditions.
pub const CH4_DENSITY_KG_PER_L: f64 = 0.000_714;

/// Minutes in a 365-day year.
pub const MINUTES_PER_YEAR: f64 = 525_600.0;

/// Fixed crediting period in years.
pub const CREDITING_PERIOD_YEARS: f64 = 50.0;

/// 100-year global warming potential of methane.
pub const GWP_CH4: f64 = 28.0;

/// Convert a leak rate (L/min) to carbon credits (tCO2e) with the fixed
/// 50-year period and GWP 28.
///
/// Missing (NaN) and non-positive rates yield zero credits.
pub fn calc_credits(leak_rate_lpm: f64) -> f64 {
    if leak_rate_lpm.is_nan() || leak_rate_lpm <= 0.0 {
        return 0.0;
    }
    let ch4_t_per_year = leak_rate_lpm * CH4_DENSITY_KG_PER_L * MINUTES_PER_YEAR / 1_000.0;
    ch4_t_per_year * CREDITING_PERIOD_YEARS * GWP_CH4
}

/// Intermediate steps of a credit calculation, for diagnostic display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditBreakdown {
    pub kg_per_min: f64,
    pub t_per_yr: f64,
    pub t_total: f64,
    pub credits: f64,
}

/// Credit calculation with configurable GWP and crediting period.
///
/// With `GWP_CH4` and `CREDITING_PERIOD_YEARS` the `credits` field equals
/// [`calc_credits`] for any positive leak rate. Unlike `calc_credits`, no
/// clamping is applied: the steps are reported exactly as computed.
pub fn compute_credits(leak_rate_lpm: f64, gwp: f64, period_yr: f64) -> CreditBreakdown {
    let kg_per_min = leak_rate_lpm * CH4_DENSITY_KG_PER_L;
    let t_per_yr = kg_per_min * MINUTES_PER_YEAR / 1_000.0;
    let t_total = t_per_yr * period_yr;
    CreditBreakdown {
        kg_per_min,
        t_per_yr,
        t_total,
        credits: t_total * gwp,
    }
}
