//! Ordered risk classification rules
//!
//! Rules are evaluated top to bottom and the first match wins, so a well that
//! is both low-credit and at-risk reports `LowCredits`.

use crate::types::RiskFlag;

/// Leak rate below which a well is flagged as low-credit (L/min).
pub const LOW_CREDIT_LEAK_LPM: f64 = 5.0;

/// Breakeven ratio above which a well is non-viable.
pub const NON_VIABLE_BREAKEVEN: f64 = 1.0;

/// Lower (exclusive) bound of the at-risk breakeven band.
pub const AT_RISK_BREAKEVEN: f64 = 0.8;

/// Inputs the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct RiskInputs {
    pub breakeven_ratio: f64,
    pub leak_rate_lpm: f64,
}

pub type Predicate = fn(&RiskInputs) -> bool;

// NaN fails the comparison and lands here
fn is_non_viable(r: &RiskInputs) -> bool {
    !(r.breakeven_ratio <= NON_VIABLE_BREAKEVEN)
}

fn is_low_credit(r: &RiskInputs) -> bool {
    r.leak_rate_lpm < LOW_CREDIT_LEAK_LPM
}

fn is_at_risk(r: &RiskInputs) -> bool {
    r.breakeven_ratio > AT_RISK_BREAKEVEN && r.breakeven_ratio <= NON_VIABLE_BREAKEVEN
}

/// Priority-ordered `(predicate, flag)` pairs. `Good` is the fallback.
pub const RISK_RULES: [(Predicate, RiskFlag); 3] = [
    (is_non_viable, RiskFlag::NonViable),
    (is_low_credit, RiskFlag::LowCredits),
    (is_at_risk, RiskFlag::AtRisk),
];

pub fn classify_risk(breakeven_ratio: f64, leak_rate_lpm: f64) -> RiskFlag {
    let inputs = RiskInputs {
        breakeven_ratio,
        leak_rate_lpm,
    };
    RISK_RULES
        .iter()
        .find(|(matches, _)| matches(&inputs))
        .map_or(RiskFlag::Good, |(_, flag)| *flag)
}
