//! Per-well economics result types

use serde::{Deserialize, Serialize};

/// Project risk classification.
///
/// Assigned by the ordered rule set in `economics::risk`; the first rule that
/// matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFlag {
    /// Costs exceed net revenue (breakeven ratio > 1)
    NonViable,
    /// Leak rate under 5 L/min
    LowCredits,
    /// Breakeven ratio in (0.8, 1.0]
    AtRisk,
    /// No risk factors identified
    Good,
}

impl RiskFlag {
    pub const ALL: [RiskFlag; 4] = [
        RiskFlag::NonViable,
        RiskFlag::LowCredits,
        RiskFlag::AtRisk,
        RiskFlag::Good,
    ];

    /// Label used in tables and exports.
    pub fn label(&self) -> &'static str {
        match self {
            RiskFlag::NonViable => "Non-viable",
            RiskFlag::LowCredits => "Low Credits",
            RiskFlag::AtRisk => "At Risk",
            RiskFlag::Good => "Good",
        }
    }
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a row's P&A cost came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PnaCostSource {
    /// Explicit non-zero cost on the input record
    Declared,
    /// Filled from the depth bucket presets
    DepthPreset,
    /// Neither a cost nor a depth was supplied; counted as zero, so total
    /// cost is understated
    Missing,
}

/// Derived economics for one well. Built once per evaluation, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicsRow {
    pub name: String,
    pub county: String,
    pub leak_rate_lpm: f64,
    /// P&A cost actually used (declared, preset, or 0 when missing)
    pub pna_cost: f64,
    pub pna_cost_source: PnaCostSource,
    /// Carbon credits over the crediting period, tCO2e
    pub credits: f64,
    pub gross_revenue: f64,
    pub fee_amount: f64,
    pub net_revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
    /// total_cost / net_revenue; `f64::INFINITY` when net revenue is zero
    pub breakeven_ratio: f64,
    pub risk_flag: RiskFlag,
}

impl EconomicsRow {
    pub fn is_profitable(&self) -> bool {
        self.breakeven_ratio < 1.0
    }

    pub fn has_missing_pna_cost(&self) -> bool {
        self.pna_cost_source == PnaCostSource::Missing
    }
}

/// Number of rows per risk flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounts {
    pub non_viable: usize,
    pub low_credits: usize,
    pub at_risk: usize,
    pub good: usize,
}

impl RiskCounts {
    pub fn record(&mut self, flag: RiskFlag) {
        match flag {
            RiskFlag::NonViable => self.non_viable += 1,
            RiskFlag::LowCredits => self.low_credits += 1,
            RiskFlag::AtRisk => self.at_risk += 1,
            RiskFlag::Good => self.good += 1,
        }
    }

    pub fn get(&self, flag: RiskFlag) -> usize {
        match flag {
            RiskFlag::NonViable => self.non_viable,
            RiskFlag::LowCredits => self.low_credits,
            RiskFlag::AtRisk => self.at_risk,
            RiskFlag::Good => self.good,
        }
    }

    pub fn total(&self) -> usize {
        self.non_viable + self.low_credits + self.at_risk + self.good
    }
}

/// Project-level totals over a results table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub well_count: usize,
    pub total_credits: f64,
    pub total_gross_revenue: f64,
    pub total_fee: f64,
    pub total_net_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub risk_counts: RiskCounts,
    /// Rows whose P&A cost could not be resolved
    pub missing_pna_cost: usize,
}
