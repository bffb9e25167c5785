//! Sensitivity and scenario comparison types

use serde::{Deserialize, Serialize};

/// One point of the token price x fee rate sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCell {
    pub token_price: f64,
    pub path_fee_rate: f64,
    pub total_profit: f64,
    pub profitable: bool,
}

/// Mean total profit across all fee rates at one token price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceProfit {
    pub token_price: f64,
    pub mean_profit: f64,
}

/// Full sensitivity sweep output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Price-major, fee-minor
    pub cells: Vec<SensitivityCell>,
    /// Ascending by token price
    pub price_curve: Vec<PriceProfit>,
    /// Token price at which mean profit crosses zero, if inside the grid
    pub breakeven_token_price: Option<f64>,
}

/// Side-by-side numbers for one well present in either scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellComparison {
    pub name: String,
    pub profit_a: Option<f64>,
    pub profit_b: Option<f64>,
    pub credits_a: Option<f64>,
    pub credits_b: Option<f64>,
    pub breakeven_a: Option<f64>,
    pub breakeven_b: Option<f64>,
    /// `profit_b - profit_a` when the well is in both
    pub profit_delta: Option<f64>,
}

/// Scenario B relative to scenario A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub label_a: String,
    pub label_b: String,
    pub token_price_delta: f64,
    pub fee_rate_delta: f64,
    pub credits_delta: f64,
    pub profit_delta: f64,
    pub cost_delta: f64,
    pub npv_delta: f64,
    pub wells: Vec<WellComparison>,
}
