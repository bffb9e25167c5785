//! Scenarios and the caller-owned scenario store
//!
//! A scenario bundles a well table with its pricing. The store holds named
//! scenarios and the active selection; the engine itself keeps no state and
//! only reads the scenarios it is handed.

mod comparison;

pub use comparison::compare_scenarios;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::economics::{evaluate, CashFlowSchedule};
use crate::error::EngineError;
use crate::types::{EconomicsRow, PortfolioSummary, WellRecord};

/// A labelled well table with its pricing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,
    pub wells: Vec<WellRecord>,
    /// $ per tCO2e
    pub token_price: f64,
    /// Fraction of gross revenue
    pub path_fee_rate: f64,
}

/// Results of evaluating one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEvaluation {
    pub label: String,
    pub rows: Vec<EconomicsRow>,
    pub summary: PortfolioSummary,
    pub cash_flow: Vec<f64>,
    pub npv: f64,
}

impl Scenario {
    pub fn new(label: impl Into<String>, wells: Vec<WellRecord>, token_price: f64, path_fee_rate: f64) -> Self {
        Self {
            label: label.into(),
            wells,
            token_price,
            path_fee_rate,
        }
    }

    /// Evaluate the well table and roll it up. Recomputed from scratch on
    /// every call. Fails on an invalid batch, pricing or schedule.
    pub fn evaluate(
        &self,
        discount_rate: f64,
        schedule: CashFlowSchedule,
    ) -> Result<ScenarioEvaluation, EngineError> {
        if !discount_rate.is_finite() {
            return Err(EngineError::InvalidParameter {
                name: "discount_rate",
                value: discount_rate,
                reason: "must be finite",
            });
        }
        let rows = evaluate(&self.wells, self.token_price, self.path_fee_rate)?;
        let summary = PortfolioSummary::from_rows(&rows);
        let cash_flow = summary.cash_flow(schedule)?;
        let npv = crate::economics::npv(discount_rate, &cash_flow);
        Ok(ScenarioEvaluation {
            label: self.label.clone(),
            rows,
            summary,
            cash_flow,
            npv,
        })
    }
}

/// Token price gap ($/tCO2e) between the seeded A and B scenarios.
pub const SCENARIO_B_PRICE_STEP: f64 = 5.0;

/// Seven sample wells used to seed new stores.
pub fn sample_wells() -> Vec<WellRecord> {
    [
        ("Well-01", 15.0, 1_500.0, "Johnson"),
        ("Well-02", 42.0, 2_200.0, "Tarrant"),
        ("Well-03", 36.0, 4_800.0, "Parker"),
        ("Well-04", 22.0, 3_500.0, "Wise"),
        ("Well-05", 12.0, 4_200.0, "Denton"),
        ("Well-06", 15.0, 6_000.0, "Hood"),
        ("Well-07", 32.0, 5_500.0, "Erath"),
    ]
    .into_iter()
    .map(|(name, lpm, depth, county)| {
        WellRecord::new(name, lpm)
            .with_costs(30_000.0, 5_000.0, 12_000.0, 1_000.0)
            .with_depth(depth)
            .with_county(county)
    })
    .collect()
}

/// Named scenarios plus the active selection. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStore {
    scenarios: BTreeMap<String, Scenario>,
    active: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Unknown scenario: {0}")]
    Unknown(String),
}

impl ScenarioStore {
    /// Store holding a single scenario, which becomes active.
    pub fn new(initial: Scenario) -> Self {
        let active = initial.label.clone();
        let mut scenarios = BTreeMap::new();
        scenarios.insert(active.clone(), initial);
        Self { scenarios, active }
    }

    /// Scenario A at $20 and B at $25, both with the sample wells and a 2% fee.
    pub fn with_defaults() -> Self {
        Self::for_comparison(sample_wells(), 20.0, 0.02)
    }

    /// Scenario A at the given pricing and B at [`SCENARIO_B_PRICE_STEP`]
    /// above it, sharing the same wells and fee. A is active.
    pub fn for_comparison(wells: Vec<WellRecord>, token_price: f64, path_fee_rate: f64) -> Self {
        let b = Scenario::new(
            "B",
            wells.clone(),
            token_price + SCENARIO_B_PRICE_STEP,
            path_fee_rate,
        );
        let mut store = Self::new(Scenario::new("A", wells, token_price, path_fee_rate));
        store.insert(b);
        store
    }

    /// Add or replace a scenario under its label.
    pub fn insert(&mut self, scenario: Scenario) -> Option<Scenario> {
        self.scenarios.insert(scenario.label.clone(), scenario)
    }

    pub fn get(&self, label: &str) -> Option<&Scenario> {
        self.scenarios.get(label)
    }

    pub fn get_mut(&mut self, label: &str) -> Option<&mut Scenario> {
        self.scenarios.get_mut(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    pub fn active_label(&self) -> &str {
        &self.active
    }

    pub fn active(&self) -> Option<&Scenario> {
        self.scenarios.get(&self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Scenario> {
        self.scenarios.get_mut(&self.active)
    }

    pub fn set_active(&mut self, label: &str) -> Result<(), ScenarioError> {
        if !self.scenarios.contains_key(label) {
            return Err(ScenarioError::Unknown(label.to_string()));
        }
        self.active = label.to_string();
        Ok(())
    }

    /// Deep-copy wells and pricing from `from` into `to` (created if absent)
    /// and make `to` active.
    pub fn clone_scenario(&mut self, from: &str, to: &str) -> Result<(), ScenarioError> {
        let source = self
            .scenarios
            .get(from)
            .ok_or_else(|| ScenarioError::Unknown(from.to_string()))?;
        let copy = Scenario {
            label: to.to_string(),
            ..source.clone()
        };
        self.scenarios.insert(to.to_string(), copy);
        self.active = to.to_string();
        info!(from, to, "Scenario cloned");
        Ok(())
    }
}
