//! Well Credits: orphan-well plugging carbon credit economics
//!
//! Estimates the methane carbon credits earned by plugging leaking wells and
//! the project economics that follow from them.
//!
//! ## Modules
//!
//! - **credits**: leak rate (L/min) to tCO2e credits over the crediting period
//! - **economics**: per-well evaluation, risk flags, cash flow, NPV, portfolio
//!   summary and the token price x fee sensitivity sweep
//! - **timeline**: baseline test, plugging, mint and re-test milestones
//! - **scenario**: named scenarios, the caller-owned store and A/B comparison
//! - **ingest**: well table CSV reader
//! - **config**: TOML defaults for pricing, schedule and sweep grid
//!
//! The engine holds no state. Every call recomputes from the wells and
//! parameters it is given.

pub mod config;
pub mod credits;
pub mod economics;
pub mod error;
pub mod ingest;
pub mod scenario;
pub mod timeline;
pub mod types;

// Re-export configuration
pub use config::EngineConfig;

// Re-export the engine entry points
pub use credits::{calc_credits, compute_credits, CreditBreakdown};
pub use economics::{build_cash_flow, evaluate, npv, sensitivity_sweep, CashFlowSchedule, SensitivityGrid};
pub use error::{EngineError, WellIssue};
pub use scenario::{compare_scenarios, Scenario, ScenarioStore};
pub use timeline::build_timeline;

// Re-export commonly used types
pub use types::{
    EconomicsRow, Milestone, PnaCostSource, PortfolioSummary, RiskFlag, ScenarioComparison,
    SensitivityReport, TimelineEvent, WellRecord,
};
