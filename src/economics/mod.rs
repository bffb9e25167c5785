//! Project economics
//!
//! - `pna`: depth-bucketed P&A cost presets
//! - `evaluator`: per-well revenue, cost, profit, breakeven and risk
//! - `risk`: ordered first-match risk rules
//! - `cash_flow` / `npv`: monthly schedule and discounting
//! - `summary`: portfolio totals
//! - `sensitivity`: token price x fee sweep
//!
//! Every function here is a pure computation over its arguments.

pub mod pna;
pub mod risk;
pub mod evaluator;
pub mod cash_flow;
pub mod npv;
pub mod summary;
pub mod sensitivity;

pub use cash_flow::{build_cash_flow, build_cash_flow_with_months, CashFlowSchedule, MAX_SCHEDULE_MONTH};
pub use evaluator::{
    breakeven_ratio, evaluate, evaluate_well, validate_pricing, validate_wells, wells_missing_pna,
};
pub use npv::npv;
pub use pna::{resolve_pna_cost, DEPTH_COST_PRESETS};
pub use risk::classify_risk;
pub use sensitivity::{linspace, sensitivity_sweep, SensitivityGrid};
