//! Shared data structures for the credit economics engine
//!
//! - `WellRecord`: caller-supplied input row
//! - `EconomicsRow`, `RiskFlag`, `PortfolioSummary`: evaluator outputs
//! - `TimelineEvent`, `Milestone`: project schedule
//! - Sensitivity and scenario comparison reports

mod well;
mod economics;
mod timeline;
mod analysis;

pub use well::*;
pub use economics::*;
pub use timeline::*;
pub use analysis::*;
