//! Project timeline types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed project milestones, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    BaselineTest,
    PlugAndAbandon,
    TokenMint,
    SecondTest,
}

impl Milestone {
    pub const ALL: [Milestone; 4] = [
        Milestone::BaselineTest,
        Milestone::PlugAndAbandon,
        Milestone::TokenMint,
        Milestone::SecondTest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Milestone::BaselineTest => "Baseline Test",
            Milestone::PlugAndAbandon => "Plug & Abandon",
            Milestone::TokenMint => "Token Mint",
            Milestone::SecondTest => "Second Test",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Milestone::BaselineTest => "Initial methane measurement",
            Milestone::PlugAndAbandon => "Well plugging operation",
            Milestone::TokenMint => "100% provisional credits minted",
            Milestone::SecondTest => "Verification measurement",
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single one-day milestone on a well's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub well: String,
    pub milestone: Milestone,
    pub start: NaiveDate,
    /// Exclusive end, always `start + 1 day`
    pub end: NaiveDate,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_labels_in_order() {
        let labels: Vec<_> = Milestone::ALL.iter().map(Milestone::label).collect();
        assert_eq!(labels, ["Baseline Test", "Plug & Abandon", "Token Mint", "Second Test"]);
        assert_eq!(Milestone::BaselineTest.to_string(), "Baseline Test");
    }
}
