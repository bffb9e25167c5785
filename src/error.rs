//! Engine error types

use thiserror::Error;

/// A well that failed the batch precondition.
#[derive(Debug, Clone, PartialEq)]
pub struct WellIssue {
    /// 1-based position in the batch
    pub position: usize,
    pub name: String,
    pub reason: String,
}

impl std::fmt::Display for WellIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.trim().is_empty() {
            write!(f, "Well #{}: {}", self.position, self.reason)
        } else {
            write!(f, "Well #{} ({}): {}", self.position, self.name, self.reason)
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Well batch rejected: {}", join_issues(.0))]
    Validation(Vec<WellIssue>),

    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Cash flow schedule needs at least 3 entries, got {0}")]
    InvalidSchedule(usize),

    #[error("Cash flow month {month} is past the last allowed month {max}")]
    ScheduleMonthOutOfRange { month: usize, max: usize },
}

fn join_issues(issues: &[WellIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl EngineError {
    /// Issues behind a batch rejection; empty for other variants.
    pub fn well_issues(&self) -> &[WellIssue] {
        match self {
            EngineError::Validation(issues) => issues,
            _ => &[],
        }
    }
}
