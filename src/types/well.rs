//! Well input records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum leak rate (L/min) for a well to be economically valid.
pub const MIN_VALID_LEAK_LPM: f64 = 0.1;

/// One row of the well table supplied by the caller.
///
/// Monetary fields are US dollars. `pna_cost` may be left unset (or zero) to
/// request the depth-based preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    /// Display identifier (well name or API number)
    pub name: String,
    /// Measured methane leak rate, liters/minute
    pub leak_rate_lpm: f64,
    /// Plug & abandon cost; `None` or `0.0` triggers depth autofill
    #[serde(default)]
    pub pna_cost: Option<f64>,
    /// Site reclamation (pad, grading, vegetation)
    #[serde(default)]
    pub reclamation_cost: f64,
    /// Verification body and MRV sensor contractor
    #[serde(default)]
    pub sensor_cost: f64,
    /// Developer admin (title, landowner, docs)
    #[serde(default)]
    pub other_cost: f64,
    /// Measured depth in feet, only used when `pna_cost` is unset
    #[serde(default)]
    pub depth_ft: Option<f64>,
    /// Descriptive only
    #[serde(default)]
    pub county: String,
    /// Baseline methane test date; timeline falls back to the reference date
    #[serde(default)]
    pub baseline_date: Option<NaiveDate>,
}

impl WellRecord {
    /// Create a well with the given name and leak rate and no costs.
    pub fn new(name: impl Into<String>, leak_rate_lpm: f64) -> Self {
        Self {
            name: name.into(),
            leak_rate_lpm,
            pna_cost: None,
            reclamation_cost: 0.0,
            sensor_cost: 0.0,
            other_cost: 0.0,
            depth_ft: None,
            county: String::new(),
            baseline_date: None,
        }
    }

    pub fn with_costs(mut self, pna: f64, reclamation: f64, sensor: f64, other: f64) -> Self {
        self.pna_cost = Some(pna);
        self.reclamation_cost = reclamation;
        self.sensor_cost = sensor;
        self.other_cost = other;
        self
    }

    pub fn with_depth(mut self, depth_ft: f64) -> Self {
        self.depth_ft = Some(depth_ft);
        self
    }

    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = county.into();
        self
    }

    pub fn with_baseline_date(mut self, date: NaiveDate) -> Self {
        self.baseline_date = Some(date);
        self
    }

    /// Reason this well cannot enter an economics batch, if any.
    pub fn validity_issue(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("missing a name or API number".to_string());
        }
        if !(self.leak_rate_lpm.is_finite() && self.leak_rate_lpm >= MIN_VALID_LEAK_LPM) {
            return Some(format!(
                "invalid leak rate {} L/min, must be a finite value of at least {MIN_VALID_LEAK_LPM}",
                self.leak_rate_lpm
            ));
        }
        let costs = [
            ("P&A", self.pna_cost.unwrap_or(0.0)),
            ("reclamation", self.reclamation_cost),
            ("sensor", self.sensor_cost),
            ("other", self.other_cost),
        ];
        costs
            .iter()
            .find(|(_, cost)| !cost.is_finite())
            .map(|(label, cost)| format!("invalid {label} cost {cost}, must be finite"))
    }

    /// Declared P&A cost when it counts as "set" (present, finite and non-zero).
    pub fn declared_pna_cost(&self) -> Option<f64> {
        self.pna_cost.filter(|c| c.is_finite() && *c != 0.0)
    }

    /// Depth when known (present and not NaN).
    pub fn known_depth(&self) -> Option<f64> {
        self.depth_ft.filter(|d| !d.is_nan())
    }
}
