//! Monthly project cash flow

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Latest month a schedule entry may name (100 years).
pub const MAX_SCHEDULE_MONTH: usize = 1_200;

/// Month offsets at which the three aggregate amounts land.
///
/// Default: capital outlay at month 0, platform fee at token mint (month 1),
/// revenue after token sale (month 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    pub capital_month: usize,
    pub fee_month: usize,
    pub revenue_month: usize,
}

impl Default for CashFlowSchedule {
    fn default() -> Self {
        Self {
            capital_month: 0,
            fee_month: 1,
            revenue_month: 2,
        }
    }
}

impl CashFlowSchedule {
    /// Number of months in the resulting sequence. Saturates instead of
    /// overflowing; [`validate`](Self::validate) bounds it for real use.
    pub fn month_count(&self) -> usize {
        self.capital_month
            .max(self.fee_month)
            .max(self.revenue_month)
            .saturating_add(1)
    }

    /// Every month must be at most [`MAX_SCHEDULE_MONTH`].
    pub fn validate(&self) -> Result<(), EngineError> {
        match [self.capital_month, self.fee_month, self.revenue_month]
            .into_iter()
            .find(|&m| m > MAX_SCHEDULE_MONTH)
        {
            Some(month) => Err(EngineError::ScheduleMonthOutOfRange {
                month,
                max: MAX_SCHEDULE_MONTH,
            }),
            None => Ok(()),
        }
    }
}

impl TryFrom<&[usize]> for CashFlowSchedule {
    type Error = EngineError;

    /// Takes the first three entries as capital, fee and revenue months.
    fn try_from(months: &[usize]) -> Result<Self, Self::Error> {
        let schedule = match months {
            [capital_month, fee_month, revenue_month, ..] => Self {
                capital_month: *capital_month,
                fee_month: *fee_month,
                revenue_month: *revenue_month,
            },
            _ => return Err(EngineError::InvalidSchedule(months.len())),
        };
        schedule.validate()?;
        Ok(schedule)
    }
}

/// Project three aggregate amounts onto a zero-filled monthly sequence.
///
/// Costs and fees are placed as negative amounts. When two entries share a
/// month the later one (fee, then revenue) overwrites the earlier.
///
/// Fails if any month is past [`MAX_SCHEDULE_MONTH`].
pub fn build_cash_flow(
    total_cost: f64,
    fee_amount: f64,
    net_of_fee_revenue: f64,
    schedule: CashFlowSchedule,
) -> Result<Vec<f64>, EngineError> {
    schedule.validate()?;
    let mut flows = vec![0.0; schedule.month_count()];
    flows[schedule.capital_month] = -total_cost;
    flows[schedule.fee_month] = -fee_amount;
    flows[schedule.revenue_month] = net_of_fee_revenue;
    Ok(flows)
}

/// [`build_cash_flow`] with a caller-supplied month list (at least 3 entries).
pub fn build_cash_flow_with_months(
    total_cost: f64,
    fee_amount: f64,
    net_of_fee_revenue: f64,
    months: &[usize],
) -> Result<Vec<f64>, EngineError> {
    let schedule = CashFlowSchedule::try_from(months)?;
    build_cash_flow(total_cost, fee_amount, net_of_fee_revenue, schedule)
}
