//! Project-level roll-up of a results table

use super::cash_flow::{build_cash_flow, CashFlowSchedule};
use super::npv::npv;
use crate::error::EngineError;
use crate::types::{EconomicsRow, PortfolioSummary};

impl PortfolioSummary {
    pub fn from_rows(rows: &[EconomicsRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            acc.well_count += 1;
            acc.total_credits += row.credits;
            acc.total_gross_revenue += row.gross_revenue;
            acc.total_fee += row.fee_amount;
            acc.total_net_revenue += row.net_revenue;
            acc.total_cost += row.total_cost;
            acc.total_profit += row.profit;
            acc.risk_counts.record(row.risk_flag);
            if row.has_missing_pna_cost() {
                acc.missing_pna_cost += 1;
            }
            acc
        })
    }

    /// Cash flow built from the totals: all costs, all fees, then gross
    /// revenue net of fees.
    pub fn cash_flow(&self, schedule: CashFlowSchedule) -> Result<Vec<f64>, EngineError> {
        build_cash_flow(
            self.total_cost,
            self.total_fee,
            self.total_gross_revenue - self.total_fee,
            schedule,
        )
    }

    pub fn npv(&self, discount_rate: f64, schedule: CashFlowSchedule) -> Result<f64, EngineError> {
        Ok(npv(discount_rate, &self.cash_flow(schedule)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economics::evaluate;
    use crate::types::{RiskFlag, WellRecord};

    fn sample_rows() -> Vec<EconomicsRow> {
        let wells = vec![
            WellRecord::new("Well-01", 15.0).with_costs(30_000.0, 5_000.0, 12_000.0, 1_000.0),
            WellRecord::new("Well-02", 4.0).with_costs(30_000.0, 5_000.0, 12_000.0, 1_000.0),
            WellRecord::new("Well-03", 42.0).with_costs(0.0, 5_000.0, 12_000.0, 1_000.0),
        ];
        evaluate(&wells, 20.0, 0.02).unwrap()
    }

    #[test]
    fn test_totals_match_row_sums() {
        let rows = sample_rows();
        let summary = PortfolioSummary::from_rows(&rows);
        assert_eq!(summary.well_count, 3);
        let credits: f64 = rows.iter().map(|r| r.credits).sum();
        let profit: f64 = rows.iter().map(|r| r.profit).sum();
        assert!((summary.total_credits - credits).abs() < 1e-6);
        assert!((summary.total_profit - profit).abs() < 1e-6);
        assert_eq!(summary.total_cost, 48_000.0 * 2.0 + 18_000.0);
        assert_eq!(summary.missing_pna_cost, 1);
        assert_eq!(summary.risk_counts.get(RiskFlag::NonViable), 1);
        assert_eq!(summary.risk_counts.total(), 3);
    }

    #[test]
    fn test_cash_flow_from_totals() {
        let summary = PortfolioSummary::from_rows(&sample_rows());
        let flows = summary.cash_flow(CashFlowSchedule::default()).unwrap();
        assert_eq!(flows.len(), 3);
        assert_eq!(flows[0], -summary.total_cost);
        assert_eq!(flows[1], -summary.total_fee);
        assert!((flows[2] - summary.total_net_revenue).abs() < 1e-6);
    }

    #[test]
    fn test_npv_zero_rate_is_sum_of_flows() {
        let summary = PortfolioSummary::from_rows(&sample_rows());
        let flows = summary.cash_flow(CashFlowSchedule::default()).unwrap();
        let total: f64 = flows.iter().sum();
        assert!((summary.npv(0.0, CashFlowSchedule::default()).unwrap() - total).abs() < 1e-6);
    }

    #[test]
    fn test_empty_rows() {
        let summary = PortfolioSummary::from_rows(&[]);
        assert_eq!(summary.well_count, 0);
        assert_eq!(summary.total_profit, 0.0);
    }
}
