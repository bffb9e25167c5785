//! Token price x platform fee sensitivity sweep
//!
//! Every grid point is a full re-evaluation of the well batch. Points are
//! independent, so they are computed in parallel and collected back in
//! price-major, fee-minor order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::evaluator::{evaluate_well, validate_pricing, validate_wells, wells_missing_pna};
use crate::error::EngineError;
use crate::types::{PriceProfit, SensitivityCell, SensitivityReport, WellRecord};

/// Axis values for the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityGrid {
    pub token_prices: Vec<f64>,
    pub fee_rates: Vec<f64>,
}

impl Default for SensitivityGrid {
    /// $1-$30 in 10 steps, 1%-3% in 5 steps.
    fn default() -> Self {
        Self {
            token_prices: linspace(1.0, 30.0, 10),
            fee_rates: linspace(0.01, 0.03, 5),
        }
    }
}

impl SensitivityGrid {
    pub fn cell_count(&self) -> usize {
        self.token_prices.len() * self.fee_rates.len()
    }

    fn points(&self) -> Vec<(f64, f64)> {
        self.token_prices
            .iter()
            .flat_map(|&price| self.fee_rates.iter().map(move |&fee| (price, fee)))
            .collect()
    }
}

/// `steps` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f64;
            (0..steps)
                .map(|i| if i == steps - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Total portfolio profit at every grid point.
///
/// The batch precondition and every grid value are checked once up front;
/// nothing is computed if any check fails.
pub fn sensitivity_sweep(
    wells: &[WellRecord],
    grid: &SensitivityGrid,
) -> Result<SensitivityReport, EngineError> {
    validate_wells(wells)?;
    for &price in &grid.token_prices {
        for &fee in &grid.fee_rates {
            validate_pricing(price, fee)?;
        }
    }

    let missing = wells_missing_pna(wells);
    if !missing.is_empty() {
        warn!(
            wells = ?missing,
            "No P&A cost or depth supplied, swept profit is overstated"
        );
    }

    let cells: Vec<SensitivityCell> = grid
        .points()
        .into_par_iter()
        .map(|(token_price, path_fee_rate)| {
            let total_profit: f64 = wells
                .iter()
                .map(|w| evaluate_well(w, token_price, path_fee_rate).profit)
                .sum();
            SensitivityCell {
                token_price,
                path_fee_rate,
                total_profit,
                profitable: total_profit > 0.0,
            }
        })
        .collect();

    let price_curve = price_curve(&cells, grid);
    let breakeven_token_price = breakeven_price(&price_curve);

    debug!(
        cells = cells.len(),
        breakeven = ?breakeven_token_price,
        "Sensitivity sweep complete"
    );

    Ok(SensitivityReport {
        cells,
        price_curve,
        breakeven_token_price,
    })
}

/// Mean profit across fee rates for each token price, ascending by price.
fn price_curve(cells: &[SensitivityCell], grid: &SensitivityGrid) -> Vec<PriceProfit> {
    let per_price = grid.fee_rates.len().max(1);
    let mut curve: Vec<PriceProfit> = cells
        .chunks(per_price)
        .map(|chunk| PriceProfit {
            token_price: chunk[0].token_price,
            mean_profit: chunk.iter().map(|c| c.total_profit).sum::<f64>() / chunk.len() as f64,
        })
        .collect();
    curve.sort_by(|a, b| a.token_price.total_cmp(&b.token_price));
    curve
}

/// Token price where mean profit reaches zero, by linear interpolation
/// between the first pair of neighbouring points that bracket zero.
pub fn breakeven_price(curve: &[PriceProfit]) -> Option<f64> {
    if let Some(exact) = curve.iter().find(|p| p.mean_profit == 0.0) {
        return Some(exact.token_price);
    }
    curve.windows(2).find_map(|pair| {
        let (lo, hi) = (pair[0], pair[1]);
        if (lo.mean_profit < 0.0) == (hi.mean_profit < 0.0) {
            return None;
        }
        let t = -lo.mean_profit / (hi.mean_profit - lo.mean_profit);
        Some(lo.token_price + t * (hi.token_price - lo.token_price))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wells() -> Vec<WellRecord> {
        vec![
            WellRecord::new("Well-01", 15.0).with_costs(30_000.0, 5_000.0, 12_000.0, 1_000.0),
            WellRecord::new("Well-05", 12.0).with_costs(30_000.0, 5_000.0, 12_000.0, 1_000.0),
        ]
    }

    #[test]
    fn test_linspace_inclusive() {
        let v = linspace(1.0, 30.0, 10);
        assert_eq!(v.len(), 10);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[9], 30.0);
        assert!((v[1] - 4.222_222).abs() < 1e-5);
        assert_eq!(linspace(0.01, 0.03, 1), vec![0.01]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_default_grid_shape_and_order() {
        let grid = SensitivityGrid::default();
        let report = sensitivity_sweep(&wells(), &grid).unwrap();
        assert_eq!(report.cells.len(), 50);
        assert_eq!(report.cells[0].token_price, 1.0);
        assert_eq!(report.cells[0].path_fee_rate, 0.01);
        assert_eq!(report.cells[4].path_fee_rate, 0.03);
        assert_eq!(report.cells[5].token_price, grid.token_prices[1]);
        assert_eq!(report.price_curve.len(), 10);
    }

    #[test]
    fn test_cells_match_sequential_evaluation() {
        let grid = SensitivityGrid::default();
        let report = sensitivity_sweep(&wells(), &grid).unwrap();
        for cell in &report.cells {
            let rows = crate::economics::evaluate(&wells(), cell.token_price, cell.path_fee_rate).unwrap();
            let expected: f64 = rows.iter().map(|r| r.profit).sum();
            assert!((cell.total_profit - expected).abs() < 1e-6);
            assert_eq!(cell.profitable, expected > 0.0);
        }
    }

    #[test]
    fn test_sweep_runs_with_unresolved_pna_cost() {
        let mut unpriced = wells();
        unpriced[1].pna_cost = None;
        assert_eq!(wells_missing_pna(&unpriced), ["Well-05"]);

        let full = sensitivity_sweep(&wells(), &SensitivityGrid::default()).unwrap();
        let partial = sensitivity_sweep(&unpriced, &SensitivityGrid::default()).unwrap();
        for (f, p) in full.cells.iter().zip(&partial.cells) {
            assert!((p.total_profit - f.total_profit - 30_000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_breakeven_price_is_where_profit_crosses_zero() {
        let report = sensitivity_sweep(&wells(), &SensitivityGrid::default()).unwrap();
        let price = report.breakeven_token_price.unwrap();
        // Profit is linear in price, so interpolation is exact at the mean fee (2%)
        let rows = crate::economics::evaluate(&wells(), price, 0.02).unwrap();
        let profit: f64 = rows.iter().map(|r| r.profit).sum();
        assert!(profit.abs() < 1e-3, "profit at breakeven was {profit}");
    }

    #[test]
    fn test_no_breakeven_when_always_profitable() {
        let curve = [
            PriceProfit { token_price: 1.0, mean_profit: 10.0 },
            PriceProfit { token_price: 2.0, mean_profit: 20.0 },
        ];
        assert_eq!(breakeven_price(&curve), None);
    }

    #[test]
    fn test_sweep_rejects_invalid_batch() {
        let mut bad = wells();
        bad.push(WellRecord::new("", 10.0));
        assert!(sensitivity_sweep(&bad, &SensitivityGrid::default()).is_err());
    }

    #[test]
    fn test_sweep_rejects_invalid_grid() {
        let grid = SensitivityGrid {
            token_prices: vec![0.0, 10.0],
            fee_rates: vec![0.02],
        };
        assert!(matches!(
            sensitivity_sweep(&wells(), &grid),
            Err(EngineError::InvalidParameter { name: "token_price", .. })
        ));
    }
}
