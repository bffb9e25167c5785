//! Per-well economics evaluation
//!
//! For each well, in order:
//! 1. Autofill P&A cost from depth when unset/zero
//! 2. Credits from leak rate
//! 3. Gross revenue, platform fee, net revenue
//! 4. Total cost, profit, breakeven ratio
//! 5. Risk flag (first matching rule)
//!
//! The whole batch is validated before anything is computed.

use tracing::{debug, info, warn};

use super::pna::resolve_pna_cost;
use super::risk::classify_risk;
use crate::credits::calc_credits;
use crate::error::{EngineError, WellIssue};
use crate::types::{EconomicsRow, PnaCostSource, WellRecord};

/// Evaluate a batch of wells at the given token price ($/tCO2e) and platform
/// fee rate (fraction of gross revenue).
///
/// Fails with [`EngineError::Validation`] listing every invalid well if any
/// well has an empty name or a leak rate below 0.1 L/min; no rows are produced
/// in that case.
pub fn evaluate(
    wells: &[WellRecord],
    token_price: f64,
    path_fee_rate: f64,
) -> Result<Vec<EconomicsRow>, EngineError> {
    validate_pricing(token_price, path_fee_rate)?;
    validate_wells(wells)?;

    let rows: Vec<EconomicsRow> = wells
        .iter()
        .map(|well| evaluate_well(well, token_price, path_fee_rate))
        .collect();

    for row in rows.iter().filter(|r| r.has_missing_pna_cost()) {
        warn!(well = %row.name, "No P&A cost or depth supplied, total cost is understated");
    }

    info!(
        wells = rows.len(),
        token_price,
        path_fee_rate,
        missing_pna = rows.iter().filter(|r| r.has_missing_pna_cost()).count(),
        "Economics evaluated"
    );
    Ok(rows)
}

/// Check the batch precondition, reporting every offending well.
pub fn validate_wells(wells: &[WellRecord]) -> Result<(), EngineError> {
    let issues: Vec<WellIssue> = wells
        .iter()
        .enumerate()
        .filter_map(|(i, well)| {
            well.validity_issue().map(|reason| WellIssue {
                position: i + 1,
                name: well.name.clone(),
                reason,
            })
        })
        .collect();

    if issues.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation(issues))
    }
}

/// Token price must be positive; fee rate is a fraction in `[0, 1]`.
pub fn validate_pricing(token_price: f64, path_fee_rate: f64) -> Result<(), EngineError> {
    if !token_price.is_finite() || token_price <= 0.0 {
        return Err(EngineError::InvalidParameter {
            name: "token_price",
            value: token_price,
            reason: "must be a finite value > 0",
        });
    }
    if !(0.0..=1.0).contains(&path_fee_rate) {
        return Err(EngineError::InvalidParameter {
            name: "path_fee_rate",
            value: path_fee_rate,
            reason: "must be a fraction between 0 and 1",
        });
    }
    Ok(())
}

/// Evaluate a single well. Does not check validity; use [`evaluate`] for
/// batches.
pub fn evaluate_well(well: &WellRecord, token_price: f64, path_fee_rate: f64) -> EconomicsRow {
    let (pna_cost, pna_cost_source) = resolve_well_pna(well);

    let credits = calc_credits(well.leak_rate_lpm);
    let gross_revenue = credits * token_price;
    let fee_amount = gross_revenue * path_fee_rate;
    let net_revenue = gross_revenue - fee_amount;
    let total_cost = pna_cost + well.reclamation_cost + well.sensor_cost + well.other_cost;
    let profit = net_revenue - total_cost;
    let breakeven = breakeven_ratio(total_cost, net_revenue);
    let risk_flag = classify_risk(breakeven, well.leak_rate_lpm);

    debug!(
        well = %well.name,
        credits,
        net_revenue,
        total_cost,
        breakeven,
        risk = %risk_flag,
        "Well evaluated"
    );

    EconomicsRow {
        name: well.name.clone(),
        county: well.county.clone(),
        leak_rate_lpm: well.leak_rate_lpm,
        pna_cost,
        pna_cost_source,
        credits,
        gross_revenue,
        fee_amount,
        net_revenue,
        total_cost,
        profit,
        breakeven_ratio: breakeven,
        risk_flag,
    }
}

/// `total_cost / net_revenue`, with zero net revenue mapped to
/// `f64::INFINITY` so it always classifies as non-viable.
pub fn breakeven_ratio(total_cost: f64, net_revenue: f64) -> f64 {
    if net_revenue == 0.0 {
        f64::INFINITY
    } else {
        total_cost / net_revenue
    }
}

/// P&A cost to use for a well and where it came from.
///
/// An explicit non-zero cost is never overridden. An explicit zero with no
/// known depth stays zero and is reported as missing.
fn resolve_well_pna(well: &WellRecord) -> (f64, PnaCostSource) {
    if let Some(cost) = well.declared_pna_cost() {
        return (cost, PnaCostSource::Declared);
    }
    match resolve_pna_cost(well.known_depth()) {
        Some(cost) => (cost, PnaCostSource::DepthPreset),
        None => (0.0, PnaCostSource::Missing),
    }
}

/// Names of wells with neither a P&A cost nor a depth to fill one from.
pub fn wells_missing_pna(wells: &[WellRecord]) -> Vec<&str> {
    wells
        .iter()
        .filter(|w| resolve_well_pna(w).1 == PnaCostSource::Missing)
        .map(|w| w.name.as_str())
        .collect()
}
