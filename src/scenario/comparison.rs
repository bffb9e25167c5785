//! Scenario B against scenario A

use crate::types::{EconomicsRow, ScenarioComparison, WellComparison};

use super::ScenarioEvaluation;

/// Compare two evaluated scenarios.
///
/// Parameter deltas come from the scenario definitions; portfolio deltas are
/// B minus A. Wells are joined by name in A's order, followed by wells only
/// present in B.
pub fn compare_scenarios(
    a: &super::Scenario,
    eval_a: &ScenarioEvaluation,
    b: &super::Scenario,
    eval_b: &ScenarioEvaluation,
) -> ScenarioComparison {
    let mut wells: Vec<WellComparison> = eval_a
        .rows
        .iter()
        .map(|row_a| {
            let row_b = eval_b.rows.iter().find(|r| r.name == row_a.name);
            compare_well(&row_a.name, Some(row_a), row_b)
        })
        .collect();

    wells.extend(
        eval_b
            .rows
            .iter()
            .filter(|row_b| !eval_a.rows.iter().any(|r| r.name == row_b.name))
            .map(|row_b| compare_well(&row_b.name, None, Some(row_b))),
    );

    let (sa, sb) = (&eval_a.summary, &eval_b.summary);
    ScenarioComparison {
        label_a: a.label.clone(),
        label_b: b.label.clone(),
        token_price_delta: b.token_price - a.token_price,
        fee_rate_delta: b.path_fee_rate - a.path_fee_rate,
        credits_delta: sb.total_credits - sa.total_credits,
        profit_delta: sb.total_profit - sa.total_profit,
        cost_delta: sb.total_cost - sa.total_cost,
        npv_delta: eval_b.npv - eval_a.npv,
        wells,
    }
}

fn compare_well(name: &str, a: Option<&EconomicsRow>, b: Option<&EconomicsRow>) -> WellComparison {
    let profit_a = a.map(|r| r.profit);
    let profit_b = b.map(|r| r.profit);
    WellComparison {
        name: name.to_string(),
        profit_a,
        profit_b,
        credits_a: a.map(|r| r.credits),
        credits_b: b.map(|r| r.credits),
        breakeven_a: a.map(|r| r.breakeven_ratio),
        breakeven_b: b.map(|r| r.breakeven_ratio),
        profit_delta: profit_a.zip(profit_b).map(|(pa, pb)| pb - pa),
    }
}
