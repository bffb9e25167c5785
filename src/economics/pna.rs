//! Depth-based plug & abandon cost presets

/// Preset P&A cost per depth bucket, ascending by upper bound (ft).
/// The last bucket is unbounded.
pub const DEPTH_COST_PRESETS: [(f64, f64); 3] = [
    (2_000.0, 30_000.0),
    (5_000.0, 55_000.0),
    (f64::INFINITY, 80_000.0),
];

/// Resolve a P&A cost from well depth.
///
/// Returns the preset of the first bucket whose upper bound is `>= depth`.
/// `None` (or NaN) depth yields `None`: the caller must leave its cost
/// untouched rather than substituting zero.
pub fn resolve_pna_cost(depth_ft: Option<f64>) -> Option<f64> {
    let depth = depth_ft.filter(|d| !d.is_nan())?;
    let cost = DEPTH_COST_PRESETS
        .iter()
        .find(|(upper, _)| depth <= *upper)
        .map_or(DEPTH_COST_PRESETS[DEPTH_COST_PRESETS.len() - 1].1, |(_, cost)| *cost);
    Some(cost)
}
