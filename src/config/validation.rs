//! Config validation: unknown-key detection with edit-distance suggestions
//! and range checks on pricing, schedule and sweep parameters.
//!
//! Unknown keys are found by walking the raw `toml::Value` tree before serde
//! sees it. They only produce warnings, so a typo never stops a run, but it
//! does not silently fall back to a default either.

use std::collections::HashSet;

use super::EngineConfig;
use crate::economics::MAX_SCHEDULE_MONTH;

/// A non-fatal config warning (typo, unusual value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path in `EngineConfig`.
///
/// Kept in step with the structs in engine_config.rs by hand.
pub fn known_config_keys() -> HashSet<&'static str> {
    [
        // [pricing]
        "pricing",
        "pricing.token_price",
        "pricing.path_fee_rate",
        "pricing.discount_rate",
        // [cash_flow]
        "cash_flow",
        "cash_flow.capital_month",
        "cash_flow.fee_month",
        "cash_flow.revenue_month",
        // [credits]
        "credits",
        "credits.gwp",
        "credits.crediting_period_years",
        // [sensitivity]
        "sensitivity",
        "sensitivity.token_price_min",
        "sensitivity.token_price_max",
        "sensitivity.token_price_steps",
        "sensitivity.fee_rate_min",
        "sensitivity.fee_rate_max",
        "sensitivity.fee_rate_steps",
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Collect the dotted path of every key in a TOML tree, tables included.
///
/// `{ a = { b = 1 } }` yields `["a", "a.b"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };
    table
        .iter()
        .flat_map(|(key, child)| {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            let nested = walk_toml_keys(child, &path);
            std::iter::once(path).chain(nested)
        })
        .collect()
}

// ============================================================================
// Suggestions
// ============================================================================

/// Levenshtein edit distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diag + usize::from(ca != cb);
            row[j + 1] = substitution.min(above + 1).min(row[j] + 1);
            diag = above;
        }
    }

    row[b_chars.len()]
}

/// Closest known key within edit distance 3. Ties go to the
/// alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

/// Warnings for every key in `raw_toml` that `EngineConfig` does not know.
///
/// Unparseable input yields no warnings; serde reports the parse error.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Check value ranges on a parsed config.
///
/// Returns (errors, warnings). Errors are values the engine would reject
/// at evaluation time; warnings are legal but unusual.
pub fn validate_ranges(config: &EngineConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let p = &config.pricing;

    if !(p.token_price.is_finite() && p.token_price > 0.0) {
        errors.push(format!("pricing.token_price = {} must be a finite value > 0", p.token_price));
    }

    if !(0.0..=1.0).contains(&p.path_fee_rate) {
        errors.push(format!("pricing.path_fee_rate = {} must be within 0-1", p.path_fee_rate));
    } else if p.path_fee_rate > 0.10 {
        warnings.push(ValidationWarning {
            field: "pricing.path_fee_rate".to_string(),
            message: format!(
                "path_fee_rate = {:.3} is above the typical range (0-10% of gross revenue)",
                p.path_fee_rate
            ),
            suggestion: None,
        });
    }

    // r <= -1 makes (1 + r)^t zero or negative
    if !(p.discount_rate.is_finite() && p.discount_rate > -1.0) {
        errors.push(format!("pricing.discount_rate = {} must be finite and > -1", p.discount_rate));
    } else if p.discount_rate > 0.5 {
        warnings.push(ValidationWarning {
            field: "pricing.discount_rate".to_string(),
            message: format!("discount_rate = {:.2} is unusually high (> 50% per period)", p.discount_rate),
            suggestion: None,
        });
    }

    let c = &config.credits;
    if !(c.gwp.is_finite() && c.gwp > 0.0) {
        errors.push(format!("credits.gwp = {} must be a finite value > 0", c.gwp));
    }
    if !(c.crediting_period_years.is_finite() && c.crediting_period_years > 0.0) {
        errors.push(format!(
            "credits.crediting_period_years = {} must be a finite value > 0",
            c.crediting_period_years
        ));
    }

    let cf = &config.cash_flow;
    for (key, month) in [
        ("capital_month", cf.capital_month),
        ("fee_month", cf.fee_month),
        ("revenue_month", cf.revenue_month),
    ] {
        if month > MAX_SCHEDULE_MONTH {
            errors.push(format!("cash_flow.{key} = {month} must be at most {MAX_SCHEDULE_MONTH}"));
        }
    }

    let s = &config.sensitivity;
    check_sweep_axis(
        "token_price",
        s.token_price_min,
        s.token_price_max,
        s.token_price_steps,
        &mut errors,
    );
    if s.token_price_min <= 0.0 {
        errors.push(format!("sensitivity.token_price_min = {} must be > 0", s.token_price_min));
    }
    check_sweep_axis("fee_rate", s.fee_rate_min, s.fee_rate_max, s.fee_rate_steps, &mut errors);
    if s.fee_rate_min < 0.0 || s.fee_rate_max > 1.0 {
        errors.push(format!(
            "sensitivity fee_rate range {}..{} must lie within 0-1",
            s.fee_rate_min, s.fee_rate_max
        ));
    }

    (errors, warnings)
}

fn check_sweep_axis(axis: &str, min: f64, max: f64, steps: usize, errors: &mut Vec<String>) {
    if !(min.is_finite() && max.is_finite()) {
        errors.push(format!("sensitivity.{axis} bounds must be finite"));
    } else if min > max {
        errors.push(format!("sensitivity.{axis}_min = {min} is greater than {axis}_max = {max}"));
    }
    if steps < 2 {
        errors.push(format!("sensitivity.{axis}_steps = {steps} must be at least 2"));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("pricing", "pricing"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("gwp", "gp"), 1);
        assert_eq!(levenshtein("kitten", "sitten"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let value: toml::Value = "[pricing]\ntoken_price = 20.0\n".parse().unwrap();
        let keys = walk_toml_keys(&value, "");
        assert_eq!(keys, vec!["pricing".to_string(), "pricing.token_price".to_string()]);
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys("[pricing]\ntoken_prise = 25.0\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "pricing.token_prise");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("pricing.token_price"));
        assert!(warnings[0].to_string().contains("did you mean"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[pricing]
token_price = 20.0
path_fee_rate = 0.02

[cash_flow]
revenue_month = 3

[sensitivity]
fee_rate_steps = 4
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_unknown_section_without_suggestion() {
        let warnings = validate_unknown_keys("[dashboard]\ntheme = \"dark\"\n");
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.suggestion.is_none()));
    }

    #[test]
    fn test_defaults_clean() {
        let (errors, warnings) = validate_ranges(&EngineConfig::default());
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_fee_rate_out_of_range() {
        let mut config = EngineConfig::default();
        config.pricing.path_fee_rate = 1.5;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("path_fee_rate")));
    }

    #[test]
    fn test_high_fee_rate_is_warning_only() {
        let mut config = EngineConfig::default();
        config.pricing.path_fee_rate = 0.25;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_discount_rate_floor() {
        let mut config = EngineConfig::default();
        config.pricing.discount_rate = -1.0;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("discount_rate")));
    }

    #[test]
    fn test_cash_flow_month_limit() {
        let mut config = EngineConfig::default();
        config.cash_flow.revenue_month = MAX_SCHEDULE_MONTH;
        assert!(validate_ranges(&config).0.is_empty());
        config.cash_flow.revenue_month = MAX_SCHEDULE_MONTH + 1;
        let (errors, _) = validate_ranges(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("cash_flow.revenue_month"));
    }

    #[test]
    fn test_sweep_inverted_bounds_and_steps() {
        let mut config = EngineConfig::default();
        config.sensitivity.token_price_min = 40.0;
        config.sensitivity.fee_rate_steps = 1;
        let (errors, _) = validate_ranges(&config);
        assert_eq!(errors.len(), 2, "{errors:?}");
    }
}
