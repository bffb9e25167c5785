//! Net present value

/// Discount a cash flow sequence to present value.
///
/// `NPV = Σ flows[i] / (1 + rate)^i`; the first flow is at period 0 and is
/// not discounted. `rate` is a fraction per period (0.08 = 8%); zero and
/// negative rates are accepted.
pub fn npv(discount_rate: f64, cash_flows: &[f64]) -> f64 {
    let factor = 1.0 + discount_rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(i, flow)| flow / factor.powi(i as i32))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npv_at_eight_percent() {
        let flows = [-48_000.0, -882.0, 43_217.0];
        let expected = -48_000.0 + (-882.0 / 1.08) + (43_217.0 / (1.08 * 1.08));
        assert!((npv(0.08, &flows) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate_is_plain_sum() {
        let flows = [-48_000.0, -882.0, 43_217.0, 12.5];
        assert_eq!(npv(0.0, &flows), flows.iter().sum::<f64>());
    }

    #[test]
    fn test_negative_rate_inflates_later_flows() {
        let flows = [0.0, 100.0];
        assert!((npv(-0.5, &flows) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_flows() {
        assert_eq!(npv(0.08, &[]), 0.0);
    }
}
