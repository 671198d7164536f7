//! Fixed installment (annuity) for a principal, a periodic rate and a number of periods

/// Fixed periodic payment that amortizes `principal` over `periods` at `combined_rate`
///
/// `combined_rate` is interest plus insurance per period. The flat fee is not part
/// of the annuity. Returns 0 for non-positive principal or period count and falls
/// back to straight-line repayment when the rate is exactly zero.
pub fn annuity(principal: f64, periods: i64, combined_rate: f64) -> f64 {
    if periods <= 0 || principal <= 0.0 {
        return 0.0;
    }

    let n = periods as f64;
    if combined_rate == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + combined_rate).powf(n);
    principal * combined_rate * growth / (growth - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_guards_return_zero() {
        assert_eq!(annuity(1000.0, 0, 0.01), 0.0);
        assert_eq!(annuity(1000.0, -3, 0.01), 0.0);
        assert_eq!(annuity(0.0, 12, 0.01), 0.0);
        assert_eq!(annuity(-50.0, 12, 0.01), 0.0);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_relative_eq!(annuity(1200.0, 12, 0.0), 100.0);
    }

    #[test]
    fn test_known_payment() {
        // 100k over 360 months at 0.5%/month
        assert_relative_eq!(annuity(100_000.0, 360, 0.005), 599.55, epsilon = 0.01);
    }

    #[test]
    fn test_single_period_repays_with_interest() {
        assert_relative_eq!(annuity(1000.0, 1, 0.02), 1020.0, epsilon = 1e-9);
    }
}
