//! Internal rate of return of a loan's cash flows
//!
//! Used for the all-in effective annual cost (interest, insurance and fees).

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;
const MIN_PERIODIC_RATE: f64 = -0.99;
const MAX_PERIODIC_RATE: f64 = 10.0;

/// Annualized IRR of evenly spaced cash flows
///
/// # Arguments
/// * `cashflows` - Flows per period, `cashflows[0]` at time zero (positive = received, negative = paid)
/// * `periods_per_year` - Number of periods per year (12 for monthly)
///
/// # Returns
/// * `Option<f64>` - Annual rate as a decimal (e.g., 0.18 for 18%), or None when the flows never
///   change sign or no root is found in the search interval
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < TOLERANCE) {
        return Some(0.0);
    }

    let has_inflow = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_outflow = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_inflow || !has_outflow {
        return None;
    }

    let mut rate = 0.01;
    for _ in 0..MAX_ITERATIONS {
        let (npv, slope) = npv_and_slope(cashflows, rate);
        if slope.abs() < 1e-20 {
            break;
        }

        let next = (rate - npv / slope).clamp(MIN_PERIODIC_RATE, MAX_PERIODIC_RATE);
        if (next - rate).abs() < TOLERANCE {
            return Some(annualize(next, periods_per_year));
        }
        rate = next;
    }

    bisect(cashflows).map(|r| annualize(r, periods_per_year))
}

fn annualize(periodic: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic).powi(periods_per_year as i32) - 1.0
}

fn npv_and_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(npv, slope), (t, &cf)| {
            let discount = (1.0 + rate).powi(t as i32);
            (
                npv + cf / discount,
                slope - t as f64 * cf / (discount * (1.0 + rate)),
            )
        })
}

fn npv_at(cashflows: &[f64], rate: f64) -> f64 {
    npv_and_slope(cashflows, rate).0
}

fn bisect(cashflows: &[f64]) -> Option<f64> {
    let mut low = MIN_PERIODIC_RATE;
    let mut high = MAX_PERIODIC_RATE;
    let mut npv_low = npv_at(cashflows, low);

    if npv_low * npv_at(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}
