//! Pre-amortization capitalization: grace days and grace months
//!
//! Produces the balance on which the fixed installment is computed. The grace
//! months are only forecast here; the cash side of each grace month is recorded
//! by the period simulator.

use crate::loan::GraceType;

/// Balances that anchor the amortization phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capitalization {
    /// Principal after daily capitalization of the grace days
    pub opening_balance: f64,

    /// Balance at the start of the amortization phase
    pub forecast_balance: f64,

    /// Periods left for amortization once the grace months are over
    pub amortization_months: i64,
}

/// Grow `amount` by `grace_days` of daily compounding at `daily_rate`
pub fn capitalize_days(amount: f64, daily_rate: f64, grace_days: u32) -> f64 {
    amount * (1.0 + daily_rate).powf(grace_days as f64)
}

/// Inputs that drive the pre-amortization phase
#[derive(Debug, Clone, Copy)]
pub struct GraceTerms {
    pub monthly_rate: f64,
    pub daily_rate: f64,
    pub insurance_rate: f64,
    pub fixed_fee: f64,
    pub grace_days: u32,
    pub grace_period: u32,
    pub grace_type: GraceType,
    pub total_months: u32,
}

impl GraceTerms {
    /// Run the daily offset and then forecast each grace month
    pub fn capitalize(&self, amount: f64) -> Capitalization {
        let opening_balance = capitalize_days(amount, self.daily_rate, self.grace_days);

        let mut forecast_balance = opening_balance;
        if self.grace_type == GraceType::Total {
            for _ in 0..self.grace_period {
                let interest = forecast_balance * self.monthly_rate;
                let insurance = forecast_balance * self.insurance_rate;
                forecast_balance += interest + insurance + self.fixed_fee;
            }
        }

        Capitalization {
            opening_balance,
            forecast_balance,
            amortization_months: self.total_months as i64 - self.grace_period as i64,
        }
    }
}
