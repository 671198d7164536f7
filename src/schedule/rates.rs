//! Conversion between monthly (TEM) and annual (TEA) effective rates

use crate::loan::RateType;

/// Months per year used for effective-rate compounding
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Days per month used for sub-monthly capitalization
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Monthly and annual effective rates, both as fractions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRates {
    pub monthly: f64,
    pub annual: f64,
}

impl EffectiveRates {
    /// Normalize a quoted percentage into both effective rates
    ///
    /// Whichever rate is quoted is canonical and the other is derived from it,
    /// so `(1 + monthly)^12 - 1 == annual` always holds. Zero and negative
    /// rates pass through unchanged.
    pub fn normalize(rate_type: RateType, rate_value: f64) -> Self {
        match rate_type {
            RateType::Monthly => {
                let monthly = rate_value / 100.0;
                Self {
                    monthly,
                    annual: (1.0 + monthly).powf(MONTHS_PER_YEAR) - 1.0,
                }
            }
            RateType::Annual => {
                let annual = rate_value / 100.0;
                Self {
                    monthly: (1.0 + annual).powf(1.0 / MONTHS_PER_YEAR) - 1.0,
                    annual,
                }
            }
        }
    }

    /// Daily rate assuming a 30-day month
    pub fn daily(&self) -> f64 {
        (1.0 + self.monthly).powf(1.0 / DAYS_PER_MONTH) - 1.0
    }
}
