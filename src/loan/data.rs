//! Loan parameter structures matching the calculator's JSON payload

use crate::error::LoanError;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn default_rate_value() -> f64 {
    15.0
}

fn default_term() -> u32 {
    12
}

fn default_insurance() -> f64 {
    0.05
}

fn default_fixed_fee() -> f64 {
    5.0
}

fn default_extra_payment_month() -> u32 {
    1
}

fn default_start_date() -> NaiveDate {
    Local::now().date_naive()
}

/// How the quoted rate is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// Monthly effective rate (TEM)
    Monthly,
    /// Annual effective rate (TEA)
    #[default]
    Annual,
}

/// Unit of the requested term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermUnit {
    #[default]
    Months,
    Years,
}

/// Treatment of carrying costs during the grace months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraceType {
    /// Interest, insurance and fee are paid in cash; no capital is repaid
    #[default]
    Partial,
    /// Everything is capitalized; no cash changes hands
    Total,
}

/// What happens to the schedule after an extra payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepaymentStrategy {
    /// Keep the installment, finish earlier
    #[default]
    ReduceTerm,
    /// Keep the term, lower the installment
    ReduceQuota,
}

impl RateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::Monthly => "monthly",
            RateType::Annual => "annual",
        }
    }
}

impl TermUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermUnit::Months => "months",
            TermUnit::Years => "years",
        }
    }
}

impl GraceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraceType::Partial => "partial",
            GraceType::Total => "total",
        }
    }
}

impl PrepaymentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrepaymentStrategy::ReduceTerm => "reduce_term",
            PrepaymentStrategy::ReduceQuota => "reduce_quota",
        }
    }
}

macro_rules! impl_text_enum {
    ($ty:ty, $field:literal, [$($text:literal => $variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = LoanError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($variant),)+
                    _ => Err(LoanError::invalid_field($field, s)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_text_enum!(RateType, "rateType", [
    "monthly" => RateType::Monthly,
    "annual" => RateType::Annual,
]);

impl_text_enum!(TermUnit, "termUnit", [
    "months" => TermUnit::Months,
    "years" => TermUnit::Years,
]);

impl_text_enum!(GraceType, "graceType", [
    "partial" => GraceType::Partial,
    "total" => GraceType::Total,
]);

impl_text_enum!(PrepaymentStrategy, "extraPaymentStrategy", [
    "reduce_term" => PrepaymentStrategy::ReduceTerm,
    "reduce_quota" => PrepaymentStrategy::ReduceQuota,
]);

/// Inputs for a single schedule computation
///
/// Values are taken as given: rates and percentages are in percent (15 means 15%),
/// currency amounts are in plain units. Nothing here is validated beyond what the
/// engine guards against numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    /// Principal disbursed
    pub amount: f64,

    #[serde(default)]
    pub rate_type: RateType,

    /// Rate in percent, interpreted per `rate_type`
    #[serde(default = "default_rate_value")]
    pub rate_value: f64,

    #[serde(default = "default_term")]
    pub term: u32,

    #[serde(default)]
    pub term_unit: TermUnit,

    /// Grace window in whole months
    #[serde(default)]
    pub grace_period: u32,

    #[serde(default)]
    pub grace_type: GraceType,

    /// Days between disbursement and the first period, capitalized once
    #[serde(default)]
    pub grace_days: u32,

    /// Monthly insurance as a percent of the outstanding balance
    #[serde(default = "default_insurance")]
    pub insurance: f64,

    /// Flat fee charged every period
    #[serde(default = "default_fixed_fee")]
    pub fixed_fee: f64,

    /// Installments already paid; informational only
    #[serde(default)]
    pub paid_installments: u32,

    #[serde(default)]
    pub extra_payment_amount: f64,

    /// 1-based period in which the extra payment is made
    #[serde(default = "default_extra_payment_month")]
    pub extra_payment_month: u32,

    #[serde(default)]
    pub extra_payment_strategy: PrepaymentStrategy,

    /// Disbursement date
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            amount: 10_000.0,
            rate_type: RateType::Annual,
            rate_value: default_rate_value(),
            term: default_term(),
            term_unit: TermUnit::Months,
            grace_period: 0,
            grace_type: GraceType::Partial,
            grace_days: 0,
            insurance: default_insurance(),
            fixed_fee: default_fixed_fee(),
            paid_installments: 0,
            extra_payment_amount: 0.0,
            extra_payment_month: default_extra_payment_month(),
            extra_payment_strategy: PrepaymentStrategy::ReduceTerm,
            start_date: default_start_date(),
        }
    }
}

impl LoanParameters {
    /// Term expressed in months
    pub fn total_months(&self) -> u32 {
        match self.term_unit {
            TermUnit::Months => self.term,
            TermUnit::Years => self.term.saturating_mul(12),
        }
    }

    /// Monthly insurance as a fraction of the balance
    pub fn insurance_rate(&self) -> f64 {
        self.insurance / 100.0
    }

    /// True when an extra payment has been requested
    pub fn has_extra_payment(&self) -> bool {
        self.extra_payment_amount > 0.0
    }

    /// Period right after the last paid installment
    pub fn suggested_extra_payment_month(&self) -> u32 {
        self.paid_installments + 1
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_rate(mut self, rate_type: RateType, rate_value: f64) -> Self {
        self.rate_type = rate_type;
        self.rate_value = rate_value;
        self
    }

    pub fn with_term(mut self, term: u32, term_unit: TermUnit) -> Self {
        self.term = term;
        self.term_unit = term_unit;
        self
    }

    pub fn with_grace(mut self, grace_period: u32, grace_type: GraceType) -> Self {
        self.grace_period = grace_period;
        self.grace_type = grace_type;
        self
    }

    pub fn with_grace_days(mut self, grace_days: u32) -> Self {
        self.grace_days = grace_days;
        self
    }

    pub fn with_charges(mut self, insurance: f64, fixed_fee: f64) -> Self {
        self.insurance = insurance;
        self.fixed_fee = fixed_fee;
        self
    }

    /// Moving the cursor also moves the extra payment to the next open period
    pub fn with_paid_installments(mut self, paid_installments: u32) -> Self {
        self.paid_installments = paid_installments;
        self.extra_payment_month = self.suggested_extra_payment_month();
        self
    }

    pub fn with_extra_payment(mut self, amount: f64, month: u32) -> Self {
        self.extra_payment_amount = amount;
        self.extra_payment_month = month;
        self
    }

    pub fn with_extra_payment_amount(mut self, amount: f64) -> Self {
        self.extra_payment_amount = amount;
        self
    }

    pub fn with_strategy(mut self, strategy: PrepaymentStrategy) -> Self {
        self.extra_payment_strategy = strategy;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_months_from_years() {
        let params = LoanParameters::default().with_term(3, TermUnit::Years);
        assert_eq!(params.total_months(), 36);

        let params = LoanParameters::default().with_term(18, TermUnit::Months);
        assert_eq!(params.total_months(), 18);
    }

    #[test]
    fn test_overrides_leave_original_untouched() {
        let base = LoanParameters::default().with_extra_payment(500.0, 3);
        let baseline = base.clone().with_extra_payment_amount(0.0);

        assert_eq!(base.extra_payment_amount, 500.0);
        assert_eq!(baseline.extra_payment_amount, 0.0);
        assert_eq!(baseline.extra_payment_month, 3);
    }

    #[test]
    fn test_paid_installments_moves_extra_month() {
        let params = LoanParameters::default().with_paid_installments(4);
        assert_eq!(params.paid_installments, 4);
        assert_eq!(params.extra_payment_month, 5);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Monthly".parse::<RateType>().unwrap(), RateType::Monthly);
        assert_eq!(" years ".parse::<TermUnit>().unwrap(), TermUnit::Years);
        assert_eq!("total".parse::<GraceType>().unwrap(), GraceType::Total);
        assert_eq!(
            "reduce_quota".parse::<PrepaymentStrategy>().unwrap(),
            PrepaymentStrategy::ReduceQuota
        );

        let err = "weekly".parse::<RateType>().unwrap_err();
        assert!(err.to_string().contains("rateType"));
    }

    #[test]
    fn test_json_payload_uses_calculator_names() {
        let json = r#"{
            "amount": 5000,
            "rateType": "monthly",
            "rateValue": 2.5,
            "term": 2,
            "termUnit": "years",
            "graceType": "total",
            "extraPaymentStrategy": "reduce_quota",
            "startDate": "2024-03-15"
        }"#;

        let params: LoanParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.amount, 5000.0);
        assert_eq!(params.rate_type, RateType::Monthly);
        assert_eq!(params.total_months(), 24);
        assert_eq!(params.grace_type, GraceType::Total);
        assert_eq!(params.extra_payment_strategy, PrepaymentStrategy::ReduceQuota);
        assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        // Defaults fill the rest
        assert_eq!(params.fixed_fee, 5.0);
        assert_eq!(params.extra_payment_month, 1);
    }
}
