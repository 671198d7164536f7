//! Schedule output structures

use super::irr::calculate_irr;
use crate::scenario::ScenarioComparison;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Difference between first and current installment that counts as a change
pub const PAYMENT_CHANGE_THRESHOLD: f64 = 1.0;

/// A single period of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    pub period: u32,
    pub date: NaiveDate,
    pub interest: f64,
    /// Capital repaid; negative while costs are capitalized
    pub amortization: f64,
    pub insurance: f64,
    pub fee: f64,
    /// Cash paid in the period, extra payment included
    pub payment: f64,
    /// Closing balance
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_payment: Option<f64>,
}

impl PaymentRow {
    /// Whether this installment is covered by the paid-installments cursor
    pub fn is_paid(&self, paid_installments: u32) -> bool {
        self.period <= paid_installments
    }
}

/// Totals and rates for one computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSummary {
    pub total_interest: f64,
    pub total_payment: f64,
    /// TEM as a fraction
    pub monthly_rate: f64,
    /// TEA as a fraction
    pub annual_rate: f64,
    /// Installment plus fee as originally scheduled
    pub first_payment: f64,
    /// Installment plus fee after any recalculation
    pub regular_payment: f64,
    /// Last period actually emitted
    pub new_term: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ScenarioComparison>,
}

impl CalculationSummary {
    pub fn payment_changed(&self) -> bool {
        (self.first_payment - self.regular_payment).abs() > PAYMENT_CHANGE_THRESHOLD
    }
}

/// Where the borrower's money goes over the life of the loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub capital: f64,
    pub interest: f64,
    pub insurance_and_fees: f64,
}

/// Schedule plus summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Disbursement date
    pub start_date: NaiveDate,
    pub schedule: Vec<PaymentRow>,
    pub summary: CalculationSummary,
}

impl CalculationResult {
    /// Balance left after `paid_installments` periods
    ///
    /// Cursor 0 means nothing has been paid yet; a cursor beyond the schedule
    /// means the loan is already closed.
    pub fn outstanding_balance(&self, paid_installments: u32, amount: f64) -> f64 {
        if paid_installments == 0 {
            return amount;
        }

        self.schedule
            .iter()
            .find(|row| row.period == paid_installments)
            .map(|row| row.balance)
            .unwrap_or(0.0)
    }

    pub fn cost_breakdown(&self) -> CostBreakdown {
        CostBreakdown {
            capital: self.schedule.iter().map(|r| r.amortization).sum(),
            interest: self.summary.total_interest,
            insurance_and_fees: self.schedule.iter().map(|r| r.insurance + r.fee).sum(),
        }
    }

    /// Annualized internal rate of the borrower's cash flows
    ///
    /// Insurance and fees are included, so this is the all-in cost of the loan.
    pub fn effective_annual_cost(&self, amount: f64) -> Option<f64> {
        let mut cashflows = Vec::with_capacity(self.schedule.len() + 1);
        cashflows.push(amount);
        cashflows.extend(self.schedule.iter().map(|r| -r.payment));
        calculate_irr(&cashflows, 12)
    }

    pub fn final_balance(&self) -> f64 {
        self.schedule.last().map(|r| r.balance).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{LoanParameters, PrepaymentStrategy, RateType, TermUnit};
    use crate::schedule::compute_schedule;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn params() -> LoanParameters {
        LoanParameters::default()
            .with_amount(10_000.0)
            .with_rate(RateType::Annual, 15.0)
            .with_term(12, TermUnit::Months)
            .with_charges(0.0, 0.0)
            .with_start_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    }

    #[test]
    fn test_outstanding_balance_follows_cursor() {
        let result = compute_schedule(&params());

        assert_eq!(result.outstanding_balance(0, 10_000.0), 10_000.0);
        assert_eq!(result.outstanding_balance(3, 10_000.0), result.schedule[2].balance);
        assert_eq!(result.outstanding_balance(40, 10_000.0), 0.0);

        assert!(result.schedule[2].is_paid(3));
        assert!(!result.schedule[3].is_paid(3));
    }

    #[test]
    fn test_cost_breakdown() {
        let params = params().with_charges(0.05, 5.0);
        let result = compute_schedule(&params);
        let costs = result.cost_breakdown();

        assert_abs_diff_eq!(costs.capital, 10_000.0, epsilon = 1e-6);
        assert_relative_eq!(costs.interest, result.summary.total_interest);
        assert!(costs.insurance_and_fees > 12.0 * 5.0);
        assert_abs_diff_eq!(
            costs.capital + costs.interest + costs.insurance_and_fees,
            result.summary.total_payment,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_payment_changed_only_after_recalculation() {
        let unchanged = compute_schedule(&params().with_extra_payment(2000.0, 4));
        assert!(!unchanged.summary.payment_changed());

        let changed = compute_schedule(
            &params()
                .with_extra_payment(2000.0, 4)
                .with_strategy(PrepaymentStrategy::ReduceQuota),
        );
        assert!(changed.summary.payment_changed());
    }

    #[test]
    fn test_effective_cost_matches_rate_without_charges() {
        let result = compute_schedule(&params());
        let cost = result.effective_annual_cost(10_000.0).unwrap();
        assert_abs_diff_eq!(cost, 0.15, epsilon = 1e-6);

        let charged = compute_schedule(&params().with_charges(0.05, 5.0));
        assert!(charged.effective_annual_cost(10_000.0).unwrap() > 0.15);
    }

    #[test]
    fn test_serialized_field_names() {
        let result = compute_schedule(&params().with_extra_payment(1000.0, 2));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["startDate"], "2024-01-15");
        assert_eq!(json["schedule"][0]["date"], "2024-02-15");
        assert!(json["schedule"][0].get("extraPayment").is_none());
        assert_eq!(json["schedule"][1]["extraPayment"], 1000.0);
        assert!(json["summary"]["comparison"]["reduceTerm"]["savings"].is_number());
        assert!(json["summary"]["firstPayment"].is_number());
        assert!(json["summary"]["newTerm"].is_number());

        let parsed: CalculationResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.schedule.len(), result.schedule.len());
    }
}
