//! Prepayment scenario comparison and batch evaluation
//!
//! A comparison re-runs the engine three times on modified copies of the
//! caller's parameters: without the extra payment, with "reduce term" and with
//! "reduce quota". The caller's parameters are never touched.

use crate::loan::{LoanParameters, PrepaymentStrategy};
use crate::schedule::{compute_schedule, CalculationResult, ScheduleEngine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Headline figures of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioMetrics {
    pub total_payment: f64,
    pub total_interest: f64,
    /// Periods until payoff
    pub term: u32,
    pub regular_payment: f64,
    /// Total paid without prepayment minus total paid in this scenario
    pub savings: f64,
}

impl ScenarioMetrics {
    fn from_result(result: &CalculationResult, requested_term: u32, regular_payment: f64, baseline_total: f64) -> Self {
        let summary = &result.summary;
        Self {
            total_payment: summary.total_payment,
            total_interest: summary.total_interest,
            term: if summary.new_term == 0 { requested_term } else { summary.new_term },
            regular_payment,
            savings: baseline_total - summary.total_payment,
        }
    }
}

/// Baseline against both prepayment strategies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub original: ScenarioMetrics,
    pub reduce_term: ScenarioMetrics,
    pub reduce_quota: ScenarioMetrics,
}

impl ScenarioComparison {
    /// Evaluate the three scenarios for `params`
    pub fn evaluate(params: &LoanParameters) -> Self {
        log::debug!(
            "Comparing prepayment of {:.2} in period {}",
            params.extra_payment_amount,
            params.extra_payment_month
        );

        let baseline_params = params.clone().with_extra_payment_amount(0.0);
        let term_params = params.clone().with_strategy(PrepaymentStrategy::ReduceTerm);
        let quota_params = params.clone().with_strategy(PrepaymentStrategy::ReduceQuota);

        let baseline = ScheduleEngine::new(&baseline_params).run();
        let term = ScheduleEngine::new(&term_params).run();
        let quota = ScheduleEngine::new(&quota_params).run();

        let baseline_total = baseline.summary.total_payment;

        Self {
            original: ScenarioMetrics {
                savings: 0.0,
                ..ScenarioMetrics::from_result(&baseline, params.term, baseline.summary.first_payment, baseline_total)
            },
            reduce_term: ScenarioMetrics::from_result(&term, params.term, term.summary.regular_payment, baseline_total),
            reduce_quota: ScenarioMetrics::from_result(&quota, params.term, quota.summary.regular_payment, baseline_total),
        }
    }

    /// Scenario with the larger savings; ties go to reduce term
    pub fn best_strategy(&self) -> PrepaymentStrategy {
        if self.reduce_quota.savings > self.reduce_term.savings {
            PrepaymentStrategy::ReduceQuota
        } else {
            PrepaymentStrategy::ReduceTerm
        }
    }
}

/// Batch evaluation of independent loans
///
/// Each loan is a pure computation, so the batch is spread across the rayon pool.
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let loans = load_loan_book("loans.csv")?;
/// let results = runner.run_batch(&loans);
///
/// // Same loan, several prepayment plans
/// let plans = runner.run_prepayments(&loans[0], &[(1000.0, 6), (2000.0, 6), (1000.0, 12)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner;

impl ScenarioRunner {
    pub fn new() -> Self {
        Self
    }

    /// Compute one loan, comparison included
    pub fn run(&self, params: &LoanParameters) -> CalculationResult {
        compute_schedule(params)
    }

    /// Compute many loans in parallel, preserving input order
    pub fn run_batch(&self, loans: &[LoanParameters]) -> Vec<CalculationResult> {
        loans.par_iter().map(compute_schedule).collect()
    }

    /// Compute one loan under several prepayment variants
    pub fn run_prepayments(&self, params: &LoanParameters, prepayments: &[(f64, u32)]) -> Vec<CalculationResult> {
        prepayments
            .par_iter()
            .map(|&(amount, month)| compute_schedule(&params.clone().with_extra_payment(amount, month)))
            .collect()
    }
}
