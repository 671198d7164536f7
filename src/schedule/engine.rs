//! Period-by-period amortization engine

use super::annuity::annuity;
use super::capitalization::{Capitalization, GraceTerms};
use super::rates::EffectiveRates;
use super::rows::{CalculationResult, CalculationSummary, PaymentRow};
use super::state::{ScheduleState, BALANCE_TOLERANCE};
use crate::loan::{GraceType, LoanParameters, PrepaymentStrategy};
use crate::scenario::ScenarioComparison;
use chrono::{Days, Months, NaiveDate};
use log::{debug, trace};

/// Compute the schedule for `params`, with the prepayment comparison attached
/// whenever an extra payment is requested
///
/// Total for every input: degenerate values produce an empty or short schedule,
/// never a panic or an error.
pub fn compute_schedule(params: &LoanParameters) -> CalculationResult {
    let mut result = ScheduleEngine::new(params).run();

    if params.has_extra_payment() {
        result.summary.comparison = Some(ScenarioComparison::evaluate(params));
    }

    result
}

/// Simulates one loan without the scenario comparison
pub struct ScheduleEngine<'a> {
    params: &'a LoanParameters,
    rates: EffectiveRates,
    insurance_rate: f64,
    total_months: u32,
}

impl<'a> ScheduleEngine<'a> {
    pub fn new(params: &'a LoanParameters) -> Self {
        Self {
            params,
            rates: EffectiveRates::normalize(params.rate_type, params.rate_value),
            insurance_rate: params.insurance_rate(),
            total_months: params.total_months(),
        }
    }

    /// Interest plus insurance per period
    pub fn combined_rate(&self) -> f64 {
        self.rates.monthly + self.insurance_rate
    }

    /// Balances before the first amortizing period
    pub fn capitalization(&self) -> Capitalization {
        GraceTerms {
            monthly_rate: self.rates.monthly,
            daily_rate: self.rates.daily(),
            insurance_rate: self.insurance_rate,
            fixed_fee: self.params.fixed_fee,
            grace_days: self.params.grace_days,
            grace_period: self.params.grace_period,
            grace_type: self.params.grace_type,
            total_months: self.total_months,
        }
        .capitalize(self.params.amount)
    }

    /// Run the full schedule
    pub fn run(&self) -> CalculationResult {
        let capitalization = self.capitalization();
        let fixed_annuity = annuity(
            capitalization.forecast_balance,
            capitalization.amortization_months,
            self.combined_rate(),
        );

        debug!(
            "TEM={:.8} TEA={:.8} opening={:.2} forecast={:.2} annuity={:.2} over {} months",
            self.rates.monthly,
            self.rates.annual,
            capitalization.opening_balance,
            capitalization.forecast_balance,
            fixed_annuity,
            capitalization.amortization_months,
        );

        let mut state = ScheduleState::new(&capitalization, fixed_annuity);
        let mut schedule = Vec::new();

        for _ in 1..=self.total_months {
            state.advance_period();

            let row = self.calculate_period(&mut state);
            schedule.push(row);

            if state.is_repaid() && state.period >= self.params.grace_period {
                break;
            }
        }

        let fee = self.params.fixed_fee;
        let summary = CalculationSummary {
            total_interest: state.total_interest,
            total_payment: state.total_paid,
            monthly_rate: self.rates.monthly,
            annual_rate: self.rates.annual,
            first_payment: state.initial_annuity + fee,
            regular_payment: state.fixed_annuity + fee,
            new_term: schedule.last().map(|r| r.period).unwrap_or(0),
            comparison: None,
        };

        CalculationResult {
            start_date: self.params.start_date,
            schedule,
            summary,
        }
    }

    /// Calendar date of a period: start date plus whole months, then the grace days
    ///
    /// Month addition clamps to the last day of shorter months.
    pub fn period_date(&self, period: u32) -> NaiveDate {
        self.params
            .start_date
            .checked_add_months(Months::new(period))
            .and_then(|d| d.checked_add_days(Days::new(self.params.grace_days as u64)))
            .unwrap_or(NaiveDate::MAX)
    }

    fn is_extra_payment_period(&self, period: u32) -> bool {
        period == self.params.extra_payment_month
            && self.params.has_extra_payment()
            && period > self.params.grace_period
    }

    /// Charges, payment and balance movement for the current period
    fn calculate_period(&self, state: &mut ScheduleState) -> PaymentRow {
        let period = state.period;
        let fee = self.params.fixed_fee;

        // Costs accrue on the opening balance
        let interest = state.balance * self.rates.monthly;
        let insurance = state.balance * self.insurance_rate;

        let mut extra_applied = 0.0;
        let amortization;
        let payment;

        if period <= self.params.grace_period {
            let carrying_cost = interest + insurance + fee;
            match self.params.grace_type {
                GraceType::Total => {
                    amortization = -carrying_cost;
                    payment = 0.0;
                    state.balance += carrying_cost;
                }
                GraceType::Partial => {
                    amortization = 0.0;
                    payment = carrying_cost;
                }
            }
        } else {
            let mut regular = state.fixed_annuity - interest - insurance;

            let closes_loan = state.balance <= regular
                || (period == self.total_months
                    && self.params.extra_payment_strategy != PrepaymentStrategy::ReduceTerm);

            if closes_loan {
                regular = state.balance;
                payment = state.balance + interest + insurance + fee;
            } else {
                payment = state.fixed_annuity + fee;
            }

            let is_extra_period = self.is_extra_payment_period(period);
            if is_extra_period {
                extra_applied = self.params.extra_payment_amount.min(state.balance - regular);
            }

            amortization = regular + extra_applied;
            state.balance -= amortization;

            if is_extra_period
                && self.params.extra_payment_strategy == PrepaymentStrategy::ReduceQuota
                && state.balance > BALANCE_TOLERANCE
            {
                let remaining = self.total_months as i64 - period as i64;
                state.fixed_annuity = annuity(state.balance, remaining, self.combined_rate());
                debug!(
                    "Installment recalculated after prepayment in period {}: {:.2} over {} months",
                    period, state.fixed_annuity, remaining
                );
            }
        }

        state.clamp_balance();
        state.total_interest += interest;
        state.total_paid += payment + extra_applied;

        trace!(
            "period={} interest={:.4} amortization={:.4} payment={:.4} balance={:.4}",
            period,
            interest,
            amortization,
            payment + extra_applied,
            state.balance
        );

        PaymentRow {
            period,
            date: self.period_date(period),
            interest,
            amortization,
            insurance,
            fee,
            payment: payment + extra_applied,
            balance: state.balance,
            extra_payment: (extra_applied > 0.0).then_some(extra_applied),
        }
    }
}
