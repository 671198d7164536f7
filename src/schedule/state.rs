//! State carried from one period to the next during a schedule run

use super::capitalization::Capitalization;

/// Balances below this are treated as fully repaid
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Running state of a loan during simulation
#[derive(Debug, Clone)]
pub struct ScheduleState {
    /// Current period (1-indexed, 0 before the first period)
    pub period: u32,

    /// Outstanding balance after the last recorded period
    pub balance: f64,

    /// Installment excluding the flat fee; recomputed after a reduce-quota prepayment
    pub fixed_annuity: f64,

    /// Installment as first scheduled, before any recalculation
    pub initial_annuity: f64,

    /// Interest charged so far
    pub total_interest: f64,

    /// Cash paid so far, extra payments included
    pub total_paid: f64,
}

impl ScheduleState {
    /// Start a run from the capitalized balance and the initial installment
    pub fn new(capitalization: &Capitalization, fixed_annuity: f64) -> Self {
        Self {
            period: 0,
            balance: capitalization.opening_balance,
            fixed_annuity,
            initial_annuity: fixed_annuity,
            total_interest: 0.0,
            total_paid: 0.0,
        }
    }

    /// Advance to the next period
    pub fn advance_period(&mut self) {
        self.period += 1;
    }

    /// Snap floating-point residue to an exact zero balance
    pub fn clamp_balance(&mut self) {
        if self.balance < BALANCE_TOLERANCE {
            self.balance = 0.0;
        }
    }

    pub fn is_repaid(&self) -> bool {
        self.balance == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capitalization(balance: f64) -> Capitalization {
        Capitalization {
            opening_balance: balance,
            forecast_balance: balance,
            amortization_months: 12,
        }
    }

    #[test]
    fn test_clamp_snaps_residue() {
        let mut state = ScheduleState::new(&capitalization(0.009), 10.0);
        state.clamp_balance();
        assert!(state.is_repaid());

        let mut state = ScheduleState::new(&capitalization(-1e-9), 10.0);
        state.clamp_balance();
        assert_eq!(state.balance, 0.0);
    }

    #[test]
    fn test_clamp_keeps_real_balance() {
        let mut state = ScheduleState::new(&capitalization(0.01), 10.0);
        state.clamp_balance();
        assert!(!state.is_repaid());
        assert_eq!(state.initial_annuity, 10.0);
        assert_eq!(state.period, 0);
    }
}
