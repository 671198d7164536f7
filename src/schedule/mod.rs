//! Amortization schedule engine

mod annuity;
mod capitalization;
mod engine;
mod export;
mod irr;
mod rates;
mod rows;
mod state;

pub use annuity::annuity;
pub use capitalization::{capitalize_days, Capitalization, GraceTerms};
pub use engine::{compute_schedule, ScheduleEngine};
pub use export::{write_schedule_csv, write_schedule_csv_file};
pub use irr::calculate_irr;
pub use rates::{EffectiveRates, DAYS_PER_MONTH, MONTHS_PER_YEAR};
pub use rows::{CalculationResult, CalculationSummary, CostBreakdown, PaymentRow, PAYMENT_CHANGE_THRESHOLD};
pub use state::{ScheduleState, BALANCE_TOLERANCE};
