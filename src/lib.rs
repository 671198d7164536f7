//! Loan Amortization - schedule engine for installment loans
//!
//! This library provides:
//! - Rate normalization between monthly (TEM) and annual (TEA) effective rates
//! - Grace-day and grace-month capitalization
//! - Fixed installment (annuity) schedules with insurance and flat fees
//! - Extra payments with "reduce term" or "reduce quota" recalculation
//! - Three-way prepayment scenario comparison
//!
//! Every computation is a pure function of its [`LoanParameters`].

pub mod advisory;
pub mod error;
pub mod loan;
pub mod scenario;
pub mod schedule;

// Re-export commonly used types
pub use advisory::AdvisoryBrief;
pub use error::{LoanError, LoanResult};
pub use loan::{GraceType, LoanParameters, PrepaymentStrategy, RateType, TermUnit};
pub use scenario::{ScenarioComparison, ScenarioMetrics, ScenarioRunner};
pub use schedule::{compute_schedule, CalculationResult, CalculationSummary, PaymentRow};
