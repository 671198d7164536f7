//! Loan parameters and loan-book loading

mod data;
pub mod loader;

pub use data::{GraceType, LoanParameters, PrepaymentStrategy, RateType, TermUnit};
pub use loader::{load_loan_book, load_parameters_json, read_loan_book};
