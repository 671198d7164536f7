//! Load loan parameters from JSON payloads and CSV loan books

use super::{GraceType, LoanParameters, PrepaymentStrategy, RateType, TermUnit};
use crate::error::{LoanError, LoanResult};
use chrono::NaiveDate;
use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row of a loan book
///
/// Enum columns are kept as text and parsed afterwards so that a bad value
/// reports the column it came from.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "RateType")]
    rate_type: String,
    #[serde(rename = "RateValue")]
    rate_value: f64,
    #[serde(rename = "Term")]
    term: u32,
    #[serde(rename = "TermUnit")]
    term_unit: String,
    #[serde(rename = "GracePeriod", default)]
    grace_period: u32,
    #[serde(rename = "GraceType", default)]
    grace_type: Option<String>,
    #[serde(rename = "GraceDays", default)]
    grace_days: u32,
    #[serde(rename = "Insurance", default)]
    insurance: f64,
    #[serde(rename = "FixedFee", default)]
    fixed_fee: f64,
    #[serde(rename = "PaidInstallments", default)]
    paid_installments: u32,
    #[serde(rename = "ExtraPaymentAmount", default)]
    extra_payment_amount: f64,
    #[serde(rename = "ExtraPaymentMonth", default)]
    extra_payment_month: Option<u32>,
    #[serde(rename = "ExtraPaymentStrategy", default)]
    extra_payment_strategy: Option<String>,
    #[serde(rename = "StartDate")]
    start_date: String,
}

impl CsvRow {
    fn into_parameters(self) -> LoanResult<LoanParameters> {
        let rate_type: RateType = self.rate_type.parse()?;
        let term_unit: TermUnit = self.term_unit.parse()?;

        let grace_type = match self.grace_type.as_deref() {
            Some(text) if !text.trim().is_empty() => text.parse()?,
            _ => GraceType::default(),
        };

        let extra_payment_strategy = match self.extra_payment_strategy.as_deref() {
            Some(text) if !text.trim().is_empty() => text.parse()?,
            _ => PrepaymentStrategy::default(),
        };

        let start_date = NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d")
            .map_err(|_| LoanError::invalid_field("startDate", self.start_date.as_str()))?;

        Ok(LoanParameters {
            amount: self.amount,
            rate_type,
            rate_value: self.rate_value,
            term: self.term,
            term_unit,
            grace_period: self.grace_period,
            grace_type,
            grace_days: self.grace_days,
            insurance: self.insurance,
            fixed_fee: self.fixed_fee,
            paid_installments: self.paid_installments,
            extra_payment_amount: self.extra_payment_amount,
            extra_payment_month: self.extra_payment_month.unwrap_or(self.paid_installments + 1),
            extra_payment_strategy,
            start_date,
        })
    }
}

/// Read a loan book from any CSV source
pub fn read_loan_book<R: Read>(source: R) -> LoanResult<Vec<LoanParameters>> {
    let mut reader = Reader::from_reader(source);
    let mut loans = Vec::new();

    for record in reader.deserialize() {
        let row: CsvRow = record?;
        loans.push(row.into_parameters()?);
    }

    Ok(loans)
}

/// Load a loan book from a CSV file
pub fn load_loan_book(path: &Path) -> LoanResult<Vec<LoanParameters>> {
    let file = File::open(path)?;
    let loans = read_loan_book(BufReader::new(file))?;
    log::info!("Loaded {} loans from {}", loans.len(), path.display());
    Ok(loans)
}

/// Load a single set of parameters from a JSON file in the calculator's format
pub fn load_parameters_json(path: &Path) -> LoanResult<LoanParameters> {
    let file = File::open(path)?;
    let params = serde_json::from_reader(BufReader::new(file))?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = "\
Amount,RateType,RateValue,Term,TermUnit,GracePeriod,GraceType,GraceDays,Insurance,FixedFee,PaidInstallments,ExtraPaymentAmount,ExtraPaymentMonth,ExtraPaymentStrategy,StartDate
10000,annual,15,12,months,0,partial,0,0,0,0,0,,,2024-01-15
25000,monthly,1.2,3,years,2,total,10,0.05,5,4,2000,6,reduce_quota,2023-06-01
";

    #[test]
    fn test_read_loan_book() {
        let loans = read_loan_book(BOOK.as_bytes()).unwrap();
        assert_eq!(loans.len(), 2);

        let first = &loans[0];
        assert_eq!(first.rate_type, RateType::Annual);
        assert_eq!(first.total_months(), 12);
        assert_eq!(first.extra_payment_month, 1);
        assert_eq!(first.extra_payment_strategy, PrepaymentStrategy::ReduceTerm);

        let second = &loans[1];
        assert_eq!(second.total_months(), 36);
        assert_eq!(second.grace_type, GraceType::Total);
        assert_eq!(second.grace_days, 10);
        assert_eq!(second.extra_payment_month, 6);
        assert_eq!(second.extra_payment_strategy, PrepaymentStrategy::ReduceQuota);
        assert_eq!(second.start_date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
    }

    #[test]
    fn test_bad_enum_reports_column() {
        let book = "\
Amount,RateType,RateValue,Term,TermUnit,StartDate
1000,weekly,5,12,months,2024-01-01
";
        let err = read_loan_book(book.as_bytes()).unwrap_err();
        match err {
            LoanError::InvalidField { field, value } => {
                assert_eq!(field, "rateType");
                assert_eq!(value, "weekly");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let book = "\
Amount,RateType,RateValue,Term,TermUnit,StartDate
1000,annual,5,12,months,15/01/2024
";
        let err = read_loan_book(book.as_bytes()).unwrap_err();
        assert!(matches!(err, LoanError::InvalidField { field: "startDate", .. }));
    }
}
