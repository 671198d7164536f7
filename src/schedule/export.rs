//! CSV export of a payment schedule

use super::rows::PaymentRow;
use crate::error::LoanResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Flat CSV record; every column is always present so the field count stays fixed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    period: u32,
    date: NaiveDate,
    interest: f64,
    amortization: f64,
    insurance: f64,
    fee: f64,
    payment: f64,
    balance: f64,
    extra_payment: Option<f64>,
}

impl From<&PaymentRow> for CsvRow {
    fn from(row: &PaymentRow) -> Self {
        Self {
            period: row.period,
            date: row.date,
            interest: row.interest,
            amortization: row.amortization,
            insurance: row.insurance,
            fee: row.fee,
            payment: row.payment,
            balance: row.balance,
            extra_payment: row.extra_payment,
        }
    }
}

/// Write the schedule as CSV with a header row
pub fn write_schedule_csv<W: Write>(rows: &[PaymentRow], writer: W) -> LoanResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(CsvRow::from(row))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_schedule_csv_file(rows: &[PaymentRow], path: &Path) -> LoanResult<()> {
    let file = File::create(path)?;
    write_schedule_csv(rows, file)?;
    log::info!("Schedule with {} rows written to {}", rows.len(), path.display());
    Ok(())
}
