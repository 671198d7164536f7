//! Run schedules for an entire loan book from CSV
//!
//! Usage: cargo run --bin run_book -- loans.csv [book_summary.csv]

use anyhow::{Context, Result};
use loan_amortization::{loan::load_loan_book, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// One output line per loan
#[derive(Debug, Serialize)]
struct BookRow {
    loan: usize,
    amount: f64,
    periods: u32,
    first_payment: f64,
    regular_payment: f64,
    total_interest: f64,
    total_payment: f64,
    effective_annual_cost: Option<f64>,
    reduce_term_savings: Option<f64>,
    reduce_quota_savings: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().context("Usage: run_book <loans.csv> [output.csv]")?);
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("book_summary.csv"));

    let start = Instant::now();
    let loans = load_loan_book(&input)
        .with_context(|| format!("Failed to load loan book {}", input.display()))?;
    println!("Loaded {} loans in {:?}", loans.len(), start.elapsed());

    let run_start = Instant::now();
    let results = ScenarioRunner::new().run_batch(&loans);
    println!("Schedules complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut book_interest = 0.0;
    let mut book_paid = 0.0;

    for (index, (params, result)) in loans.iter().zip(&results).enumerate() {
        let summary = &result.summary;
        book_interest += summary.total_interest;
        book_paid += summary.total_payment;

        writer.serialize(BookRow {
            loan: index + 1,
            amount: params.amount,
            periods: summary.new_term,
            first_payment: summary.first_payment,
            regular_payment: summary.regular_payment,
            total_interest: summary.total_interest,
            total_payment: summary.total_payment,
            effective_annual_cost: result.effective_annual_cost(params.amount),
            reduce_term_savings: summary.comparison.map(|c| c.reduce_term.savings),
            reduce_quota_savings: summary.comparison.map(|c| c.reduce_quota.savings),
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", output.display());
    println!("\nBook Summary:");
    println!("  Loans: {}", loans.len());
    println!("  Disbursed: {:.2}", loans.iter().map(|l| l.amount).sum::<f64>());
    println!("  Total Interest: {:.2}", book_interest);
    println!("  Total Paid: {:.2}", book_paid);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
