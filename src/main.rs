//! Loan Amortization CLI
//!
//! Computes a payment schedule from a JSON parameter file or from flags

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use loan_amortization::{
    advisory::AdvisoryBrief,
    compute_schedule,
    loan::load_parameters_json,
    schedule::write_schedule_csv_file,
    GraceType, LoanParameters, PrepaymentStrategy, RateType, TermUnit,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "loan_amortization", version, about = "Amortization schedules with prepayment scenarios")]
struct Cli {
    /// JSON file with the loan parameters; flags below are ignored when given
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long, default_value_t = 10_000.0)]
    amount: f64,

    #[arg(long, default_value = "annual")]
    rate_type: RateType,

    /// Rate in percent
    #[arg(long, default_value_t = 15.0)]
    rate: f64,

    #[arg(long, default_value_t = 12)]
    term: u32,

    #[arg(long, default_value = "months")]
    term_unit: TermUnit,

    #[arg(long, default_value_t = 0)]
    grace_period: u32,

    #[arg(long, default_value = "partial")]
    grace_type: GraceType,

    #[arg(long, default_value_t = 0)]
    grace_days: u32,

    /// Monthly insurance, percent of balance
    #[arg(long, default_value_t = 0.05)]
    insurance: f64,

    #[arg(long, default_value_t = 5.0)]
    fee: f64,

    #[arg(long, default_value_t = 0)]
    paid: u32,

    #[arg(long, default_value_t = 0.0)]
    extra_amount: f64,

    /// Defaults to the period after the last paid installment
    #[arg(long)]
    extra_month: Option<u32>,

    #[arg(long, default_value = "reduce_term")]
    strategy: PrepaymentStrategy,

    /// Disbursement date (YYYY-MM-DD), today when omitted
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Write the schedule to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Print the advisory brief
    #[arg(long)]
    brief: bool,
}

impl Cli {
    fn loan_parameters(&self) -> Result<LoanParameters> {
        if let Some(path) = &self.params {
            return load_parameters_json(path)
                .with_context(|| format!("Failed to load parameters from {}", path.display()));
        }

        let params = LoanParameters::default()
            .with_amount(self.amount)
            .with_rate(self.rate_type, self.rate)
            .with_term(self.term, self.term_unit)
            .with_grace(self.grace_period, self.grace_type)
            .with_grace_days(self.grace_days)
            .with_charges(self.insurance, self.fee)
            .with_paid_installments(self.paid)
            .with_strategy(self.strategy)
            .with_start_date(self.start_date.unwrap_or_else(|| Local::now().date_naive()));

        let extra_month = self.extra_month.unwrap_or(params.extra_payment_month);
        Ok(params.with_extra_payment(self.extra_amount, extra_month))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.loan_parameters()?;
    let result = compute_schedule(&params);

    if let Some(path) = &cli.csv {
        write_schedule_csv_file(&result.schedule, path)
            .with_context(|| format!("Failed to write schedule to {}", path.display()))?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let summary = &result.summary;
    println!("Loan Amortization v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");
    println!("Disbursed: {} on {}", params.amount, result.start_date);
    println!("  TEA: {:.4}%  TEM: {:.4}%", summary.annual_rate * 100.0, summary.monthly_rate * 100.0);
    println!();

    println!("{:>6} {:>12} {:>12} {:>12} {:>10} {:>8} {:>12} {:>12} {:>10}",
        "Period", "Date", "Interest", "Capital", "Insurance", "Fee", "Payment", "Balance", "Extra");
    println!("{}", "-".repeat(104));

    for row in &result.schedule {
        let marker = if row.is_paid(params.paid_installments) { "*" } else { " " };
        println!("{:>5}{} {:>12} {:>12.2} {:>12.2} {:>10.2} {:>8.2} {:>12.2} {:>12.2} {:>10}",
            row.period,
            marker,
            row.date,
            row.interest,
            row.amortization,
            row.insurance,
            row.fee,
            row.payment,
            row.balance,
            row.extra_payment.map(|e| format!("{:.2}", e)).unwrap_or_default(),
        );
    }

    println!("\nSummary:");
    if summary.payment_changed() {
        println!("  Installment: {:.2} -> {:.2}", summary.first_payment, summary.regular_payment);
    } else {
        println!("  Installment: {:.2}", summary.regular_payment);
    }
    println!("  Periods: {}", summary.new_term);
    println!("  Total Interest: {:.2}", summary.total_interest);
    println!("  Total Paid: {:.2}", summary.total_payment);

    let costs = result.cost_breakdown();
    println!("  Capital / Interest / Insurance+Fees: {:.2} / {:.2} / {:.2}",
        costs.capital, costs.interest, costs.insurance_and_fees);
    if let Some(cost) = result.effective_annual_cost(params.amount) {
        println!("  Effective annual cost: {:.4}%", cost * 100.0);
    }
    if params.paid_installments > 0 {
        println!("  Outstanding after {} installments: {:.2}",
            params.paid_installments,
            result.outstanding_balance(params.paid_installments, params.amount));
    }

    if let Some(comparison) = &summary.comparison {
        println!("\nPrepayment of {:.2} in period {}:", params.extra_payment_amount, params.extra_payment_month);
        println!("{:>14} {:>14} {:>14} {:>6} {:>12} {:>12}",
            "Scenario", "Total Paid", "Interest", "Term", "Installment", "Savings");
        for (label, metrics) in [
            ("original", &comparison.original),
            ("reduce_term", &comparison.reduce_term),
            ("reduce_quota", &comparison.reduce_quota),
        ] {
            println!("{:>14} {:>14.2} {:>14.2} {:>6} {:>12.2} {:>12.2}",
                label, metrics.total_payment, metrics.total_interest, metrics.term,
                metrics.regular_payment, metrics.savings);
        }
        println!("  Best strategy: {}", comparison.best_strategy());
    }

    if cli.brief {
        let brief = AdvisoryBrief::new(&params, &result);
        println!("\n{}", brief.prompt);
    }

    Ok(())
}
