//! Plain-text brief handed to the external advisory service
//!
//! The service itself lives outside this crate. This module only turns a
//! computed result into the prompt it expects, plus the fixed instruction.

use crate::loan::{GraceType, LoanParameters};
use crate::schedule::CalculationResult;

/// Standing instruction sent with every brief
pub const SYSTEM_INSTRUCTION: &str = "Act as an expert financial advisor. Analyze the loan details provided by the user \
and give a concise, mobile-friendly analysis:
1. Evaluate whether the annual effective rate (TEA) is competitive for a standard consumer market.
2. Highlight the impact of the grace period (especially if capitalized) and of insurance costs.
3. Give a clear verdict: \"Favorable\", \"Neutral\" or \"Expensive\".
4. Provide 2 actionable tips to reduce interest.
Format using Markdown and keep it under 200 words.";

/// Prompt for one loan
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryBrief {
    pub system_instruction: &'static str,
    pub prompt: String,
}

impl AdvisoryBrief {
    pub fn new(params: &LoanParameters, result: &CalculationResult) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION,
            prompt: render_prompt(params, result),
        }
    }
}

fn grace_label(grace_type: GraceType) -> &'static str {
    match grace_type {
        GraceType::Total => "Capitalized/Total",
        GraceType::Partial => "Interest Only/Partial",
    }
}

fn render_prompt(params: &LoanParameters, result: &CalculationResult) -> String {
    let summary = &result.summary;

    let prepayment = summary
        .comparison
        .map(|comparison| {
            format!(
                "- Prepayment of {:.2} in month {}: reduce term saves {:.2} ({} months), reduce quota saves {:.2}\n",
                params.extra_payment_amount,
                params.extra_payment_month,
                comparison.reduce_term.savings,
                comparison.reduce_term.term,
                comparison.reduce_quota.savings,
            )
        })
        .unwrap_or_default();

    format!(
        "Please analyze this loan scenario:
- Loan Amount: {amount}
- Term: {term} {unit}
- Annual Effective Rate (TEA): {tea:.2}%
- Monthly Rate (TEM): {tem:.2}%
- Total Interest Payable: {interest:.2}
- Total Cost of Loan: {total:.2}
- Grace Period: {grace} months ({grace_label})
- Grace Days: {grace_days} days (Capitalized)
- Insurance/Fees included.
{prepayment}
Is this a good financial decision for a personal loan? Note any risks with the grace period type selected.
",
        amount = params.amount,
        term = params.term,
        unit = params.term_unit,
        tea = summary.annual_rate * 100.0,
        tem = summary.monthly_rate * 100.0,
        interest = summary.total_interest,
        total = summary.total_payment,
        grace = params.grace_period,
        grace_label = grace_label(params.grace_type),
        grace_days = params.grace_days,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{RateType, TermUnit};
    use crate::schedule::compute_schedule;
    use chrono::NaiveDate;

    fn params() -> LoanParameters {
        LoanParameters::default()
            .with_amount(10_000.0)
            .with_rate(RateType::Annual, 15.0)
            .with_term(2, TermUnit::Years)
            .with_grace(2, GraceType::Total)
            .with_grace_days(12)
            .with_start_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
    }

    #[test]
    fn test_prompt_lists_summary_fields() {
        let params = params();
        let result = compute_schedule(&params);
        let brief = AdvisoryBrief::new(&params, &result);

        assert_eq!(brief.system_instruction, SYSTEM_INSTRUCTION);
        assert!(brief.prompt.contains("- Loan Amount: 10000\n"));
        assert!(brief.prompt.contains("- Term: 2 years\n"));
        assert!(brief.prompt.contains("- Annual Effective Rate (TEA): 15.00%\n"));
        assert!(brief.prompt.contains("- Monthly Rate (TEM): 1.17%\n"));
        assert!(brief.prompt.contains("- Grace Period: 2 months (Capitalized/Total)\n"));
        assert!(brief.prompt.contains("- Grace Days: 12 days (Capitalized)\n"));
        assert!(!brief.prompt.contains("Prepayment"));
    }

    #[test]
    fn test_prompt_mentions_prepayment_comparison() {
        let params = params().with_extra_payment(1500.0, 8);
        let result = compute_schedule(&params);
        let brief = AdvisoryBrief::new(&params, &result);

        assert!(brief.prompt.contains("- Prepayment of 1500.00 in month 8"));
    }

    #[test]
    fn test_prompt_line_layout() {
        let params = params();
        let plain = AdvisoryBrief::new(&params, &compute_schedule(&params)).prompt;
        let lines: Vec<_> = plain.lines().collect();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "Please analyze this loan scenario:");
        assert_eq!(lines[9], "- Insurance/Fees included.");
        assert_eq!(lines[10], "");
        assert!(lines[11].starts_with("Is this a good financial decision"));

        let with_extra = params.with_extra_payment(1500.0, 8);
        let prompt = AdvisoryBrief::new(&with_extra, &compute_schedule(&with_extra)).prompt;
        let lines: Vec<_> = prompt.lines().collect();

        assert!(lines[10].starts_with("- Prepayment of 1500.00 in month 8"));
        assert_eq!(lines[11], "");
        assert!(prompt.ends_with("grace period type selected.\n"));
    }
}
