//! AWS Lambda handler for schedule computations
//!
//! Accepts the calculator's JSON parameters and returns the schedule, the
//! summary (with the prepayment comparison when an extra payment is set) and,
//! on request, the advisory brief.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use loan_amortization::{
    advisory::AdvisoryBrief, compute_schedule, CalculationResult, LoanParameters,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Input: loan parameters plus output options
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(flatten)]
    pub params: LoanParameters,

    /// Leave out the per-period rows
    #[serde(default)]
    pub summary_only: bool,

    /// Include the advisory prompt in the response
    #[serde(default)]
    pub include_brief: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(flatten)]
    pub result: CalculationResult,
    pub outstanding_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_annual_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    pub execution_time_ms: u64,
}

async fn function_handler(event: LambdaEvent<ScheduleRequest>) -> Result<ScheduleResponse, Error> {
    let start = Instant::now();
    let request = event.payload;
    let params = &request.params;

    log::info!(
        "Computing schedule: amount={} term={} {} extra={}",
        params.amount,
        params.term,
        params.term_unit,
        params.extra_payment_amount
    );

    let mut result = compute_schedule(params);
    let outstanding_balance = result.outstanding_balance(params.paid_installments, params.amount);
    let effective_annual_cost = result.effective_annual_cost(params.amount);
    let brief = request
        .include_brief
        .then(|| AdvisoryBrief::new(params, &result).prompt);

    if request.summary_only {
        result.schedule.clear();
    }

    Ok(ScheduleResponse {
        result,
        outstanding_balance,
        effective_annual_cost,
        brief,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(function_handler)).await
}
