use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinamlResult;

/// Net present value of `cash_flow` at `discount_rate`.
///
/// Index 0 is undiscounted. An empty cash flow is worth zero. A rate at or
/// below -100% fails with `DegenerateDiscountRate`.
pub fn calculate_npv(cash_flow: &[Money], discount_rate: Rate) -> FinamlResult<Money> {
    time_value::npv(discount_rate, cash_flow)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpvInput {
    /// Cash flows by period, index 0 being the initial outlay
    pub cash_flows: Vec<Money>,
    pub discount_rate: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountedTerm {
    pub period: usize,
    pub cash_flow: Money,
    pub present_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpvOutput {
    pub npv: Money,
    pub undiscounted_total: Money,
    pub discount_rate: Rate,
    pub terms: Vec<DiscountedTerm>,
}

/// NPV with the per-period discounted terms that make it up.
pub fn analyse_npv(input: &NpvInput) -> FinamlResult<ComputationOutput<NpvOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let discounted = time_value::discounted_cash_flows(input.discount_rate, &input.cash_flows)?;
    let npv = time_value::checked_sum(discounted.iter().copied(), "NPV summation")?;
    let undiscounted_total =
        time_value::checked_sum(input.cash_flows.iter().copied(), "undiscounted cash flow total")?;

    if input.cash_flows.is_empty() {
        warnings.push("No cash flows supplied; NPV is zero".into());
    }
    if input.discount_rate < Decimal::ZERO {
        warnings.push(format!(
            "Negative discount rate ({}) inflates later cash flows",
            input.discount_rate
        ));
    }
    if input
        .cash_flows
        .first()
        .is_some_and(|initial| *initial > Decimal::ZERO)
    {
        warnings.push("Initial cash flow is positive; expected an outlay at period 0".into());
    }

    let terms = input
        .cash_flows
        .iter()
        .zip(discounted)
        .enumerate()
        .map(|(period, (cf, pv))| DiscountedTerm {
            period,
            cash_flow: *cf,
            present_value: pv,
        })
        .collect();

    let output = NpvOutput {
        npv,
        undiscounted_total,
        discount_rate: input.discount_rate,
        terms,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "NPV: sum of cf[t] / (1 + r)^t",
        &serde_json::json!({ "discount_rate": input.discount_rate }),
        warnings,
        elapsed,
        output,
    ))
}
