use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finaml_core::valuation::cash_flow::{self, NpvInput};

use crate::input;

/// Arguments for NPV of a cash flow series
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct NpvArgs {
    /// Comma-separated cash flows by period, initial outlay first (e.g. "-100,20,30,40,50")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<Decimal>>,

    /// Discount rate as a decimal (e.g. 0.10 for 10%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_npv(args: NpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let npv_input: NpvInput = match args.cash_flows {
        Some(cash_flows) if args.input.is_none() => NpvInput {
            cash_flows,
            discount_rate: args
                .discount_rate
                .ok_or("--discount-rate is required (or provide --input)")?,
        },
        _ => input::load(args.input.as_deref())?
            .ok_or("--cash-flows is required (or provide --input)")?,
    };

    let result = cash_flow::analyse_npv(&npv_input)?;
    Ok(serde_json::to_value(result)?)
}
