use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finaml_core::valuation::sensitivity::{self, RateSweep, SensitivityInput};

use crate::input;

/// Arguments for NPV discount-rate sensitivity
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SensitivityArgs {
    /// Comma-separated cash flows by period, initial outlay first
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<Decimal>>,

    /// Comma-separated discount rates (e.g. "0.05,0.08,0.1,0.12,0.15")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub rates: Option<Vec<Decimal>>,

    /// Stepped rate range in format min:max:step (e.g. "0.02:0.12:0.02")
    #[arg(long)]
    pub sweep: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn parse_sweep(spec: &str) -> Result<RateSweep, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Rate sweep must be min:max:step, got '{}'", spec).into());
    }
    Ok(RateSweep {
        min: parts[0].trim().parse()?,
        max: parts[1].trim().parse()?,
        step: parts[2].trim().parse()?,
    })
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sens_input: SensitivityInput = match args.cash_flows {
        Some(cash_flows) if args.input.is_none() => SensitivityInput {
            cash_flows,
            discount_rates: args.rates.unwrap_or_default(),
            sweep: args.sweep.as_deref().map(parse_sweep).transpose()?,
        },
        _ => input::load(args.input.as_deref())?
            .ok_or("--cash-flows is required (or provide --input)")?,
    };

    let result = sensitivity::analyse_sensitivity(&sens_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_sweep() {
        let sweep = parse_sweep("0.02:0.10:0.04").unwrap();
        assert_eq!(sweep.min, dec!(0.02));
        assert_eq!(sweep.max, dec!(0.10));
        assert_eq!(sweep.step, dec!(0.04));
        assert!(parse_sweep("0.02:0.10").is_err());
        assert!(parse_sweep("a:b:c").is_err());
    }

    #[test]
    fn test_rates_keep_input_order() {
        let args = SensitivityArgs {
            cash_flows: Some(vec![dec!(-100), dec!(60), dec!(60)]),
            rates: Some(vec![dec!(0.15), dec!(0.05)]),
            sweep: None,
            input: None,
        };
        let value = run_sensitivity(args).unwrap();
        let table = value["result"]["table"].as_array().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0]["discount_rate"], "0.15");
        assert_eq!(table[1]["discount_rate"], "0.05");
    }
}
