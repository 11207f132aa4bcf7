use clap::Args;
use serde_json::Value;

use finaml_core::valuation::portfolio::{self, PortfolioInput};

use crate::input;

/// Arguments for portfolio valuation
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON/YAML file with a `positions` list (reads stdin if omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio_input: PortfolioInput = input::load(args.input.as_deref())?
        .ok_or("Provide a portfolio via --input or piped JSON on stdin")?;

    let result = portfolio::value_portfolio(&portfolio_input)?;
    Ok(serde_json::to_value(result)?)
}
