use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finaml_core::instrument::{FinancialInstrument, InstrumentKind, OptionType};
use finaml_core::valuation::pricing::{self, InstrumentValuationInput, ValuationAssumptions};

use crate::input;

/// Arguments for single-instrument valuation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ValueArgs {
    /// Instrument kind: stock, bond or option
    #[arg(long)]
    pub kind: Option<String>,

    /// Ticker symbol (stock, bond)
    #[arg(long)]
    pub ticker: Option<String>,

    /// Current price (stock)
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Face value (bond)
    #[arg(long)]
    pub face_value: Option<Decimal>,

    /// Coupon rate as a decimal, e.g. 0.05 for 5% (bond)
    #[arg(long)]
    pub coupon_rate: Option<Decimal>,

    /// Call or Put (option)
    #[arg(long)]
    pub option_type: Option<String>,

    /// Underlying asset symbol (option)
    #[arg(long)]
    pub underlying: Option<String>,

    /// Strike price (option)
    #[arg(long)]
    pub strike: Option<Decimal>,

    /// Expiration date, YYYY-MM-DD (option)
    #[arg(long)]
    pub expiration: Option<String>,

    /// Compounding periods for the future value
    #[arg(long, default_value = "5")]
    pub periods: u32,

    /// Per-period stock growth rate
    #[arg(long)]
    pub stock_growth: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_value(args: ValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut valuation_input: InstrumentValuationInput = if let Some(path) = args.input.as_deref() {
        input::file::read_input(path)?
    } else if args.kind.is_some() {
        InstrumentValuationInput {
            instrument: instrument_from_flags(&args)?,
            periods: args.periods,
            assumptions: ValuationAssumptions::default(),
        }
    } else if let Some(parsed) = input::stdin::read_stdin()? {
        parsed
    } else {
        return Err("--kind is required (or provide --input)".into());
    };

    if let Some(growth) = args.stock_growth {
        valuation_input.assumptions.stock_growth_rate = growth;
    }

    let result = pricing::value_instrument(&valuation_input)?;
    Ok(serde_json::to_value(result)?)
}

fn instrument_from_flags(args: &ValueArgs) -> Result<FinancialInstrument, Box<dyn std::error::Error>> {
    let kind: InstrumentKind = args.kind.as_deref().unwrap_or_default().parse()?;

    let instrument = match kind {
        InstrumentKind::Stock => FinancialInstrument::stock(
            args.ticker.clone().ok_or("--ticker is required for a stock")?,
            args.price.ok_or("--price is required for a stock")?,
        ),
        InstrumentKind::Bond => FinancialInstrument::bond(
            args.ticker.clone().ok_or("--ticker is required for a bond")?,
            args.face_value.ok_or("--face-value is required for a bond")?,
            args.coupon_rate.ok_or("--coupon-rate is required for a bond")?,
        ),
        InstrumentKind::Option => {
            let option_type: OptionType = args
                .option_type
                .as_deref()
                .ok_or("--option-type is required for an option")?
                .parse()?;
            FinancialInstrument::option(
                option_type,
                args.underlying
                    .clone()
                    .ok_or("--underlying is required for an option")?,
                args.strike.ok_or("--strike is required for an option")?,
                args.expiration
                    .clone()
                    .ok_or("--expiration is required for an option")?,
            )
        }
    };

    Ok(instrument)
}
