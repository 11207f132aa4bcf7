use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::instrument::{FinancialInstrument, InstrumentKind};
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Periods, Rate};
use crate::FinamlResult;

/// Annual growth assumed for stocks when projecting future value.
pub const DEFAULT_STOCK_GROWTH_RATE: Rate = dec!(0.05);

/// Assumptions the engine applies where an instrument carries no rate of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    /// Per-period growth applied to stock prices
    pub stock_growth_rate: Rate,
}

impl Default for ValuationAssumptions {
    fn default() -> Self {
        Self {
            stock_growth_rate: DEFAULT_STOCK_GROWTH_RATE,
        }
    }
}

/// Present value of a single instrument.
///
/// - Stock: the current price is taken as its present value.
/// - Bond: face value discounted one period at the coupon rate.
/// - Option: zero. No option pricing model is implemented.
pub fn present_value(instrument: &FinancialInstrument) -> FinamlResult<Money> {
    match instrument {
        FinancialInstrument::Stock(stock) => Ok(stock.current_price()),
        FinancialInstrument::Bond(bond) => {
            time_value::discount(bond.face_value(), bond.coupon_rate(), 1)
        }
        FinancialInstrument::Option(_) => Ok(Decimal::ZERO),
    }
}

/// Future value after `periods` compounding periods, with default assumptions.
pub fn future_value(instrument: &FinancialInstrument, periods: Periods) -> FinamlResult<Money> {
    future_value_with(instrument, periods, &ValuationAssumptions::default())
}

/// Future value after `periods` compounding periods.
///
/// - Stock: current price grown at `assumptions.stock_growth_rate`.
/// - Bond: face value grown at the coupon rate.
/// - Option: zero.
pub fn future_value_with(
    instrument: &FinancialInstrument,
    periods: Periods,
    assumptions: &ValuationAssumptions,
) -> FinamlResult<Money> {
    match instrument {
        FinancialInstrument::Stock(stock) => time_value::compound(
            stock.current_price(),
            assumptions.stock_growth_rate,
            periods,
        ),
        FinancialInstrument::Bond(bond) => {
            time_value::compound(bond.face_value(), bond.coupon_rate(), periods)
        }
        FinancialInstrument::Option(_) => Ok(Decimal::ZERO),
    }
}

/// True when the engine returns a placeholder rather than a valuation.
pub fn is_placeholder(instrument: &FinancialInstrument) -> bool {
    matches!(instrument.kind(), InstrumentKind::Option)
}

/// Reasonableness warnings for a single instrument.
pub(crate) fn instrument_warnings(instrument: &FinancialInstrument) -> Vec<String> {
    let mut warnings = Vec::new();

    if instrument.ticker().trim().is_empty() {
        warnings.push(format!("{} has an empty identifier", instrument.kind()));
    }

    match instrument {
        FinancialInstrument::Stock(stock) => {
            if stock.current_price() < Decimal::ZERO {
                warnings.push(format!(
                    "Stock {} has a negative price ({})",
                    stock.ticker_symbol(),
                    stock.current_price()
                ));
            }
        }
        FinancialInstrument::Bond(bond) => {
            if bond.face_value() <= Decimal::ZERO {
                warnings.push(format!(
                    "Bond {} has a non-positive face value ({})",
                    bond.ticker_symbol(),
                    bond.face_value()
                ));
            }
            if bond.coupon_rate() < Decimal::ZERO || bond.coupon_rate() > Decimal::ONE {
                warnings.push(format!(
                    "Bond {} coupon rate {} is outside 0-1; rates are decimals, not percentages",
                    bond.ticker_symbol(),
                    bond.coupon_rate()
                ));
            }
        }
        FinancialInstrument::Option(option) => {
            warnings.push(format!(
                "Option on {} valued at zero: no option pricing model is implemented",
                option.underlying_asset()
            ));
            if let Err(e) = option.expiration() {
                warnings.push(e.to_string());
            }
        }
    }

    warnings
}

/// Input for valuing a single instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentValuationInput {
    pub instrument: FinancialInstrument,
    /// Compounding periods for the future value projection
    pub periods: Periods,
    #[serde(default)]
    pub assumptions: ValuationAssumptions,
}

/// Present and future value of a single instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentValuation {
    pub instrument: String,
    pub kind: InstrumentKind,
    pub present_value: Money,
    pub future_value: Money,
    pub periods: Periods,
    pub is_placeholder: bool,
}

/// Value one instrument today and after `periods` periods.
pub fn value_instrument(
    input: &InstrumentValuationInput,
) -> FinamlResult<ComputationOutput<InstrumentValuation>> {
    let start = Instant::now();
    let instrument = &input.instrument;
    tracing::debug!(kind = %instrument.kind(), periods = input.periods, "valuing instrument");

    let warnings = instrument_warnings(instrument);
    let present_value = present_value(instrument)?;
    let future_value = future_value_with(instrument, input.periods, &input.assumptions)?;

    let output = InstrumentValuation {
        instrument: instrument.to_string(),
        kind: instrument.kind(),
        present_value,
        future_value,
        periods: input.periods,
        is_placeholder: is_placeholder(instrument),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Single-period PV / compound FV",
        &input.assumptions,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::OptionType;
    use crate::FinamlError;
    use rust_decimal_macros::dec;

    fn aapl() -> FinancialInstrument {
        FinancialInstrument::stock("AAPL", dec!(150.0))
    }

    fn xyz() -> FinancialInstrument {
        FinancialInstrument::bond("XYZ", dec!(1000.0), dec!(0.05))
    }

    fn call() -> FinancialInstrument {
        FinancialInstrument::option(OptionType::Call, "AAPL", dec!(160.0), "2023-12-31")
    }

    #[test]
    fn test_stock_present_value_is_price() {
        assert_eq!(present_value(&aapl()).unwrap(), dec!(150.00));
    }

    #[test]
    fn test_bond_present_value_one_period() {
        let pv = present_value(&xyz()).unwrap();
        assert_eq!(pv.round_dp(2), dec!(952.38));
    }

    #[test]
    fn test_bond_coupon_of_minus_one_divides_by_zero() {
        let bond = FinancialInstrument::bond("BAD", dec!(100), dec!(-1));
        assert!(matches!(
            present_value(&bond),
            Err(FinamlError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_future_values_over_five_periods() {
        assert_eq!(future_value(&aapl(), 5).unwrap(), dec!(191.442234375));
        assert_eq!(future_value(&xyz(), 5).unwrap(), dec!(1276.2815625));
    }

    #[test]
    fn test_future_value_identity_at_zero_periods() {
        assert_eq!(future_value(&aapl(), 0).unwrap(), dec!(150.0));
        assert_eq!(future_value(&xyz(), 0).unwrap(), dec!(1000.0));
    }

    #[test]
    fn test_option_is_placeholder_zero() {
        assert_eq!(present_value(&call()).unwrap(), Decimal::ZERO);
        assert_eq!(future_value(&call(), 7).unwrap(), Decimal::ZERO);
        assert!(is_placeholder(&call()));
        assert!(!is_placeholder(&aapl()));
    }

    #[test]
    fn test_custom_stock_growth() {
        let assumptions = ValuationAssumptions {
            stock_growth_rate: dec!(0.10),
        };
        let fv = future_value_with(&aapl(), 2, &assumptions).unwrap();
        assert_eq!(fv, dec!(181.5));
        // Bonds ignore the stock growth assumption
        assert_eq!(
            future_value_with(&xyz(), 1, &assumptions).unwrap(),
            dec!(1050)
        );
    }

    #[test]
    fn test_value_instrument_envelope() {
        let input = InstrumentValuationInput {
            instrument: call(),
            periods: 5,
            assumptions: ValuationAssumptions::default(),
        };
        let out = value_instrument(&input).unwrap();
        assert!(out.result.is_placeholder);
        assert_eq!(out.result.kind, InstrumentKind::Option);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("no option pricing model")));
    }

    #[test]
    fn test_warnings_for_bad_fields() {
        let stock = FinancialInstrument::stock("", dec!(-1));
        let warnings = instrument_warnings(&stock);
        assert_eq!(warnings.len(), 2);

        let option = FinancialInstrument::option(OptionType::Put, "AAPL", dec!(100), "31/12/2023");
        let warnings = instrument_warnings(&option);
        assert!(warnings.iter().any(|w| w.starts_with("Date error")));
    }
}
