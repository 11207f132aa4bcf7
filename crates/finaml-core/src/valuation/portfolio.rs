use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinamlError;
use crate::instrument::{FinancialInstrument, InstrumentKind};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinamlResult;

use super::pricing::{instrument_warnings, is_placeholder, present_value};

/// Sum of present values across the portfolio, in insertion order.
///
/// An empty portfolio is worth zero.
pub fn simulate_portfolio(portfolio: &[FinancialInstrument]) -> FinamlResult<Money> {
    portfolio.iter().try_fold(Decimal::ZERO, |total, instrument| {
        let pv = present_value(instrument)?;
        total
            .checked_add(pv)
            .ok_or_else(|| FinamlError::NumericOverflow {
                context: "portfolio present value total".into(),
            })
    })
}

/// Input for portfolio valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInput {
    /// Positions in the order they should be summed and reported
    pub positions: Vec<FinancialInstrument>,
}

/// Present value of one position and its share of the total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionValue {
    pub instrument: String,
    pub kind: InstrumentKind,
    pub present_value: Money,
    /// None when the portfolio total is zero
    pub weight: Option<Rate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioValuation {
    pub total_present_value: Money,
    pub position_count: usize,
    pub placeholder_count: usize,
    pub positions: Vec<PositionValue>,
}

/// Value every position and aggregate the portfolio.
pub fn value_portfolio(input: &PortfolioInput) -> FinamlResult<ComputationOutput<PortfolioValuation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    tracing::debug!(positions = input.positions.len(), "valuing portfolio");

    if input.positions.is_empty() {
        warnings.push("Portfolio is empty; total present value is zero".into());
    }

    let total = simulate_portfolio(&input.positions)?;

    let mut positions = Vec::with_capacity(input.positions.len());
    for instrument in &input.positions {
        warnings.extend(instrument_warnings(instrument));
        let pv = present_value(instrument)?;
        let weight = if total.is_zero() {
            None
        } else {
            pv.checked_div(total)
        };
        positions.push(PositionValue {
            instrument: instrument.to_string(),
            kind: instrument.kind(),
            present_value: pv,
            weight,
        });
    }

    let placeholder_count = input.positions.iter().filter(|i| is_placeholder(i)).count();

    let output = PortfolioValuation {
        total_present_value: total,
        position_count: positions.len(),
        placeholder_count,
        positions,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Sum of per-instrument present values",
        &serde_json::json!({ "positions": input.positions.len() }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::OptionType;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<FinancialInstrument> {
        vec![
            FinancialInstrument::stock("AAPL", dec!(150.0)),
            FinancialInstrument::bond("XYZ", dec!(1000.0), dec!(0.05)),
            FinancialInstrument::option(OptionType::Call, "AAPL", dec!(160.0), "2023-12-31"),
        ]
    }

    #[test]
    fn test_empty_portfolio_is_zero() {
        assert_eq!(simulate_portfolio(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_single_position_equals_its_present_value() {
        let bond = FinancialInstrument::bond("XYZ", dec!(1000.0), dec!(0.05));
        assert_eq!(
            simulate_portfolio(std::slice::from_ref(&bond)).unwrap(),
            present_value(&bond).unwrap()
        );
    }

    #[test]
    fn test_sample_portfolio_total() {
        let total = simulate_portfolio(&sample()).unwrap();
        assert_eq!(total.round_dp(2), dec!(1102.38));
    }

    #[test]
    fn test_duplicate_positions_counted_twice() {
        let stock = FinancialInstrument::stock("AAPL", dec!(150.0));
        let total = simulate_portfolio(&[stock.clone(), stock]).unwrap();
        assert_eq!(total, dec!(300));
    }

    #[test]
    fn test_value_portfolio_breakdown() {
        let out = value_portfolio(&PortfolioInput { positions: sample() }).unwrap();
        let result = out.result;
        assert_eq!(result.position_count, 3);
        assert_eq!(result.placeholder_count, 1);
        assert_eq!(result.positions[2].present_value, Decimal::ZERO);
        assert_eq!(result.positions[2].weight, Some(Decimal::ZERO));

        let weight_sum: Decimal = result.positions.iter().filter_map(|p| p.weight).sum();
        assert!((weight_sum - Decimal::ONE).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_value_empty_portfolio_warns() {
        let out = value_portfolio(&PortfolioInput { positions: vec![] }).unwrap();
        assert_eq!(out.result.total_present_value, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("empty")));
    }
}
