use finaml_core::instrument::{FinancialInstrument, OptionType};
use finaml_core::valuation::{
    analyse_sensitivity, calculate_npv, future_value, present_value, sensitivity_analysis,
    simulate_portfolio, value_instrument, value_portfolio, InstrumentValuationInput,
    PortfolioInput, SensitivityInput, ValuationAssumptions,
};
use finaml_core::FinamlError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn stock() -> FinancialInstrument {
    FinancialInstrument::stock("AAPL", dec!(150.0))
}

fn bond() -> FinancialInstrument {
    FinancialInstrument::bond("XYZ", dec!(1000.0), dec!(0.05))
}

fn option() -> FinancialInstrument {
    FinancialInstrument::option(OptionType::Call, "AAPL", dec!(160.0), "2023-12-31")
}

// ===========================================================================
// Reference scenario
// ===========================================================================

#[test]
fn test_reference_present_values() {
    assert_eq!(present_value(&stock()).unwrap().round_dp(2), dec!(150.00));
    assert_eq!(present_value(&bond()).unwrap().round_dp(2), dec!(952.38));
    assert_eq!(present_value(&option()).unwrap(), Decimal::ZERO);
}

#[test]
fn test_reference_future_values() {
    // 150 * 1.05^5 and 1000 * 1.05^5
    assert_eq!(future_value(&stock(), 5).unwrap().round_dp(2), dec!(191.44));
    assert_eq!(future_value(&bond(), 5).unwrap().round_dp(2), dec!(1276.28));
    assert_eq!(future_value(&option(), 5).unwrap(), Decimal::ZERO);
}

#[test]
fn test_reference_portfolio_total() {
    let total = simulate_portfolio(&[stock(), bond(), option()]).unwrap();
    // 150.00 + 952.38 + 0
    assert_eq!(total.round_dp(2), dec!(1102.38));
}

#[test]
fn test_reference_npv() {
    let cfs = vec![dec!(-100), dec!(20), dec!(30), dec!(40), dec!(50)];
    let npv = calculate_npv(&cfs, dec!(0.1)).unwrap();
    // -100 + 18.1818 + 24.7934 + 30.0526 + 34.1507
    assert!((npv - dec!(7.1785)).abs() < dec!(0.0001), "got {npv}");
}

#[test]
fn test_reference_sensitivity_sweep() {
    let cfs = vec![dec!(-100), dec!(20), dec!(30), dec!(40), dec!(50)];
    let rates = [dec!(0.05), dec!(0.08), dec!(0.1), dec!(0.12), dec!(0.15)];
    let table = sensitivity_analysis(&cfs, &rates).unwrap();

    assert_eq!(table.len(), 5);
    let npvs: Vec<Decimal> = table.iter().map(|p| p.npv.round_dp(2)).collect();
    assert_eq!(
        npvs,
        vec![dec!(21.95), dec!(12.74), dec!(7.18), dec!(2.02), dec!(-5.04)]
    );
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_single_cash_flow_npv_ignores_rate() {
    for rate in [dec!(0), dec!(0.01), dec!(0.25), dec!(10)] {
        assert_eq!(calculate_npv(&[dec!(42.5)], rate).unwrap(), dec!(42.5));
    }
}

#[test]
fn test_zero_periods_is_identity() {
    assert_eq!(future_value(&stock(), 0).unwrap(), dec!(150.0));
    assert_eq!(future_value(&bond(), 0).unwrap(), dec!(1000.0));
}

#[test]
fn test_single_instrument_portfolio() {
    for instrument in [stock(), bond(), option()] {
        assert_eq!(
            simulate_portfolio(std::slice::from_ref(&instrument)).unwrap(),
            present_value(&instrument).unwrap()
        );
    }
}

#[test]
fn test_portfolio_total_independent_of_order() {
    let forward = simulate_portfolio(&[stock(), bond(), option()]).unwrap();
    let reverse = simulate_portfolio(&[option(), bond(), stock()]).unwrap();
    assert_eq!(forward, reverse);
}

#[test]
fn test_degenerate_rate_in_sensitivity() {
    let err = sensitivity_analysis(&[dec!(-100), dec!(110)], &[dec!(0.1), dec!(-1)]).unwrap_err();
    assert!(matches!(err, FinamlError::DegenerateDiscountRate { .. }));
}

// ===========================================================================
// Envelopes
// ===========================================================================

#[test]
fn test_value_instrument_with_custom_growth() {
    let input = InstrumentValuationInput {
        instrument: stock(),
        periods: 1,
        assumptions: ValuationAssumptions {
            stock_growth_rate: dec!(0.02),
        },
    };
    let out = value_instrument(&input).unwrap();
    assert_eq!(out.result.present_value, dec!(150.0));
    assert_eq!(out.result.future_value, dec!(153));
    assert!(out.warnings.is_empty());
    assert_eq!(out.assumptions["stock_growth_rate"], "0.02");
}

#[test]
fn test_portfolio_input_from_json() {
    let json = r#"{
        "positions": [
            {"type": "stock", "ticker_symbol": "AAPL", "current_price": "150.0"},
            {"type": "bond", "ticker_symbol": "XYZ", "face_value": 1000.0, "coupon_rate": 0.05},
            {"type": "option", "option_type": "Call", "underlying_asset": "AAPL",
             "strike_price": "160.0", "expiration_date": "2023-12-31"}
        ]
    }"#;
    let input: PortfolioInput = serde_json::from_str(json).unwrap();
    let out = value_portfolio(&input).unwrap();
    assert_eq!(out.result.total_present_value.round_dp(2), dec!(1102.38));
    assert_eq!(out.result.positions[0].instrument, stock().to_string());
}

#[test]
fn test_portfolio_input_from_yaml() {
    let yaml = "
positions:
  - type: stock
    ticker_symbol: MSFT
    current_price: '410.5'
  - type: bond
    ticker_symbol: T10
    face_value: '100'
    coupon_rate: '0.04'
";
    let input: PortfolioInput = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(input.positions.len(), 2);
    let total = simulate_portfolio(&input.positions).unwrap();
    // 410.5 + 100 / 1.04
    assert_eq!(total.round_dp(4), dec!(506.6538));
}

#[test]
fn test_unknown_instrument_type_rejected() {
    let json = r#"{"type": "future", "ticker_symbol": "ES"}"#;
    assert!(serde_json::from_str::<FinancialInstrument>(json).is_err());
}

#[test]
fn test_sensitivity_with_sweep_and_explicit_rates() {
    let input: SensitivityInput = serde_json::from_value(serde_json::json!({
        "cash_flows": ["-100", "60", "60"],
        "discount_rates": ["0.10"],
        "sweep": {"min": "0.05", "max": "0.15", "step": "0.05"}
    }))
    .unwrap();
    let out = analyse_sensitivity(&input).unwrap();
    // 0.10 appears twice and collapses into its first position
    let rates: Vec<Decimal> = out.result.table.rates().collect();
    assert_eq!(rates, vec![dec!(0.10), dec!(0.05), dec!(0.15)]);
    assert_eq!(out.warnings.len(), 1);
}
