use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::fmt::Write;

use finaml_core::instrument::{FinancialInstrument, OptionType};
use finaml_core::valuation::{
    calculate_npv, future_value, present_value, sensitivity_analysis, simulate_portfolio,
};

/// Format a monetary amount with two fractional digits and a dollar sign.
pub fn dollars(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// Format a decimal rate as a percentage, keeping at least one fractional digit.
pub fn percent(rate: Decimal) -> String {
    let scaled = (rate * dec!(100)).normalize();
    if scaled.scale() == 0 {
        format!("{scaled}.0%")
    } else {
        format!("{scaled}%")
    }
}

/// Build the reference report: three sample instruments, their values, a
/// five-period cash flow and its NPV sensitivity.
pub fn render_report() -> Result<String, Box<dyn std::error::Error>> {
    let stock = FinancialInstrument::stock("AAPL", dec!(150.0));
    let bond = FinancialInstrument::bond("XYZ", dec!(1000.0), dec!(0.05));
    let option = FinancialInstrument::option(OptionType::Call, "AAPL", dec!(160.0), "2023-12-31");
    let portfolio = vec![stock.clone(), bond.clone(), option.clone()];

    let pv_stock = present_value(&stock)?;
    let pv_bond = present_value(&bond)?;
    let fv_stock = future_value(&stock, 5)?;
    let fv_bond = future_value(&bond, 5)?;
    let total_value = simulate_portfolio(&portfolio)?;

    let cash_flow = [dec!(-100), dec!(20), dec!(30), dec!(40), dec!(50)];
    let discount_rates = [dec!(0.05), dec!(0.08), dec!(0.1), dec!(0.12), dec!(0.15)];

    let npv_result = calculate_npv(&cash_flow, dec!(0.1))?;
    let sensitivity = sensitivity_analysis(&cash_flow, &discount_rates)?;

    let mut out = String::new();
    writeln!(out, "Financial Modeling Example:")?;
    for instrument in &portfolio {
        writeln!(out, " - {instrument}")?;
    }
    writeln!(out, "Present Value of Stock: {}", dollars(pv_stock))?;
    writeln!(out, "Present Value of Bond: {}", dollars(pv_bond))?;
    writeln!(out, "Future Value of Stock (5 years): {}", dollars(fv_stock))?;
    writeln!(out, "Future Value of Bond (5 years): {}", dollars(fv_bond))?;
    writeln!(out, "Total Value of Portfolio: {}", dollars(total_value))?;
    writeln!(
        out,
        "Net Present Value (NPV) at 10% discount rate: {}",
        dollars(npv_result)
    )?;
    writeln!(out, "Sensitivity Analysis on NPV:")?;
    for point in &sensitivity {
        writeln!(
            out,
            " - Discount Rate {}: {}",
            percent(point.discount_rate),
            dollars(point.npv)
        )?;
    }

    Ok(out)
}
