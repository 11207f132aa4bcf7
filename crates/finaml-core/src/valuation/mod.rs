//! The valuation engine: pure functions over instruments and cash flows.
//!
//! Each operation comes in two forms. The bare function (`present_value`,
//! `calculate_npv`, ...) returns the exact decimal result. The `value_*` /
//! `analyse_*` functions take a serde input struct and wrap the result in a
//! [`ComputationOutput`](crate::types::ComputationOutput) envelope with
//! warnings and metadata.

pub mod cash_flow;
pub mod portfolio;
pub mod pricing;
pub mod sensitivity;

pub use cash_flow::{analyse_npv, calculate_npv, NpvInput, NpvOutput};
pub use portfolio::{simulate_portfolio, value_portfolio, PortfolioInput, PortfolioValuation};
pub use pricing::{
    future_value, future_value_with, present_value, value_instrument, InstrumentValuation,
    InstrumentValuationInput, ValuationAssumptions, DEFAULT_STOCK_GROWTH_RATE,
};
pub use sensitivity::{
    analyse_sensitivity, sensitivity_analysis, RateSweep, SensitivityInput, SensitivityOutput,
    SensitivityTable,
};
