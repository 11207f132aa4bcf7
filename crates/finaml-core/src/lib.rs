pub mod error;
pub mod instrument;
pub mod time_value;
pub mod types;

#[cfg(feature = "valuation")]
pub mod valuation;

pub use error::FinamlError;
pub use instrument::{Bond, FinancialInstrument, InstrumentKind, OptionContract, OptionType, Stock};
pub use types::*;

/// Standard result type for all finaml operations
pub type FinamlResult<T> = Result<T, FinamlError>;
