use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinamlError {
    #[error("Unsupported instrument variant: {0}")]
    UnsupportedVariant(String),

    #[error("Degenerate discount rate {rate}: rate must be greater than -100%")]
    DegenerateDiscountRate { rate: Decimal },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinamlError {
    fn from(e: serde_json::Error) -> Self {
        FinamlError::SerializationError(e.to_string())
    }
}
