use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FinamlError;
use crate::types::{Money, Rate};
use crate::FinamlResult;

/// An equity spot quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stock {
    ticker_symbol: String,
    current_price: Money,
}

impl Stock {
    pub fn new(ticker_symbol: impl Into<String>, current_price: Money) -> Self {
        Self {
            ticker_symbol: ticker_symbol.into(),
            current_price,
        }
    }

    pub fn ticker_symbol(&self) -> &str {
        &self.ticker_symbol
    }

    pub fn current_price(&self) -> Money {
        self.current_price
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stock(ticker_symbol={}, current_price={})",
            self.ticker_symbol, self.current_price
        )
    }
}

/// A fixed-income instrument valued off its face value and coupon rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bond {
    ticker_symbol: String,
    face_value: Money,
    coupon_rate: Rate,
}

impl Bond {
    pub fn new(ticker_symbol: impl Into<String>, face_value: Money, coupon_rate: Rate) -> Self {
        Self {
            ticker_symbol: ticker_symbol.into(),
            face_value,
            coupon_rate,
        }
    }

    pub fn ticker_symbol(&self) -> &str {
        &self.ticker_symbol
    }

    pub fn face_value(&self) -> Money {
        self.face_value
    }

    pub fn coupon_rate(&self) -> Rate {
        self.coupon_rate
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bond(ticker_symbol={}, face_value={}, coupon_rate={})",
            self.ticker_symbol, self.face_value, self.coupon_rate
        )
    }
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    #[serde(alias = "call", alias = "CALL")]
    Call,
    #[serde(alias = "put", alias = "PUT")]
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("Call"),
            OptionType::Put => f.write_str("Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = FinamlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(FinamlError::InvalidInput {
                field: "option_type".into(),
                reason: format!("expected Call or Put, got '{other}'"),
            }),
        }
    }
}

/// A derivative contract on an underlying asset.
///
/// The expiration date is kept as free text; it is not validated at
/// construction. Use [`OptionContract::expiration`] to parse it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionContract {
    option_type: OptionType,
    underlying_asset: String,
    strike_price: Money,
    expiration_date: String,
}

impl OptionContract {
    pub fn new(
        option_type: OptionType,
        underlying_asset: impl Into<String>,
        strike_price: Money,
        expiration_date: impl Into<String>,
    ) -> Self {
        Self {
            option_type,
            underlying_asset: underlying_asset.into(),
            strike_price,
            expiration_date: expiration_date.into(),
        }
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn underlying_asset(&self) -> &str {
        &self.underlying_asset
    }

    pub fn strike_price(&self) -> Money {
        self.strike_price
    }

    pub fn expiration_date(&self) -> &str {
        &self.expiration_date
    }

    /// Parse the expiration date as an ISO-8601 calendar date (YYYY-MM-DD).
    pub fn expiration(&self) -> FinamlResult<NaiveDate> {
        NaiveDate::parse_from_str(self.expiration_date.trim(), "%Y-%m-%d").map_err(|e| {
            FinamlError::DateError(format!(
                "expiration date '{}' is not YYYY-MM-DD: {e}",
                self.expiration_date
            ))
        })
    }
}

impl fmt::Display for OptionContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Option(option_type={}, underlying_asset={}, strike_price={}, expiration_date={})",
            self.option_type, self.underlying_asset, self.strike_price, self.expiration_date
        )
    }
}

/// The closed set of instruments the valuation engine understands.
///
/// Serialized as an internally tagged object, e.g.
/// `{"type": "bond", "ticker_symbol": "XYZ", "face_value": "1000.0", "coupon_rate": "0.05"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FinancialInstrument {
    Stock(Stock),
    Bond(Bond),
    Option(OptionContract),
}

impl FinancialInstrument {
    pub fn stock(ticker_symbol: impl Into<String>, current_price: Money) -> Self {
        FinancialInstrument::Stock(Stock::new(ticker_symbol, current_price))
    }

    pub fn bond(ticker_symbol: impl Into<String>, face_value: Money, coupon_rate: Rate) -> Self {
        FinancialInstrument::Bond(Bond::new(ticker_symbol, face_value, coupon_rate))
    }

    pub fn option(
        option_type: OptionType,
        underlying_asset: impl Into<String>,
        strike_price: Money,
        expiration_date: impl Into<String>,
    ) -> Self {
        FinancialInstrument::Option(OptionContract::new(
            option_type,
            underlying_asset,
            strike_price,
            expiration_date,
        ))
    }

    pub fn kind(&self) -> InstrumentKind {
        match self {
            FinancialInstrument::Stock(_) => InstrumentKind::Stock,
            FinancialInstrument::Bond(_) => InstrumentKind::Bond,
            FinancialInstrument::Option(_) => InstrumentKind::Option,
        }
    }

    /// Identifying symbol; the underlying asset for options.
    pub fn ticker(&self) -> &str {
        match self {
            FinancialInstrument::Stock(s) => s.ticker_symbol(),
            FinancialInstrument::Bond(b) => b.ticker_symbol(),
            FinancialInstrument::Option(o) => o.underlying_asset(),
        }
    }
}

impl fmt::Display for FinancialInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinancialInstrument::Stock(s) => s.fmt(f),
            FinancialInstrument::Bond(b) => b.fmt(f),
            FinancialInstrument::Option(o) => o.fmt(f),
        }
    }
}

impl From<Stock> for FinancialInstrument {
    fn from(s: Stock) -> Self {
        FinancialInstrument::Stock(s)
    }
}

impl From<Bond> for FinancialInstrument {
    fn from(b: Bond) -> Self {
        FinancialInstrument::Bond(b)
    }
}

impl From<OptionContract> for FinancialInstrument {
    fn from(o: OptionContract) -> Self {
        FinancialInstrument::Option(o)
    }
}

/// Discriminant of [`FinancialInstrument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    Stock,
    Bond,
    Option,
}

impl InstrumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Stock => "stock",
            InstrumentKind::Bond => "bond",
            InstrumentKind::Option => "option",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentKind {
    type Err = FinamlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" | "equity" => Ok(InstrumentKind::Stock),
            "bond" => Ok(InstrumentKind::Bond),
            "option" => Ok(InstrumentKind::Option),
            other => Err(FinamlError::UnsupportedVariant(other.to_string())),
        }
    }
}
