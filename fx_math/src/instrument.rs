//! Instrument symbols, trade direction and reference rate tables

use crate::{positive, MathError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Rate used for any symbol missing from a [`RateTable`].
pub const DEFAULT_RATE: f64 = 1.0;

/// Metals quoted in whole-dollar increments.
const WHOLE_UNIT_METALS: [&str; 3] = ["XAU", "XPT", "XPD"];

/// A currency pair or asset, e.g. `EUR/USD` or `XAU/USD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instrument {
    base: String,
    quote: String,
}

impl Instrument {
    /// Parse an instrument from `BASE/QUOTE` or a six letter `BASEQUOTE` symbol
    pub fn new(symbol: &str) -> Result<Self> {
        symbol.parse()
    }

    /// Base currency or asset code
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Quote currency code
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Canonical `BASE/QUOTE` symbol
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }

    pub fn is_jpy_quoted(&self) -> bool {
        self.quote == "JPY"
    }

    /// True for metals such as gold that move in whole-dollar pips
    pub fn is_whole_unit_metal(&self) -> bool {
        WHOLE_UNIT_METALS.contains(&self.base.as_str())
    }
}

fn valid_code(code: &str) -> bool {
    (2..=5).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric())
}

impl FromStr for Instrument {
    type Err = MathError;

    fn from_str(symbol: &str) -> Result<Self> {
        let cleaned = symbol.trim().to_ascii_uppercase();

        let (base, quote) = match cleaned.split_once('/') {
            Some((base, quote)) => (base.to_string(), quote.to_string()),
            None if cleaned.len() == 6 && cleaned.is_ascii() => {
                (cleaned[..3].to_string(), cleaned[3..].to_string())
            }
            None => {
                return Err(MathError::InvalidInput(format!(
                    "Unrecognised instrument symbol '{}'",
                    symbol
                )))
            }
        };

        if !valid_code(&base) || !valid_code(&quote) {
            return Err(MathError::InvalidInput(format!(
                "Unrecognised instrument symbol '{}'",
                symbol
            )));
        }

        Ok(Self { base, quote })
    }
}

impl TryFrom<String> for Instrument {
    type Error = MathError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Instrument> for String {
    fn from(instrument: Instrument) -> Self {
        instrument.symbol()
    }
}

impl Default for Instrument {
    /// EUR/USD, the most traded pair
    fn default() -> Self {
        Self {
            base: "EUR".to_string(),
            quote: "USD".to_string(),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Side of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Long position, profits when price rises
    Buy,
    /// Short position, profits when price falls
    Sell,
}

impl Direction {
    /// +1 for buys, -1 for sells
    pub fn sign(self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }
}

/// Read-only mapping from symbol to reference price.
///
/// Tables are built by whoever fetches prices; calculators only read
/// them. Lookups of unknown symbols fall back to [`DEFAULT_RATE`].
/// Deserializing applies the same checks as [`RateTable::insert`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a rate. Rates must be finite and positive.
    pub fn insert(&mut self, symbol: &str, rate: f64) -> Result<()> {
        let rate = positive(&format!("rate for {}", symbol), rate)?;
        self.rates.insert(symbol.trim().to_ascii_uppercase(), rate);
        Ok(())
    }

    /// Builder form of [`RateTable::insert`]
    pub fn with_rate(mut self, symbol: &str, rate: f64) -> Result<Self> {
        self.insert(symbol, rate)?;
        Ok(self)
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.rates.get(&symbol.trim().to_ascii_uppercase()).copied()
    }

    /// Rate for `symbol`, or [`DEFAULT_RATE`] when the table has none
    pub fn rate_or_default(&self, symbol: &str) -> f64 {
        self.get(symbol).unwrap_or_else(|| {
            warn!("No rate for {}, using default of {}", symbol, DEFAULT_RATE);
            DEFAULT_RATE
        })
    }

    /// Reference price for an instrument
    pub fn price_of(&self, instrument: &Instrument) -> f64 {
        self.rate_or_default(&instrument.symbol())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Static reference prices for the supported instruments
    pub fn default_instrument_prices() -> Self {
        Self::from_static(&[
            ("EUR/USD", 1.0850),
            ("GBP/USD", 1.2650),
            ("USD/JPY", 149.50),
            ("USD/CHF", 0.8850),
            ("AUD/USD", 0.6550),
            ("USD/CAD", 1.3650),
            ("NZD/USD", 0.6150),
            ("EUR/GBP", 0.8580),
            ("EUR/JPY", 162.15),
            ("GBP/JPY", 189.10),
            ("EUR/CHF", 0.9600),
            ("AUD/JPY", 97.90),
            ("CAD/JPY", 109.50),
            ("NZD/JPY", 91.90),
            ("EUR/AUD", 1.6550),
            ("GBP/AUD", 1.9300),
            ("EUR/CAD", 1.4800),
            ("GBP/CAD", 1.7250),
            ("AUD/CAD", 0.8940),
            ("AUD/NZD", 1.0640),
            ("NZD/CAD", 0.8410),
            ("XAU/USD", 2350.00),
            ("XAG/USD", 30.50),
            ("BTC/USD", 67500.00),
            ("ETH/USD", 3450.00),
        ])
    }

    /// Units of each currency per one US dollar
    pub fn default_currency_rates() -> Self {
        Self::from_static(&[
            ("USD", 1.0),
            ("EUR", 0.92),
            ("GBP", 0.79),
            ("JPY", 149.50),
            ("CHF", 0.88),
            ("AUD", 1.53),
            ("CAD", 1.36),
            ("NZD", 1.63),
        ])
    }

    fn from_static(entries: &[(&str, f64)]) -> Self {
        Self {
            rates: entries
                .iter()
                .map(|&(symbol, rate)| (symbol.to_string(), rate))
                .collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, f64>> for RateTable {
    type Error = MathError;

    /// Rejects the whole map if any rate is not finite and positive
    fn try_from(rates: BTreeMap<String, f64>) -> Result<Self> {
        let mut table = RateTable::new();
        for (symbol, rate) in rates {
            table.insert(&symbol, rate)?;
        }
        Ok(table)
    }
}

impl From<RateTable> for BTreeMap<String, f64> {
    fn from(table: RateTable) -> Self {
        table.rates
    }
}

impl FromIterator<(String, f64)> for RateTable {
    /// Collects entries, skipping any rate that is not finite and positive
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut table = RateTable::new();
        for (symbol, rate) in iter {
            if let Err(e) = table.insert(&symbol, rate) {
                warn!("Skipping rate for {}: {}", symbol, e);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_and_compact_symbols() {
        let slash = Instrument::new("eur/usd").unwrap();
        let compact = Instrument::new("EURUSD").unwrap();
        assert_eq!(slash, compact);
        assert_eq!(slash.base(), "EUR");
        assert_eq!(slash.quote(), "USD");
        assert_eq!(slash.to_string(), "EUR/USD");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Instrument::new("").is_err());
        assert!(Instrument::new("EUR").is_err());
        assert!(Instrument::new("EUR/").is_err());
        assert!(Instrument::new("EU R/USD").is_err());
    }

    #[test]
    fn test_classification() {
        assert!(Instrument::new("GBP/JPY").unwrap().is_jpy_quoted());
        assert!(!Instrument::new("JPY/USD").unwrap().is_jpy_quoted());
        assert!(Instrument::new("XAU/USD").unwrap().is_whole_unit_metal());
        assert!(!Instrument::new("XAG/USD").unwrap().is_whole_unit_metal());
    }

    #[test]
    fn test_default_is_eurusd() {
        assert_eq!(Instrument::default(), Instrument::new("EUR/USD").unwrap());
    }

    #[test]
    fn test_deserialized_table_is_validated() {
        let table: RateTable = serde_json::from_str(r#"{"eur/usd": 1.085, "USD/JPY": 149.5}"#).unwrap();
        assert_eq!(table.get("EUR/USD"), Some(1.085));
        assert_eq!(table.len(), 2);

        assert!(serde_json::from_str::<RateTable>(r#"{"EUR/USD": -1}"#).is_err());
        assert!(serde_json::from_str::<RateTable>(r#"{"EUR/USD": 1.08, "GBP/USD": 0}"#).is_err());
    }

    #[test]
    fn test_table_serializes_as_plain_map() {
        let table = RateTable::new().with_rate("EUR/USD", 1.085).unwrap();
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"{"EUR/USD":1.085}"#);
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Buy.sign(), 1.0);
        assert_eq!(Direction::Sell.sign(), -1.0);
    }

    #[test]
    fn test_rate_table_defaults_missing_entries() {
        let table = RateTable::new().with_rate("eur/usd", 1.1).unwrap();
        assert_eq!(table.get("EUR/USD"), Some(1.1));
        assert_eq!(table.rate_or_default("GBP/USD"), DEFAULT_RATE);
        assert!(RateTable::new().insert("EUR/USD", 0.0).is_err());
        assert!(RateTable::new().insert("EUR/USD", f64::NAN).is_err());
    }

    #[test]
    fn test_from_iter_skips_bad_rates() {
        let table: RateTable = vec![
            ("EUR/USD".to_string(), 1.08),
            ("BAD/USD".to_string(), -1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_default_tables() {
        let prices = RateTable::default_instrument_prices();
        assert_eq!(prices.get("XAU/USD"), Some(2350.0));
        assert_eq!(prices.len(), 25);

        let currencies = RateTable::default_currency_rates();
        assert_eq!(currencies.get("USD"), Some(1.0));
        assert_eq!(currencies.get("JPY"), Some(149.5));
    }
}
