//! Price feed payloads
//!
//! The desk never talks to a price feed itself. These types parse what a
//! feed hands back: a multi-pair snapshot, or a single-pair quote.

use crate::{DeskError, Result};
use chrono::{DateTime, Utc};
use fx_math::trade::{spread_cost, SpreadCost};
use fx_math::{Instrument, RateTable};
use log::warn;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Where a price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Live,
    Simulated,
    Fallback,
}

/// Multi-pair price snapshot, `{success, prices, timestamp, source}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub success: bool,
    pub prices: BTreeMap<String, f64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<QuoteSource>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RateSnapshot {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Build a rate table from the snapshot.
    ///
    /// A failed snapshot still carries the feed's base prices and is
    /// accepted with a warning. A snapshot with no usable prices is an error.
    pub fn into_rate_table(self) -> Result<RateTable> {
        if !self.success {
            warn!(
                "Rate feed reported failure ({}), using the prices it returned",
                self.error.as_deref().unwrap_or("no reason given")
            );
        }

        let table: RateTable = self.prices.into_iter().collect();
        if table.is_empty() {
            return Err(DeskError::Feed(
                "Snapshot contains no usable prices".to_string(),
            ));
        }
        Ok(table)
    }
}

/// Single-pair quote, `{pair, price, bid, ask, change, timestamp, source}`.
///
/// Decoding rejects a quote without a finite, positive price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub pair: Instrument,
    pub price: f64,
    bid: Option<f64>,
    ask: Option<f64>,
    pub change: f64,
    pub timestamp: DateTime<Utc>,
    pub source: QuoteSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct QuoteRecord {
    pair: Instrument,
    price: f64,
    #[serde(default)]
    bid: Option<f64>,
    #[serde(default)]
    ask: Option<f64>,
    #[serde(default)]
    change: f64,
    timestamp: DateTime<Utc>,
    source: QuoteSource,
    #[serde(default)]
    error: Option<String>,
}

impl<'de> Deserialize<'de> for Quote {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = QuoteRecord::deserialize(deserializer)?;
        if usable(Some(record.price)).is_none() {
            return Err(de::Error::custom(format!(
                "quote for {} has no usable price ({})",
                record.pair, record.price
            )));
        }

        Ok(Quote {
            pair: record.pair,
            price: record.price,
            bid: record.bid,
            ask: record.ask,
            change: record.change,
            timestamp: record.timestamp,
            source: record.source,
            error: record.error,
        })
    }
}

impl Quote {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Quote built from a reference table when no live price is available
    pub fn fallback(pair: Instrument, prices: &RateTable, timestamp: DateTime<Utc>) -> Self {
        let price = prices.price_of(&pair);
        Self {
            pair,
            price,
            bid: None,
            ask: None,
            change: 0.0,
            timestamp,
            source: QuoteSource::Fallback,
            error: None,
        }
    }

    /// Bid price; a missing or non-positive bid reads as the quote price
    pub fn bid(&self) -> f64 {
        usable(self.bid).unwrap_or(self.price)
    }

    /// Ask price; a missing or non-positive ask reads as the quote price
    pub fn ask(&self) -> f64 {
        usable(self.ask).unwrap_or(self.price)
    }

    pub fn is_live(&self) -> bool {
        self.source == QuoteSource::Live
    }

    /// Cost of crossing this quote's spread with `lots`
    pub fn spread_cost(&self, lots: f64) -> Result<SpreadCost> {
        Ok(spread_cost(self.bid(), self.ask(), &self.pair, lots)?)
    }
}

fn usable(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite() && *p > 0.0)
}
