//! Pip size, pip value and lot conversions

use crate::instrument::Instrument;
use crate::{finite_result, non_negative, Result};
use serde::{Deserialize, Serialize};

/// Units of base currency in one standard lot
pub const STANDARD_LOT_UNITS: f64 = 100_000.0;

/// Account-currency value of one pip on one standard lot
pub const STANDARD_PIP_VALUE: f64 = 10.0;

/// Per-lot pip value for JPY-quoted pairs (1000 yen per pip, quoted per 100)
pub const JPY_PIP_VALUE: f64 = 1000.0 / 100.0;

/// Pip size for an instrument: 0.01 for JPY-quoted pairs, 1 for whole-unit
/// metals, 0.0001 for everything else.
pub fn pip_size(instrument: &Instrument) -> f64 {
    if instrument.is_jpy_quoted() {
        0.01
    } else if instrument.is_whole_unit_metal() {
        1.0
    } else {
        0.0001
    }
}

/// Pip value per standard lot, before account-currency scaling
pub fn pip_value_per_lot(instrument: &Instrument) -> f64 {
    if instrument.is_jpy_quoted() {
        JPY_PIP_VALUE
    } else {
        STANDARD_PIP_VALUE
    }
}

/// Static scaling from a USD pip value into the account currency.
/// Currencies without a factor are treated as USD.
pub fn account_currency_factor(account_currency: &str) -> f64 {
    match account_currency.trim().to_ascii_uppercase().as_str() {
        "EUR" => 0.92,
        "GBP" => 0.79,
        "JPY" => 149.5,
        _ => 1.0,
    }
}

/// Value of one pip for `lots` standard lots, in the account currency
pub fn pip_value(instrument: &Instrument, lots: f64, account_currency: &str) -> Result<f64> {
    let lots = non_negative("lots", lots)?;
    finite_result(
        "pip value",
        lots * pip_value_per_lot(instrument) * account_currency_factor(account_currency),
    )
}

/// Position size expressed in units and smaller lot denominations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotUnits {
    /// Units of base currency
    pub units: f64,
    /// Mini lots (10,000 units each)
    pub mini: f64,
    /// Micro lots (1,000 units each)
    pub micro: f64,
}

/// Convert standard lots into units, mini lots and micro lots
pub fn lots_to_units(lots: f64) -> Result<LotUnits> {
    let lots = non_negative("lots", lots)?;
    Ok(LotUnits {
        units: finite_result("units", lots * STANDARD_LOT_UNITS)?,
        mini: lots * 10.0,
        micro: lots * 100.0,
    })
}
