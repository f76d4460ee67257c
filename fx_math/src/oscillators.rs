//! Oscillator indicators
//!
//! Contains:
//! - Relative Strength Index (RSI)
//! - MACD, simplified
//! - Stochastic %K
//!
//! RSI and MACD are single-pass approximations of the textbook
//! indicators: RSI averages every gain and loss in the window with no
//! Wilder smoothing, and the MACD line is the last price minus the
//! window's simple average rather than a difference of EMAs.

use crate::{finite, finite_result, mean_of, series, MathError, Result};
use serde::{Deserialize, Serialize};

/// RSI over every change in the window (0-100).
///
/// A window with gains and no losses reads 100. A completely flat window
/// has no defined RSI and is reported as a degenerate case.
pub fn rsi(values: &[f64]) -> Result<f64> {
    let values = series("RSI", values)?;

    let (gains, losses) = values
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let periods = (values.len() - 1) as f64;
    let avg_gain = finite_result("average gain", gains / periods)?;
    let avg_loss = finite_result("average loss", losses / periods)?;

    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return Err(MathError::DegenerateCase(
                "Prices never changed, RSI is undefined".to_string(),
            ));
        }
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    finite_result("RSI", 100.0 - 100.0 / (1.0 + rs))
}

/// Simplified MACD reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    /// Last price minus the window average
    pub macd: f64,
    /// MACD line minus its value one bar earlier
    pub histogram: f64,
}

fn price_minus_average(values: &[f64]) -> f64 {
    values[values.len() - 1] - mean_of(values)
}

pub fn macd_simplified(values: &[f64]) -> Result<MacdReading> {
    let values = series("MACD", values)?;

    let macd = finite_result("MACD", price_minus_average(values))?;
    let previous = finite_result(
        "previous MACD",
        price_minus_average(&values[..values.len() - 1]),
    )?;

    Ok(MacdReading {
        macd,
        histogram: finite_result("MACD histogram", macd - previous)?,
    })
}

/// Stochastic %K reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stochastic {
    pub k: f64,
}

/// Where the last close sits in the window's high-low range (0-100)
pub fn stochastic_k(highs: &[f64], lows: &[f64], closes: &[f64]) -> Result<Stochastic> {
    let highs = series("highs", highs)?;
    let lows = series("lows", lows)?;
    let closes = series("closes", closes)?;

    if highs.len() != lows.len() || highs.len() != closes.len() {
        return Err(MathError::InvalidInput(format!(
            "Highs, lows and closes must be the same length ({}, {}, {})",
            highs.len(),
            lows.len(),
            closes.len()
        )));
    }

    let period_high = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let period_low = lows.iter().copied().fold(f64::INFINITY, f64::min);
    let last_close = finite("last close", closes[closes.len() - 1])?;

    if period_low > period_high {
        return Err(MathError::InvalidInput(
            "Lowest low cannot be greater than highest high".to_string(),
        ));
    }
    if period_high == period_low {
        return Err(MathError::DegenerateCase(
            "Highest high equals lowest low, %K is undefined".to_string(),
        ));
    }

    Ok(Stochastic {
        k: finite_result(
            "%K",
            (last_close - period_low) / (period_high - period_low) * 100.0,
        )?,
    })
}
