//! Volatility indicators
//!
//! Contains:
//! - Standard Deviation (population)
//! - Bollinger Bands
//! - Average True Range (ATR)

use crate::{finite, finite_result, mean_of, positive, series, MathError, Result};
use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dispersion {
    pub mean: f64,
    pub std_dev: f64,
}

/// Population (not sample) standard deviation
pub fn standard_deviation(values: &[f64]) -> Result<Dispersion> {
    let values = series("standard deviation", values)?;

    let mean = finite_result("mean", mean_of(values))?;
    let variance = values
        .iter()
        .map(|&value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;

    Ok(Dispersion {
        mean,
        std_dev: finite_result("standard deviation", variance.sqrt())?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    /// Simple average of the window
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Band width as a percentage of the middle band
    pub fn width_percent(&self) -> Result<f64> {
        if self.middle == 0.0 {
            return Err(MathError::DegenerateCase(
                "Middle band is zero, band width is undefined".to_string(),
            ));
        }
        finite_result("band width", (self.upper - self.lower) / self.middle * 100.0)
    }

    /// Where `price` sits between the bands (0 at lower, 1 at upper)
    pub fn percent_b(&self, price: f64) -> Result<f64> {
        let price = finite("price", price)?;
        if self.upper == self.lower {
            return Err(MathError::DegenerateCase(
                "Upper and lower bands are equal, cannot calculate %B".to_string(),
            ));
        }
        finite_result("%B", (price - self.lower) / (self.upper - self.lower))
    }
}

pub fn bollinger_bands(values: &[f64], std_dev_multiplier: f64) -> Result<BollingerBands> {
    let multiplier = positive("standard deviation multiplier", std_dev_multiplier)?;
    let Dispersion { mean, std_dev } = standard_deviation(values)?;

    Ok(BollingerBands {
        upper: finite_result("upper band", mean + std_dev * multiplier)?,
        middle: mean,
        lower: finite_result("lower band", mean - std_dev * multiplier)?,
    })
}

/// Mean of the true ranges across the window.
///
/// The first bar's true range is its high minus low; later bars use the
/// greatest of high-low, |high - previous close| and |low - previous close|.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64]) -> Result<f64> {
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

    let mut previous_close: Option<f64> = None;
    let mut total = 0.0;

    for ((&high, &low), &close) in highs.iter().zip(lows).zip(closes) {
        if low > high {
            return Err(MathError::InvalidInput(format!(
                "Low price ({}) cannot be greater than high price ({})",
                low, high
            )));
        }

        let true_range = match previous_close {
            Some(prev) => (high - low).max((high - prev).abs()).max((low - prev).abs()),
            None => high - low,
        };

        total += true_range;
        previous_close = Some(close);
    }

    finite_result("ATR", total / highs.len() as f64)
}
