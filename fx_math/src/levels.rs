//! Price level projections
//!
//! Contains:
//! - Fibonacci retracement and extension levels
//! - Pivot points (standard, Fibonacci, Camarilla, Woodie)

use crate::{finite_result, positive, MathError, Result};
use serde::{Deserialize, Serialize};

/// Canonical retracement levels, in percent
pub const RETRACEMENT_LEVELS: [f64; 7] = [0.0, 23.6, 38.2, 50.0, 61.8, 78.6, 100.0];

/// Canonical extension levels, in percent
pub const EXTENSION_LEVELS: [f64; 4] = [127.2, 161.8, 200.0, 261.8];

/// Which end of the swing levels are measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Measure upward from the swing low
    Up,
    /// Measure downward from the swing high
    Down,
}

/// A single Fibonacci level and its price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    /// Level in percent, e.g. 61.8
    pub level: f64,
    pub price: f64,
}

fn swing(high: f64, low: f64) -> Result<(f64, f64)> {
    let high = positive("high", high)?;
    let low = positive("low", low)?;
    if low > high {
        return Err(MathError::InvalidInput(format!(
            "Low ({}) cannot be greater than high ({})",
            low, high
        )));
    }
    Ok((high, low))
}

fn project(high: f64, low: f64, trend: Trend, levels: &[f64]) -> Result<Vec<FibonacciLevel>> {
    let range = high - low;
    levels
        .iter()
        .map(|&level| {
            let price = match trend {
                Trend::Down => high - range * level / 100.0,
                Trend::Up => low + range * level / 100.0,
            };
            Ok(FibonacciLevel {
                level,
                price: finite_result("Fibonacci level", price)?,
            })
        })
        .collect()
}

/// Retracement levels for a swing between `high` and `low`
pub fn fibonacci_levels(high: f64, low: f64, trend: Trend) -> Result<Vec<FibonacciLevel>> {
    let (high, low) = swing(high, low)?;
    project(high, low, trend, &RETRACEMENT_LEVELS)
}

/// Extension levels projected beyond the swing
pub fn fibonacci_extensions(high: f64, low: f64, trend: Trend) -> Result<Vec<FibonacciLevel>> {
    let (high, low) = swing(high, low)?;
    project(high, low, trend, &EXTENSION_LEVELS)
}

/// Pivot formula family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotMethod {
    #[default]
    Standard,
    Fibonacci,
    Camarilla,
    Woodie,
}

/// Pivot and its three support and resistance levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

/// Standard floor-trader pivots from the prior period's high, low and close
pub fn pivot_points(high: f64, low: f64, close: f64) -> Result<PivotPoints> {
    pivot_points_with(PivotMethod::Standard, high, low, close)
}

pub fn pivot_points_with(method: PivotMethod, high: f64, low: f64, close: f64) -> Result<PivotPoints> {
    let (high, low) = swing(high, low)?;
    let close = positive("close", close)?;
    let range = high - low;

    let points = match method {
        PivotMethod::Standard => {
            let pivot = (high + low + close) / 3.0;
            PivotPoints {
                pivot,
                r1: 2.0 * pivot - low,
                s1: 2.0 * pivot - high,
                r2: pivot + range,
                s2: pivot - range,
                r3: high + 2.0 * (pivot - low),
                s3: low - 2.0 * (high - pivot),
            }
        }
        PivotMethod::Fibonacci => {
            let pivot = (high + low + close) / 3.0;
            PivotPoints {
                pivot,
                r1: pivot + 0.382 * range,
                s1: pivot - 0.382 * range,
                r2: pivot + 0.618 * range,
                s2: pivot - 0.618 * range,
                r3: pivot + range,
                s3: pivot - range,
            }
        }
        PivotMethod::Camarilla => PivotPoints {
            pivot: (high + low + close) / 3.0,
            r1: close + range * 1.1 / 12.0,
            s1: close - range * 1.1 / 12.0,
            r2: close + range * 1.1 / 6.0,
            s2: close - range * 1.1 / 6.0,
            r3: close + range * 1.1 / 4.0,
            s3: close - range * 1.1 / 4.0,
        },
        PivotMethod::Woodie => {
            let pivot = (high + low + 2.0 * close) / 4.0;
            PivotPoints {
                pivot,
                r1: 2.0 * pivot - low,
                s1: 2.0 * pivot - high,
                r2: pivot + range,
                s2: pivot - range,
                r3: high + 2.0 * (pivot - low),
                s3: low - 2.0 * (high - pivot),
            }
        }
    };

    points.checked()
}

impl PivotPoints {
    fn checked(self) -> Result<Self> {
        Ok(Self {
            pivot: finite_result("pivot", self.pivot)?,
            r1: finite_result("r1", self.r1)?,
            r2: finite_result("r2", self.r2)?,
            r3: finite_result("r3", self.r3)?,
            s1: finite_result("s1", self.s1)?,
            s2: finite_result("s2", self.s2)?,
            s3: finite_result("s3", self.s3)?,
        })
    }
}
