//! # FX Math
//!
//! Closed-form calculations behind the forex desk calculators.
//! Every function here is pure: the same inputs always give the same
//! outputs, nothing is cached and nothing is fetched. Rate tables and
//! market prices are supplied by the caller.
//!
//! Modules are independent of each other apart from the shared
//! [`instrument`] types:
//!
//! - [`pips`]: pip size, pip value and lot conversion
//! - [`risk`]: position sizing, drawdown, margin and leverage
//! - [`trade`]: profit/loss, break-even, spread, commission and swap costs
//! - [`levels`]: Fibonacci levels and pivot points
//! - [`moving_averages`], [`oscillators`], [`volatility`]: series indicators
//! - [`money`]: compounding, Kelly, Sharpe, VaR and friends
//! - [`conversion`]: currency and time-zone conversion
//!
//! ## Example
//!
//! ```
//! use fx_math::risk::position_size;
//!
//! let sizing = position_size(10_000.0, 2.0, 50.0).unwrap();
//! assert!((sizing.lot_size - 0.40).abs() < 1e-9);
//! assert!((sizing.risk_amount - 200.0).abs() < 1e-9);
//! ```

use thiserror::Error;

pub mod conversion;
pub mod instrument;
pub mod levels;
pub mod money;
pub mod moving_averages;
pub mod oscillators;
pub mod pips;
pub mod risk;
pub mod trade;
pub mod volatility;

pub use instrument::{Direction, Instrument, RateTable};

/// Errors that can occur in trading calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Degenerate case: {0}")]
    DegenerateCase(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Rejects NaN and infinite values.
pub(crate) fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

/// Rejects a result that overflowed or became NaN even though every
/// input was finite.
pub(crate) fn finite_result(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::DegenerateCase(format!(
            "{} is out of range ({})",
            name, value
        )))
    }
}

/// Finite and strictly greater than zero.
pub(crate) fn positive(name: &str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value <= 0.0 {
        return Err(MathError::InvalidInput(format!(
            "{} must be greater than zero, got {}",
            name, value
        )));
    }
    Ok(value)
}

/// Finite and not negative.
pub(crate) fn non_negative(name: &str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value < 0.0 {
        return Err(MathError::InvalidInput(format!(
            "{} cannot be negative, got {}",
            name, value
        )));
    }
    Ok(value)
}

/// A fraction in `[0, 1]`, such as a win rate.
pub(crate) fn fraction(name: &str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(MathError::InvalidInput(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(value)
}

/// Checks that a series has at least two finite points.
pub(crate) fn series<'a>(name: &str, values: &'a [f64]) -> Result<&'a [f64]> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "{} needs at least 2 values, have {}",
            name,
            values.len()
        )));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(format!(
            "{} contains a non-finite value: {}",
            name, bad
        )));
    }
    Ok(values)
}

/// Arithmetic mean of an already validated, non-empty slice.
pub(crate) fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_rejects_nan_and_infinity() {
        assert!(finite("x", f64::NAN).is_err());
        assert!(finite("x", f64::INFINITY).is_err());
        assert!(finite("x", f64::NEG_INFINITY).is_err());
        assert_eq!(finite("x", -3.5).unwrap(), -3.5);
    }

    #[test]
    fn test_finite_result_reports_overflow() {
        assert!(matches!(
            finite_result("profit", f64::MAX * 2.0),
            Err(MathError::DegenerateCase(_))
        ));
        assert!(matches!(
            finite_result("interest", 0.0 * f64::INFINITY),
            Err(MathError::DegenerateCase(_))
        ));
        assert_eq!(finite_result("profit", 12.5).unwrap(), 12.5);
    }

    #[test]
    fn test_positive_and_non_negative() {
        assert!(positive("lots", 0.0).is_err());
        assert!(non_negative("lots", 0.0).is_ok());
        assert!(non_negative("lots", -0.01).is_err());
    }

    #[test]
    fn test_series_requires_two_points() {
        match series("closes", &[1.0]) {
            Err(MathError::InsufficientData(msg)) => assert!(msg.contains("closes")),
            other => panic!("expected InsufficientData, got {:?}", other),
        }
        assert!(matches!(
            series("closes", &[1.0, f64::NAN]),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = MathError::DegenerateCase("stop distance is zero".to_string());
        assert_eq!(err.to_string(), "Degenerate case: stop distance is zero");
    }
}
