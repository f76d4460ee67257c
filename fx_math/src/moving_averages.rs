//! Window averages and momentum
//!
//! The caller chooses the window by passing exactly the points to use.

use crate::{finite_result, mean_of, series, Result};

/// Simple arithmetic mean of the window
pub fn moving_average(values: &[f64]) -> Result<f64> {
    let values = series("moving average", values)?;
    finite_result("moving average", mean_of(values))
}

/// Change from the first to the last point of the window
pub fn momentum(values: &[f64]) -> Result<f64> {
    let values = series("momentum", values)?;
    finite_result("momentum", values[values.len() - 1] - values[0])
}
