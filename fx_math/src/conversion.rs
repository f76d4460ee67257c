//! Currency and time-zone conversion

use crate::instrument::RateTable;
use crate::{finite, finite_result, positive, MathError, Result};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Convert `amount` between two currencies quoted against a common base.
///
/// Both rates are units of their currency per unit of the base, so the
/// result is `amount * to_rate / from_rate`.
pub fn convert_currency(amount: f64, from_rate: f64, to_rate: f64) -> Result<f64> {
    let amount = finite("amount", amount)?;
    let from_rate = positive("source rate", from_rate)?;
    let to_rate = positive("target rate", to_rate)?;
    finite_result("converted amount", amount * to_rate / from_rate)
}

/// Convert using rates looked up in `rates`; missing codes read as 1.0
pub fn convert_with_table(amount: f64, from: &str, to: &str, rates: &RateTable) -> Result<f64> {
    convert_currency(amount, rates.rate_or_default(from), rates.rate_or_default(to))
}

/// UTC offsets outside this range do not exist
const MAX_OFFSET_HOURS: f64 = 14.0;

/// A wall-clock time moved into another zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonedTime {
    pub time: NaiveTime,
    /// Days crossed: -1 for the previous day, +1 for the next
    pub day_shift: i64,
}

fn offset(name: &str, hours: f64) -> Result<Duration> {
    let hours = finite(name, hours)?;
    if hours.abs() > MAX_OFFSET_HOURS {
        return Err(MathError::InvalidInput(format!(
            "{} must be within +/-{} hours, got {}",
            name, MAX_OFFSET_HOURS, hours
        )));
    }
    Ok(Duration::minutes((hours * 60.0).round() as i64))
}

/// Re-express `time` observed at UTC`from_offset_hours` in UTC`to_offset_hours`,
/// wrapping around midnight in either direction. Fractional offsets such
/// as 5.5 are supported.
pub fn convert_time_zone(
    time: NaiveTime,
    from_offset_hours: f64,
    to_offset_hours: f64,
) -> Result<ZonedTime> {
    let shift =
        offset("target offset", to_offset_hours)? - offset("source offset", from_offset_hours)?;
    let (time, wrapped_secs) = time.overflowing_add_signed(shift);

    Ok(ZonedTime {
        time,
        day_shift: wrapped_secs / 86_400,
    })
}
