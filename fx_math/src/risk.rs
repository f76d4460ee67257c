//! Position sizing and account risk calculations
//!
//! Contains:
//! - Position size from balance, risk percent and stop distance
//! - Risk percentage and maximum drawdown
//! - Margin required, margin level and leverage

use crate::pips::{STANDARD_LOT_UNITS, STANDARD_PIP_VALUE};
use crate::{finite, finite_result, non_negative, positive, MathError, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest lot size a position will be sized to
pub const MIN_LOT_SIZE: f64 = 0.01;

/// Largest lot size a position will be sized to
pub const MAX_LOT_SIZE: f64 = 100.0;

/// Result of a position size calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSize {
    /// Lot size clamped to `[MIN_LOT_SIZE, MAX_LOT_SIZE]`
    pub lot_size: f64,
    /// Lot size before clamping
    pub raw_lot_size: f64,
    /// Amount of the balance put at risk
    pub risk_amount: f64,
}

impl PositionSize {
    /// True when the raw lot size fell outside the allowed range
    pub fn was_clamped(&self) -> bool {
        self.lot_size != self.raw_lot_size
    }
}

/// Size a position so that hitting the stop loses `risk_percent` of `balance`
pub fn position_size(balance: f64, risk_percent: f64, stop_loss_pips: f64) -> Result<PositionSize> {
    let balance = non_negative("balance", balance)?;
    let risk_percent = non_negative("risk percent", risk_percent)?;
    let stop_loss_pips = finite("stop loss pips", stop_loss_pips)?;

    if stop_loss_pips <= 0.0 {
        return Err(MathError::InvalidInput(format!(
            "Stop loss must be at least one pip away, got {}",
            stop_loss_pips
        )));
    }

    let risk_amount = finite_result("risk amount", balance * risk_percent / 100.0)?;
    let raw_lot_size = finite_result(
        "lot size",
        risk_amount / (stop_loss_pips * STANDARD_PIP_VALUE),
    )?;

    Ok(PositionSize {
        lot_size: raw_lot_size.clamp(MIN_LOT_SIZE, MAX_LOT_SIZE),
        raw_lot_size,
        risk_amount,
    })
}

/// Percentage of `balance` represented by `risk_amount`
pub fn risk_percentage(balance: f64, risk_amount: f64) -> Result<f64> {
    let balance = positive("balance", balance)?;
    let risk_amount = non_negative("risk amount", risk_amount)?;
    finite_result("risk percentage", risk_amount / balance * 100.0)
}

/// Decline from a peak balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawdown {
    pub percent: f64,
    pub amount: f64,
}

/// Drawdown from `peak_balance` to `current_balance`.
///
/// A non-positive peak, or a current balance at or above the peak, is
/// reported as zero drawdown.
pub fn max_drawdown(peak_balance: f64, current_balance: f64) -> Result<Drawdown> {
    let peak = finite("peak balance", peak_balance)?;
    let current = finite("current balance", current_balance)?;

    if peak <= 0.0 || current >= peak {
        return Ok(Drawdown {
            percent: 0.0,
            amount: 0.0,
        });
    }

    let amount = finite_result("drawdown", peak - current)?;
    Ok(Drawdown {
        percent: finite_result("drawdown percent", amount / peak * 100.0)?,
        amount,
    })
}

/// Account margin health
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginLevel {
    /// Equity as a percentage of used margin; `None` when no margin is in use
    pub level_percent: Option<f64>,
    pub free_margin: f64,
}

impl MarginLevel {
    /// True when no margin is in use, so the level is unbounded
    pub fn is_unbounded(&self) -> bool {
        self.level_percent.is_none()
    }
}

pub fn margin_level(equity: f64, used_margin: f64) -> Result<MarginLevel> {
    let equity = finite("equity", equity)?;
    let used_margin = non_negative("used margin", used_margin)?;

    let level_percent = if used_margin == 0.0 {
        None
    } else {
        Some(finite_result("margin level", equity / used_margin * 100.0)?)
    };

    Ok(MarginLevel {
        level_percent,
        free_margin: finite_result("free margin", equity - used_margin)?,
    })
}

/// Account leverage expressed as `1:ratio`.
///
/// Deserializes from a number (`100`) or a ratio string (`"1:100"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "f64")]
pub struct Leverage(f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum LeverageRepr {
    Ratio(f64),
    Text(String),
}

impl Leverage {
    pub fn new(ratio: f64) -> Result<Self> {
        Ok(Self(positive("leverage", ratio)?))
    }

    pub fn ratio(&self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Leverage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match LeverageRepr::deserialize(deserializer)? {
            LeverageRepr::Ratio(ratio) => Leverage::new(ratio),
            LeverageRepr::Text(text) => text.parse(),
        }
        .map_err(de::Error::custom)
    }
}

impl From<Leverage> for f64 {
    fn from(leverage: Leverage) -> Self {
        leverage.0
    }
}

impl FromStr for Leverage {
    type Err = MathError;

    /// Accepts `1:100` or a bare `100`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let ratio = match s.split_once(':') {
            Some((one, ratio)) if one.trim() == "1" => ratio.trim(),
            Some(_) => {
                return Err(MathError::InvalidInput(format!(
                    "Leverage must look like 1:100, got '{}'",
                    s
                )))
            }
            None => s,
        };

        let ratio: f64 = ratio.parse().map_err(|_| {
            MathError::InvalidInput(format!("Leverage must look like 1:100, got '{}'", s))
        })?;
        Leverage::new(ratio)
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1:{}", self.0)
    }
}

/// Margin needed to open `lots` at `reference_price`
pub fn margin_required(lots: f64, reference_price: f64, leverage: Leverage) -> Result<f64> {
    let lots = non_negative("lots", lots)?;
    let price = positive("reference price", reference_price)?;
    finite_result("margin", lots * STANDARD_LOT_UNITS * price / leverage.ratio())
}

/// Notional position value divided by account equity
pub fn effective_leverage(lots: f64, reference_price: f64, equity: f64) -> Result<f64> {
    let lots = non_negative("lots", lots)?;
    let price = positive("reference price", reference_price)?;
    let equity = positive("equity", equity)?;
    finite_result("effective leverage", lots * STANDARD_LOT_UNITS * price / equity)
}
