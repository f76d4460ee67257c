//! Trade outcome and trading cost calculations

use crate::instrument::{Direction, Instrument};
use crate::pips::{pip_size, STANDARD_PIP_VALUE};
use crate::{finite, finite_result, non_negative, positive, MathError, Result};
use serde::{Deserialize, Serialize};

/// Profit or loss of a closed trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitLoss {
    /// Pips gained (positive) or lost (negative)
    pub pips: f64,
    /// Profit in account currency at $10 per pip per lot
    pub profit: f64,
}

pub fn profit_loss(
    entry: f64,
    exit: f64,
    lots: f64,
    direction: Direction,
    instrument: &Instrument,
) -> Result<ProfitLoss> {
    let entry = positive("entry price", entry)?;
    let exit = positive("exit price", exit)?;
    let lots = non_negative("lots", lots)?;

    let pips = finite_result("pips", direction.sign() * (exit - entry) / pip_size(instrument))?;
    Ok(ProfitLoss {
        pips,
        profit: finite_result("profit", pips * STANDARD_PIP_VALUE * lots)?,
    })
}

/// Price at which a trade covers its spread and commission.
///
/// Commission is converted into pips at $10 per pip per lot, so it is
/// independent of position size. Longs break even above entry, shorts below.
pub fn break_even_price(
    entry: f64,
    spread_pips: f64,
    commission_per_lot: f64,
    direction: Direction,
    instrument: &Instrument,
) -> Result<f64> {
    let entry = positive("entry price", entry)?;
    let spread_pips = non_negative("spread pips", spread_pips)?;
    let commission = non_negative("commission per lot", commission_per_lot)?;

    let cost_pips = spread_pips + commission / STANDARD_PIP_VALUE;
    finite_result(
        "break-even price",
        entry + direction.sign() * cost_pips * pip_size(instrument),
    )
}

/// Cost of crossing the spread
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadCost {
    pub pips: f64,
    pub cost: f64,
}

pub fn spread_cost(bid: f64, ask: f64, instrument: &Instrument, lots: f64) -> Result<SpreadCost> {
    let bid = positive("bid", bid)?;
    let ask = positive("ask", ask)?;
    let lots = non_negative("lots", lots)?;

    if ask < bid {
        return Err(MathError::InvalidInput(format!(
            "Ask ({}) cannot be below bid ({})",
            ask, bid
        )));
    }

    let pips = finite_result("spread pips", (ask - bid) / pip_size(instrument))?;
    Ok(SpreadCost {
        pips,
        cost: finite_result("spread cost", pips * STANDARD_PIP_VALUE * lots)?,
    })
}

/// Broker commission for one or more trades
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionCost {
    pub per_trade: f64,
    pub total: f64,
}

pub fn commission_cost(lots: f64, rate_per_lot: f64, num_trades: u32) -> Result<CommissionCost> {
    let lots = non_negative("lots", lots)?;
    let rate = non_negative("commission rate per lot", rate_per_lot)?;

    let per_trade = finite_result("commission per trade", lots * rate)?;
    Ok(CommissionCost {
        per_trade,
        total: finite_result("commission", per_trade * f64::from(num_trades))?,
    })
}

/// Overnight financing for long and short positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapCost {
    pub long_swap: f64,
    pub short_swap: f64,
}

/// Swap over `days` nights. Rates are per lot per night and may be negative.
pub fn swap_cost(lots: f64, long_rate: f64, short_rate: f64, days: f64) -> Result<SwapCost> {
    let lots = non_negative("lots", lots)?;
    let long_rate = finite("long swap rate", long_rate)?;
    let short_rate = finite("short swap rate", short_rate)?;
    let days = non_negative("holding days", days)?;

    Ok(SwapCost {
        long_swap: finite_result("long swap", long_rate * lots * days)?,
        short_swap: finite_result("short swap", short_rate * lots * days)?,
    })
}

/// All costs of holding a trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeCost {
    pub spread: f64,
    pub commission: f64,
    /// Financing paid; a credited swap shows up as a negative cost
    pub swap: f64,
    pub total: f64,
}

/// Combine spread, commission and swap into a single cost.
///
/// `swap` is the swap amount credited to the account, so a negative
/// swap increases the total cost.
pub fn trade_cost(spread: &SpreadCost, commission: &CommissionCost, swap: f64) -> Result<TradeCost> {
    let swap = -finite("swap", swap)?;
    let spread_cost = finite("spread cost", spread.cost)?;
    let commission_total = finite("commission", commission.total)?;
    let total = finite_result("total cost", spread_cost + commission_total + swap)?;

    Ok(TradeCost {
        spread: spread_cost,
        commission: commission_total,
        swap,
        total,
    })
}

/// Reward relative to risk for a planned trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskReward {
    /// Reward divided by risk
    pub ratio: f64,
    pub risk_pips: f64,
    pub reward_pips: f64,
}

pub fn risk_reward(
    entry: f64,
    stop_loss: f64,
    take_profit: f64,
    instrument: &Instrument,
) -> Result<RiskReward> {
    let entry = positive("entry price", entry)?;
    let stop_loss = positive("stop loss", stop_loss)?;
    let take_profit = positive("take profit", take_profit)?;

    let risk = (entry - stop_loss).abs();
    let reward = (take_profit - entry).abs();
    if risk == 0.0 {
        return Err(MathError::DegenerateCase(
            "Stop loss equals entry, risk is zero".to_string(),
        ));
    }

    let pip = pip_size(instrument);
    Ok(RiskReward {
        ratio: finite_result("risk/reward ratio", reward / risk)?,
        risk_pips: finite_result("risk pips", risk / pip)?,
        reward_pips: finite_result("reward pips", reward / pip)?,
    })
}
