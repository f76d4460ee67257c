//! JSON-facing calculator requests and their outcomes
//!
//! Every formula in [`fx_math`] is reachable through one
//! [`CalculationRequest`] variant, tagged by a `calculator` field:
//!
//! ```json
//! {"calculator": "pip_value", "instrument": "USD/JPY", "lots": 2}
//! ```
//!
//! Requests that price an instrument may leave it out, in which case the
//! desk's selected pair is used. Requests that need a reference price may
//! leave that out too, and it is looked up in the desk's rate table.

use chrono::NaiveTime;
use fx_math::conversion::{self, ZonedTime};
use fx_math::levels::{self, FibonacciLevel, PivotMethod, PivotPoints, Trend};
use fx_math::money::{self, CompoundGrowth, Roi, ValueAtRisk};
use fx_math::oscillators::{self, MacdReading, Stochastic};
use fx_math::pips::{self, LotUnits};
use fx_math::risk::{self, Drawdown, Leverage, MarginLevel, PositionSize};
use fx_math::trade::{
    self, CommissionCost, ProfitLoss, RiskReward, SpreadCost, SwapCost, TradeCost,
};
use fx_math::volatility::{self, BollingerBands, Dispersion};
use fx_math::{moving_averages, Direction, Instrument, RateTable, Result};
use serde::{Deserialize, Serialize};

fn one_trade() -> u32 {
    1
}

fn two_std_devs() -> f64 {
    2.0
}

fn monthly() -> u32 {
    12
}

/// A single calculator invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    PositionSize {
        balance: f64,
        risk_percent: f64,
        stop_loss_pips: f64,
    },
    PipValue {
        #[serde(default)]
        instrument: Option<Instrument>,
        lots: f64,
        /// Defaults to the desk's account currency
        #[serde(default)]
        account_currency: Option<String>,
    },
    LotUnits {
        lots: f64,
    },
    RiskPercentage {
        balance: f64,
        risk_amount: f64,
    },
    MaxDrawdown {
        peak_balance: f64,
        current_balance: f64,
    },
    MarginLevel {
        equity: f64,
        used_margin: f64,
    },
    MarginRequired {
        #[serde(default)]
        instrument: Option<Instrument>,
        lots: f64,
        leverage: Leverage,
        #[serde(default)]
        reference_price: Option<f64>,
    },
    EffectiveLeverage {
        #[serde(default)]
        instrument: Option<Instrument>,
        lots: f64,
        equity: f64,
        #[serde(default)]
        reference_price: Option<f64>,
    },
    ProfitLoss {
        #[serde(default)]
        instrument: Option<Instrument>,
        entry: f64,
        exit: f64,
        lots: f64,
        direction: Direction,
    },
    BreakEven {
        #[serde(default)]
        instrument: Option<Instrument>,
        entry: f64,
        spread_pips: f64,
        #[serde(default)]
        commission_per_lot: f64,
        direction: Direction,
    },
    SpreadCost {
        #[serde(default)]
        instrument: Option<Instrument>,
        bid: f64,
        ask: f64,
        lots: f64,
    },
    CommissionCost {
        lots: f64,
        rate_per_lot: f64,
        #[serde(default = "one_trade")]
        num_trades: u32,
    },
    SwapCost {
        lots: f64,
        long_rate: f64,
        short_rate: f64,
        days: f64,
    },
    TradeCost {
        #[serde(default)]
        instrument: Option<Instrument>,
        bid: f64,
        ask: f64,
        lots: f64,
        #[serde(default)]
        commission_per_lot: f64,
        #[serde(default)]
        swap: f64,
    },
    RiskReward {
        #[serde(default)]
        instrument: Option<Instrument>,
        entry: f64,
        stop_loss: f64,
        take_profit: f64,
    },
    Fibonacci {
        high: f64,
        low: f64,
        trend: Trend,
        #[serde(default)]
        extensions: bool,
    },
    PivotPoints {
        high: f64,
        low: f64,
        close: f64,
        #[serde(default)]
        method: PivotMethod,
    },
    MovingAverage {
        values: Vec<f64>,
    },
    StandardDeviation {
        values: Vec<f64>,
    },
    Momentum {
        values: Vec<f64>,
    },
    Rsi {
        values: Vec<f64>,
    },
    Macd {
        values: Vec<f64>,
    },
    BollingerBands {
        values: Vec<f64>,
        #[serde(default = "two_std_devs")]
        std_dev_multiplier: f64,
    },
    Stochastic {
        highs: Vec<f64>,
        lows: Vec<f64>,
        closes: Vec<f64>,
    },
    Atr {
        highs: Vec<f64>,
        lows: Vec<f64>,
        closes: Vec<f64>,
    },
    CompoundInterest {
        principal: f64,
        #[serde(default)]
        monthly_contribution: f64,
        annual_rate_percent: f64,
        years: f64,
        #[serde(default = "monthly")]
        compounds_per_year: u32,
    },
    Kelly {
        win_rate: f64,
        avg_win: f64,
        avg_loss: f64,
    },
    Sharpe {
        avg_return: f64,
        risk_free_rate: f64,
        std_dev: f64,
    },
    ExpectedValue {
        win_rate: f64,
        avg_win: f64,
        avg_loss: f64,
    },
    Roi {
        initial: f64,
        final_value: f64,
    },
    ValueAtRisk {
        portfolio_value: f64,
        confidence_percent: f64,
        daily_volatility_percent: f64,
    },
    RiskOfRuin {
        win_rate: f64,
        risk_per_trade_percent: f64,
    },
    ProfitFactor {
        gross_profit: f64,
        gross_loss: f64,
    },
    CurrencyConversion {
        amount: f64,
        from: String,
        to: String,
    },
    TimeZone {
        time: NaiveTime,
        from_offset_hours: f64,
        to_offset_hours: f64,
    },
}

/// Result of a [`CalculationRequest`], serialized as `{"calculator", "result"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", content = "result", rename_all = "snake_case")]
pub enum CalculationOutcome {
    PositionSize(PositionSize),
    PipValue(f64),
    LotUnits(LotUnits),
    RiskPercentage(f64),
    MaxDrawdown(Drawdown),
    MarginLevel(MarginLevel),
    MarginRequired(f64),
    EffectiveLeverage(f64),
    ProfitLoss(ProfitLoss),
    BreakEven(f64),
    SpreadCost(SpreadCost),
    CommissionCost(CommissionCost),
    SwapCost(SwapCost),
    TradeCost(TradeCost),
    RiskReward(RiskReward),
    Fibonacci(Vec<FibonacciLevel>),
    PivotPoints(PivotPoints),
    MovingAverage(f64),
    StandardDeviation(Dispersion),
    Momentum(f64),
    Rsi(f64),
    Macd(MacdReading),
    BollingerBands(BollingerBands),
    Stochastic(Stochastic),
    Atr(f64),
    CompoundInterest(CompoundGrowth),
    Kelly(f64),
    Sharpe(f64),
    ExpectedValue(f64),
    Roi(Roi),
    ValueAtRisk(ValueAtRisk),
    RiskOfRuin(f64),
    ProfitFactor(f64),
    CurrencyConversion(f64),
    TimeZone(ZonedTime),
}

/// Desk state a request is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct DeskView<'a> {
    pub selected_pair: &'a Instrument,
    /// Reference prices keyed by pair symbol
    pub prices: &'a RateTable,
    /// Currency rates against USD keyed by currency code
    pub currencies: &'a RateTable,
    pub account_currency: &'a str,
}

impl<'a> DeskView<'a> {
    fn pair<'r>(&self, instrument: &'r Option<Instrument>) -> &'r Instrument
    where
        'a: 'r,
    {
        instrument.as_ref().unwrap_or(self.selected_pair)
    }

    fn reference_price(&self, instrument: &Instrument, given: Option<f64>) -> f64 {
        given.unwrap_or_else(|| self.prices.price_of(instrument))
    }
}

impl CalculationRequest {
    /// Display name used for usage statistics
    pub fn name(&self) -> &'static str {
        match self {
            Self::PositionSize { .. } => "Position Size",
            Self::PipValue { .. } => "Pip Value",
            Self::LotUnits { .. } => "Lot Units",
            Self::RiskPercentage { .. } => "Risk Percentage",
            Self::MaxDrawdown { .. } => "Max Drawdown",
            Self::MarginLevel { .. } => "Margin Level",
            Self::MarginRequired { .. } => "Margin",
            Self::EffectiveLeverage { .. } => "Leverage",
            Self::ProfitLoss { .. } => "Profit/Loss",
            Self::BreakEven { .. } => "Break Even",
            Self::SpreadCost { .. } => "Spread Cost",
            Self::CommissionCost { .. } => "Commission",
            Self::SwapCost { .. } => "Swap",
            Self::TradeCost { .. } => "Trade Cost",
            Self::RiskReward { .. } => "Risk/Reward",
            Self::Fibonacci { .. } => "Fibonacci",
            Self::PivotPoints { .. } => "Pivot Points",
            Self::MovingAverage { .. } => "Moving Average",
            Self::StandardDeviation { .. } => "Standard Deviation",
            Self::Momentum { .. } => "Momentum",
            Self::Rsi { .. } => "RSI",
            Self::Macd { .. } => "MACD",
            Self::BollingerBands { .. } => "Bollinger Bands",
            Self::Stochastic { .. } => "Stochastic",
            Self::Atr { .. } => "ATR",
            Self::CompoundInterest { .. } => "Compound Interest",
            Self::Kelly { .. } => "Kelly Criterion",
            Self::Sharpe { .. } => "Sharpe Ratio",
            Self::ExpectedValue { .. } => "Expected Value",
            Self::Roi { .. } => "ROI",
            Self::ValueAtRisk { .. } => "Value at Risk",
            Self::RiskOfRuin { .. } => "Risk of Ruin",
            Self::ProfitFactor { .. } => "Profit Factor",
            Self::CurrencyConversion { .. } => "Currency Converter",
            Self::TimeZone { .. } => "Time Zone",
        }
    }

    /// Run the calculator this request names
    pub fn evaluate(&self, view: &DeskView<'_>) -> Result<CalculationOutcome> {
        use CalculationOutcome as Out;

        let outcome = match self {
            Self::PositionSize {
                balance,
                risk_percent,
                stop_loss_pips,
            } => Out::PositionSize(risk::position_size(*balance, *risk_percent, *stop_loss_pips)?),
            Self::PipValue {
                instrument,
                lots,
                account_currency,
            } => {
                let currency = account_currency.as_deref().unwrap_or(view.account_currency);
                Out::PipValue(pips::pip_value(view.pair(instrument), *lots, currency)?)
            }
            Self::LotUnits { lots } => Out::LotUnits(pips::lots_to_units(*lots)?),
            Self::RiskPercentage {
                balance,
                risk_amount,
            } => Out::RiskPercentage(risk::risk_percentage(*balance, *risk_amount)?),
            Self::MaxDrawdown {
                peak_balance,
                current_balance,
            } => Out::MaxDrawdown(risk::max_drawdown(*peak_balance, *current_balance)?),
            Self::MarginLevel {
                equity,
                used_margin,
            } => Out::MarginLevel(risk::margin_level(*equity, *used_margin)?),
            Self::MarginRequired {
                instrument,
                lots,
                leverage,
                reference_price,
            } => {
                let price = view.reference_price(view.pair(instrument), *reference_price);
                Out::MarginRequired(risk::margin_required(*lots, price, *leverage)?)
            }
            Self::EffectiveLeverage {
                instrument,
                lots,
                equity,
                reference_price,
            } => {
                let price = view.reference_price(view.pair(instrument), *reference_price);
                Out::EffectiveLeverage(risk::effective_leverage(*lots, price, *equity)?)
            }
            Self::ProfitLoss {
                instrument,
                entry,
                exit,
                lots,
                direction,
            } => Out::ProfitLoss(trade::profit_loss(
                *entry,
                *exit,
                *lots,
                *direction,
                view.pair(instrument),
            )?),
            Self::BreakEven {
                instrument,
                entry,
                spread_pips,
                commission_per_lot,
                direction,
            } => Out::BreakEven(trade::break_even_price(
                *entry,
                *spread_pips,
                *commission_per_lot,
                *direction,
                view.pair(instrument),
            )?),
            Self::SpreadCost {
                instrument,
                bid,
                ask,
                lots,
            } => Out::SpreadCost(trade::spread_cost(*bid, *ask, view.pair(instrument), *lots)?),
            Self::CommissionCost {
                lots,
                rate_per_lot,
                num_trades,
            } => Out::CommissionCost(trade::commission_cost(*lots, *rate_per_lot, *num_trades)?),
            Self::SwapCost {
                lots,
                long_rate,
                short_rate,
                days,
            } => Out::SwapCost(trade::swap_cost(*lots, *long_rate, *short_rate, *days)?),
            Self::TradeCost {
                instrument,
                bid,
                ask,
                lots,
                commission_per_lot,
                swap,
            } => {
                let spread = trade::spread_cost(*bid, *ask, view.pair(instrument), *lots)?;
                let commission = trade::commission_cost(*lots, *commission_per_lot, 1)?;
                Out::TradeCost(trade::trade_cost(&spread, &commission, *swap)?)
            }
            Self::RiskReward {
                instrument,
                entry,
                stop_loss,
                take_profit,
            } => Out::RiskReward(trade::risk_reward(
                *entry,
                *stop_loss,
                *take_profit,
                view.pair(instrument),
            )?),
            Self::Fibonacci {
                high,
                low,
                trend,
                extensions,
            } => {
                let levels = if *extensions {
                    levels::fibonacci_extensions(*high, *low, *trend)?
                } else {
                    levels::fibonacci_levels(*high, *low, *trend)?
                };
                Out::Fibonacci(levels)
            }
            Self::PivotPoints {
                high,
                low,
                close,
                method,
            } => Out::PivotPoints(levels::pivot_points_with(*method, *high, *low, *close)?),
            Self::MovingAverage { values } => {
                Out::MovingAverage(moving_averages::moving_average(values)?)
            }
            Self::StandardDeviation { values } => {
                Out::StandardDeviation(volatility::standard_deviation(values)?)
            }
            Self::Momentum { values } => Out::Momentum(moving_averages::momentum(values)?),
            Self::Rsi { values } => Out::Rsi(oscillators::rsi(values)?),
            Self::Macd { values } => Out::Macd(oscillators::macd_simplified(values)?),
            Self::BollingerBands {
                values,
                std_dev_multiplier,
            } => Out::BollingerBands(volatility::bollinger_bands(values, *std_dev_multiplier)?),
            Self::Stochastic {
                highs,
                lows,
                closes,
            } => Out::Stochastic(oscillators::stochastic_k(highs, lows, closes)?),
            Self::Atr {
                highs,
                lows,
                closes,
            } => Out::Atr(volatility::atr(highs, lows, closes)?),
            Self::CompoundInterest {
                principal,
                monthly_contribution,
                annual_rate_percent,
                years,
                compounds_per_year,
            } => Out::CompoundInterest(money::compound_interest(
                *principal,
                *monthly_contribution,
                *annual_rate_percent,
                *years,
                *compounds_per_year,
            )?),
            Self::Kelly {
                win_rate,
                avg_win,
                avg_loss,
            } => Out::Kelly(money::kelly_criterion(*win_rate, *avg_win, *avg_loss)?),
            Self::Sharpe {
                avg_return,
                risk_free_rate,
                std_dev,
            } => Out::Sharpe(money::sharpe_ratio(*avg_return, *risk_free_rate, *std_dev)?),
            Self::ExpectedValue {
                win_rate,
                avg_win,
                avg_loss,
            } => Out::ExpectedValue(money::expected_value(*win_rate, *avg_win, *avg_loss)?),
            Self::Roi {
                initial,
                final_value,
            } => Out::Roi(money::roi(*initial, *final_value)?),
            Self::ValueAtRisk {
                portfolio_value,
                confidence_percent,
                daily_volatility_percent,
            } => Out::ValueAtRisk(money::value_at_risk(
                *portfolio_value,
                *confidence_percent,
                *daily_volatility_percent,
            )?),
            Self::RiskOfRuin {
                win_rate,
                risk_per_trade_percent,
            } => Out::RiskOfRuin(money::risk_of_ruin(*win_rate, *risk_per_trade_percent)?),
            Self::ProfitFactor {
                gross_profit,
                gross_loss,
            } => Out::ProfitFactor(money::profit_factor(*gross_profit, *gross_loss)?),
            Self::CurrencyConversion { amount, from, to } => Out::CurrencyConversion(
                conversion::convert_with_table(*amount, from, to, view.currencies)?,
            ),
            Self::TimeZone {
                time,
                from_offset_hours,
                to_offset_hours,
            } => Out::TimeZone(conversion::convert_time_zone(
                *time,
                *from_offset_hours,
                *to_offset_hours,
            )?),
        };

        Ok(outcome)
    }
}
