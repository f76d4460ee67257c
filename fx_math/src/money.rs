//! Money management and performance ratios
//!
//! Win rates are fractions in `[0, 1]`; rates, confidence levels and
//! volatilities are percentages.

use crate::{finite, finite_result, fraction, non_negative, positive, MathError, Result};
use serde::{Deserialize, Serialize};

/// Growth of a principal plus regular contributions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundGrowth {
    pub future_value: f64,
    /// Principal plus twelve monthly contributions per year
    pub total_contributions: f64,
    pub total_interest: f64,
}

/// Future value of `principal` plus a contribution every compounding period.
///
/// FV = P(1 + r/n)^(nt) + PMT((1 + r/n)^(nt) - 1)/(r/n). At a zero rate the
/// contribution term reduces to PMT * n * t.
pub fn compound_interest(
    principal: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: f64,
    compounds_per_year: u32,
) -> Result<CompoundGrowth> {
    let principal = non_negative("principal", principal)?;
    let contribution = non_negative("monthly contribution", monthly_contribution)?;
    let rate = finite("annual rate", annual_rate_percent)? / 100.0;
    let years = non_negative("years", years)?;

    if compounds_per_year == 0 {
        return Err(MathError::InvalidInput(
            "Compounding frequency must be at least once per year".to_string(),
        ));
    }
    if rate <= -1.0 {
        return Err(MathError::InvalidInput(format!(
            "Annual rate must be above -100%, got {}%",
            annual_rate_percent
        )));
    }

    let n = f64::from(compounds_per_year);
    let periods = n * years;

    let (future_principal, future_contributions) = if rate == 0.0 {
        (principal, contribution * periods)
    } else {
        let periodic = rate / n;
        let growth = (1.0 + periodic).powf(periods);
        (principal * growth, contribution * (growth - 1.0) / periodic)
    };

    let future_value = finite_result("future value", future_principal + future_contributions)?;
    let total_contributions = finite_result(
        "total contributions",
        principal + contribution * 12.0 * years,
    )?;

    Ok(CompoundGrowth {
        future_value,
        total_contributions,
        total_interest: finite_result("total interest", future_value - total_contributions)?,
    })
}

/// Kelly fraction of capital to risk, never below zero
pub fn kelly_criterion(win_rate: f64, avg_win: f64, avg_loss: f64) -> Result<f64> {
    let win_rate = fraction("win rate", win_rate)?;
    let avg_win = positive("average win", avg_win)?;
    let avg_loss = positive("average loss", avg_loss)?;

    let payoff = avg_win / avg_loss;
    let kelly = (win_rate * payoff - (1.0 - win_rate)) / payoff;
    Ok(finite_result("Kelly fraction", kelly)?.max(0.0))
}

pub fn sharpe_ratio(avg_return: f64, risk_free_rate: f64, std_dev: f64) -> Result<f64> {
    let avg_return = finite("average return", avg_return)?;
    let risk_free_rate = finite("risk-free rate", risk_free_rate)?;
    let std_dev = non_negative("standard deviation", std_dev)?;

    if std_dev == 0.0 {
        return Err(MathError::DegenerateCase(
            "Standard deviation is zero, Sharpe ratio is undefined".to_string(),
        ));
    }
    finite_result("Sharpe ratio", (avg_return - risk_free_rate) / std_dev)
}

/// Average result per trade. `avg_loss` is a positive magnitude.
pub fn expected_value(win_rate: f64, avg_win: f64, avg_loss: f64) -> Result<f64> {
    let win_rate = fraction("win rate", win_rate)?;
    let avg_win = non_negative("average win", avg_win)?;
    let avg_loss = non_negative("average loss", avg_loss)?;
    finite_result(
        "expected value",
        win_rate * avg_win - (1.0 - win_rate) * avg_loss,
    )
}

/// Return on investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    pub percent: f64,
    pub profit: f64,
}

pub fn roi(initial: f64, final_value: f64) -> Result<Roi> {
    let initial = positive("initial value", initial)?;
    let final_value = finite("final value", final_value)?;

    let profit = finite_result("profit", final_value - initial)?;
    Ok(Roi {
        percent: finite_result("ROI", profit / initial * 100.0)?,
        profit,
    })
}

/// One-day parametric Value at Risk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAtRisk {
    /// Loss amount not expected to be exceeded at the confidence level
    pub var: f64,
    /// The same loss as a percentage of the portfolio
    pub percent: f64,
}

/// z-score for a confidence level in percent: 95 and 99 are tabled,
/// anything else uses 1.96
pub fn z_score(confidence_percent: f64) -> f64 {
    if (confidence_percent - 95.0).abs() < 1e-9 {
        1.645
    } else if (confidence_percent - 99.0).abs() < 1e-9 {
        2.326
    } else {
        1.96
    }
}

pub fn value_at_risk(
    portfolio_value: f64,
    confidence_percent: f64,
    daily_volatility_percent: f64,
) -> Result<ValueAtRisk> {
    let portfolio_value = non_negative("portfolio value", portfolio_value)?;
    let confidence = finite("confidence level", confidence_percent)?;
    let volatility = non_negative("daily volatility", daily_volatility_percent)?;

    if confidence <= 0.0 || confidence >= 100.0 {
        return Err(MathError::InvalidInput(format!(
            "Confidence level must be between 0 and 100 percent, got {}",
            confidence
        )));
    }

    let percent = finite_result("VaR percent", z_score(confidence) * volatility)?;
    Ok(ValueAtRisk {
        var: finite_result("VaR", portfolio_value * percent / 100.0)?,
        percent,
    })
}

/// Probability of losing the whole account, in percent (0-100).
///
/// Uses ((1 - edge) / (1 + edge))^units, where edge = 2 * win_rate - 1 and
/// units is how many risk-sized losses the account can absorb. Without a
/// positive edge ruin is certain.
pub fn risk_of_ruin(win_rate: f64, risk_per_trade_percent: f64) -> Result<f64> {
    let win_rate = fraction("win rate", win_rate)?;
    let risk = positive("risk per trade", risk_per_trade_percent)?;

    let edge = 2.0 * win_rate - 1.0;
    if edge <= 0.0 {
        return Ok(100.0);
    }

    let units = 100.0 / risk;
    let ruin = ((1.0 - edge) / (1.0 + edge)).powf(units) * 100.0;
    Ok(ruin.clamp(0.0, 100.0))
}

/// Gross profit divided by gross loss (both positive magnitudes)
pub fn profit_factor(gross_profit: f64, gross_loss: f64) -> Result<f64> {
    let gross_profit = non_negative("gross profit", gross_profit)?;
    let gross_loss = non_negative("gross loss", gross_loss)?;

    if gross_loss == 0.0 {
        return Err(MathError::DegenerateCase(
            "Gross loss is zero, profit factor is undefined".to_string(),
        ));
    }
    finite_result("profit factor", gross_profit / gross_loss)
}
