use approx::assert_relative_eq;
use fx_math::conversion::{convert_currency, convert_time_zone};
use fx_math::levels::{fibonacci_extensions, fibonacci_levels, pivot_points, Trend};
use fx_math::money::{compound_interest, kelly_criterion, risk_of_ruin, roi};
use fx_math::moving_averages::moving_average;
use fx_math::oscillators::rsi;
use fx_math::pips::{pip_size, pip_value};
use fx_math::risk::{margin_level, margin_required, position_size, Leverage};
use fx_math::trade::profit_loss;
use fx_math::volatility::standard_deviation;
use fx_math::{Direction, Instrument, MathError};
use rstest::rstest;

const ALL_PAIRS: [&str; 25] = [
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "AUD/USD", "USD/CAD", "NZD/USD", "EUR/GBP",
    "EUR/JPY", "GBP/JPY", "EUR/CHF", "AUD/JPY", "CAD/JPY", "NZD/JPY", "EUR/AUD", "GBP/AUD",
    "EUR/CAD", "GBP/CAD", "AUD/CAD", "AUD/NZD", "NZD/CAD", "XAU/USD", "XAG/USD", "BTC/USD",
    "ETH/USD",
];

#[test]
fn pip_size_is_one_of_three_values_and_stable() {
    for symbol in ALL_PAIRS {
        let instrument = Instrument::new(symbol).unwrap();
        let size = pip_size(&instrument);
        assert!(
            [0.01, 1.0, 0.0001].contains(&size),
            "{} has unexpected pip size {}",
            symbol,
            size
        );
        assert_eq!(size.to_bits(), pip_size(&instrument).to_bits());
    }
}

#[test]
fn position_size_reference_case() {
    let sizing = position_size(10_000.0, 2.0, 50.0).unwrap();
    assert_relative_eq!(sizing.risk_amount, 200.0);
    assert_relative_eq!(sizing.lot_size, 0.40, epsilon = 1e-12);
}

#[test]
fn profit_loss_reference_case() {
    let eurusd = Instrument::new("EUR/USD").unwrap();
    let result = profit_loss(1.0850, 1.0900, 1.0, Direction::Buy, &eurusd).unwrap();
    assert_relative_eq!(result.pips, 50.0, epsilon = 1e-6);
    assert_relative_eq!(result.profit, 500.0, epsilon = 1e-4);
}

#[test]
fn pivot_points_reference_case() {
    let p = pivot_points(1.1000, 1.0800, 1.0900).unwrap();
    assert_relative_eq!(p.pivot, 1.0900, epsilon = 1e-12);
    assert_relative_eq!(p.r1, 1.1000, epsilon = 1e-12);
    assert_relative_eq!(p.s1, 1.0800, epsilon = 1e-12);
}

#[test]
fn fibonacci_reference_case() {
    let levels = fibonacci_levels(1.1000, 1.0800, Trend::Down).unwrap();
    let golden = levels.iter().find(|l| l.level == 61.8).unwrap();
    assert_relative_eq!(golden.price, 1.08764, epsilon = 1e-5);
}

#[test]
fn compound_interest_zero_rate_does_not_divide_by_zero() {
    let growth = compound_interest(10_000.0, 0.0, 0.0, 5.0, 12).unwrap();
    assert_eq!(growth.future_value, 10_000.0);
    assert_eq!(growth.total_contributions, 10_000.0);
    assert!(growth.future_value.is_finite());
}

#[test]
fn calculators_are_idempotent() {
    let eurusd = Instrument::new("EUR/USD").unwrap();

    let a = profit_loss(1.0850, 1.0912, 1.3, Direction::Sell, &eurusd).unwrap();
    let b = profit_loss(1.0850, 1.0912, 1.3, Direction::Sell, &eurusd).unwrap();
    assert_eq!(a.pips.to_bits(), b.pips.to_bits());
    assert_eq!(a.profit.to_bits(), b.profit.to_bits());

    let first = compound_interest(5_000.0, 250.0, 7.5, 10.0, 12).unwrap();
    let second = compound_interest(5_000.0, 250.0, 7.5, 10.0, 12).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case(0.0, 1.0)]
#[case(0.3, 5.0)]
#[case(0.5, 0.5)]
#[case(0.55, 10.0)]
#[case(0.9, 1.0)]
#[case(1.0, 2.0)]
fn risk_of_ruin_stays_in_percent_range(#[case] win_rate: f64, #[case] risk: f64) {
    let ruin = risk_of_ruin(win_rate, risk).unwrap();
    assert!((0.0..=100.0).contains(&ruin), "ruin {} out of range", ruin);
}

#[rstest]
#[case(0.0, 100.0, 100.0)]
#[case(0.1, 50.0, 200.0)]
#[case(0.5, 100.0, 100.0)]
#[case(0.7, 300.0, 100.0)]
#[case(1.0, 10.0, 10.0)]
fn kelly_is_never_negative(#[case] win_rate: f64, #[case] avg_win: f64, #[case] avg_loss: f64) {
    assert!(kelly_criterion(win_rate, avg_win, avg_loss).unwrap() >= 0.0);
}

#[test]
fn margin_level_without_used_margin_is_a_sentinel() {
    let level = margin_level(1_000.0, 0.0).unwrap();
    assert!(level.level_percent.is_none());
    assert!(!level.free_margin.is_nan());
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
fn non_finite_inputs_are_reported(#[case] bad: f64) {
    let eurusd = Instrument::new("EUR/USD").unwrap();
    assert!(matches!(
        position_size(bad, 2.0, 50.0),
        Err(MathError::InvalidInput(_))
    ));
    assert!(matches!(
        profit_loss(1.0850, bad, 1.0, Direction::Buy, &eurusd),
        Err(MathError::InvalidInput(_))
    ));
    assert!(matches!(
        compound_interest(1_000.0, 0.0, bad, 1.0, 12),
        Err(MathError::InvalidInput(_))
    ));
    assert!(convert_time_zone(midnight(), bad, 0.0).is_err());
}

fn eurusd() -> Instrument {
    Instrument::new("EUR/USD").unwrap()
}

fn one_to_one() -> Leverage {
    Leverage::new(1.0).unwrap()
}

#[rstest]
#[case::compound_interest(compound_interest(1e6, 0.0, 1000.0, 200.0, 12).map(drop))]
#[case::margin_required(margin_required(1e300, 1e300, one_to_one()).map(drop))]
#[case::profit_loss(profit_loss(1e-300, 1e300, 1e10, Direction::Buy, &eurusd()).map(drop))]
#[case::pip_value(pip_value(&eurusd(), 1e308, "JPY").map(drop))]
#[case::pivot_points(pivot_points(1.7e308, 1.0, 1.7e308).map(drop))]
#[case::fibonacci_extensions(fibonacci_extensions(1.7e308, 1e-300, Trend::Up).map(drop))]
#[case::moving_average(moving_average(&[1.7e308, 1.7e308]).map(drop))]
#[case::standard_deviation(standard_deviation(&[1.7e308, -1.7e308]).map(drop))]
#[case::rsi(rsi(&[-1.7e308, 1.7e308]).map(drop))]
#[case::kelly(kelly_criterion(0.5, 1e300, 1e-300).map(drop))]
#[case::roi(roi(1e-300, 1.7e308).map(drop))]
#[case::convert_currency(convert_currency(1e300, 1e-10, 1e10).map(drop))]
fn non_finite_outputs_are_reported(#[case] result: Result<(), MathError>) {
    assert!(
        matches!(result, Err(MathError::DegenerateCase(_))),
        "expected an out-of-range failure, got {:?}",
        result
    );
}

#[test]
fn compound_interest_overflow_is_not_nan() {
    // Zero contributions times an infinite growth factor would be NaN
    match compound_interest(1e6, 0.0, 1000.0, 200.0, 12) {
        Err(MathError::DegenerateCase(msg)) => assert!(msg.contains("future value")),
        other => panic!("expected an out-of-range failure, got {:?}", other),
    }
}

fn midnight() -> chrono::NaiveTime {
    chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap()
}
