use fx_desk::{
    CalculationOutcome, CalculationRequest, DeskConfig, DeskContext, DeskError, Preferences,
};
use fx_math::Instrument;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config_in(dir: &Path) -> DeskConfig {
    DeskConfig {
        preferences_path: Some(dir.join("prefs.json")),
        ..DeskConfig::default()
    }
}

fn requests(json: &str) -> Vec<CalculationRequest> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_batch_dispatch_counts_each_calculator() {
    init_logging();
    let mut desk = DeskContext::default();

    let batch = requests(
        r#"[
            {"calculator": "fibonacci", "high": 1.1, "low": 1.0, "trend": "down"},
            {"calculator": "fibonacci", "high": 1.1, "low": 1.0, "trend": "up", "extensions": true},
            {"calculator": "rsi", "values": [1, 2, 3, 2, 4]},
            {"calculator": "value_at_risk", "portfolio_value": 100000, "confidence_percent": 95, "daily_volatility_percent": 1}
        ]"#,
    );

    let outcomes: Vec<CalculationOutcome> = batch
        .iter()
        .map(|r| desk.calculate(r).unwrap())
        .collect();

    match &outcomes[0] {
        CalculationOutcome::Fibonacci(levels) => {
            assert_eq!(levels.len(), 7);
            assert!((levels[4].price - (1.1 - 0.1 * 0.618)).abs() < 1e-9);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    match &outcomes[1] {
        CalculationOutcome::Fibonacci(levels) => assert_eq!(levels.len(), 4),
        other => panic!("unexpected outcome {:?}", other),
    }

    assert_eq!(desk.stats().total_calculations(), 4);
    assert_eq!(desk.stats().most_used(1)[0].name, "Fibonacci");
    assert_eq!(desk.stats().count_for("RSI"), 1);
    assert_eq!(desk.stats().count_for("Value at Risk"), 1);
}

#[test]
fn test_outcomes_serialize_with_calculator_tag() {
    init_logging();
    let mut desk = DeskContext::default();
    let request: CalculationRequest = serde_json::from_str(
        r#"{"calculator": "margin_level", "equity": 1000, "used_margin": 0}"#,
    )
    .unwrap();

    let outcome = desk.calculate(&request).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["calculator"], "margin_level");
    assert!(json["result"]["level_percent"].is_null());
    assert_eq!(json["result"]["free_margin"], 1000.0);
}

#[test]
fn test_preferences_survive_a_restart() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();

    let mut desk = DeskContext::load(config_in(dir.path())).unwrap();
    desk.select_pair(Instrument::new("GBP/JPY").unwrap()).unwrap();
    let request: CalculationRequest = serde_json::from_str(
        r#"{"calculator": "risk_reward", "entry": 190.00, "stop_loss": 189.50, "take_profit": 191.00}"#,
    )
    .unwrap();
    match desk.calculate(&request).unwrap() {
        CalculationOutcome::RiskReward(rr) => {
            assert!((rr.ratio - 2.0).abs() < 1e-9);
            assert!((rr.risk_pips - 50.0).abs() < 1e-6);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(desk.save_preferences().unwrap());

    let restored = DeskContext::load(config_in(dir.path())).unwrap();
    assert_eq!(restored.selected_pair().symbol(), "GBP/JPY");
    assert_eq!(restored.stats(), desk.stats());
    assert_eq!(restored.preferences(), desk.preferences());
}

#[test]
fn test_saved_pair_missing_from_rates_is_ignored() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();

    let rates_path = dir.path().join("rates.json");
    fs::write(
        &rates_path,
        r#"{"success": true, "prices": {"EUR/USD": 1.09, "USD/JPY": 150.1}, "source": "live"}"#,
    )
    .unwrap();

    let prefs = Preferences {
        selected_pair: Instrument::new("NZD/CAD").unwrap(),
        ..Preferences::default()
    };
    prefs.save(&dir.path().join("prefs.json")).unwrap();

    let config = DeskConfig {
        rates_path: Some(rates_path),
        ..config_in(dir.path())
    };
    let desk = DeskContext::load(config).unwrap();
    assert_eq!(desk.prices().len(), 2);
    assert_eq!(desk.selected_pair().symbol(), "EUR/USD");
}

#[test]
fn test_margin_follows_loaded_snapshot() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let rates_path = dir.path().join("rates.json");
    fs::write(
        &rates_path,
        r#"{"success": true, "prices": {"EUR/USD": 1.2}, "timestamp": "2024-05-01T12:00:00Z"}"#,
    )
    .unwrap();

    let mut desk = DeskContext::load(DeskConfig {
        rates_path: Some(rates_path),
        ..DeskConfig::default()
    })
    .unwrap();

    let request: CalculationRequest =
        serde_json::from_str(r#"{"calculator": "margin_required", "lots": 1, "leverage": 100}"#)
            .unwrap();
    match desk.calculate(&request).unwrap() {
        CalculationOutcome::MarginRequired(margin) => assert!((margin - 1200.0).abs() < 1e-9),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_missing_snapshot_file_is_an_io_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let result = DeskContext::load(DeskConfig {
        rates_path: Some(dir.path().join("absent.json")),
        ..DeskConfig::default()
    });
    assert!(matches!(result, Err(DeskError::Io(_))));
}
