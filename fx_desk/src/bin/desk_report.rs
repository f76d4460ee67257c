//! Run a batch of calculator requests through the desk and print the results.
//!
//! Usage: `desk_report [--config desk.json] [requests.json]`
//!
//! The requests file holds a JSON array of calculator requests. Without one
//! a small built-in batch is run. The config comes from `--config`, then
//! `FX_DESK_CONFIG`. Set `RUST_LOG` to adjust logging.

use clap::Parser;
use fx_desk::{CalculationRequest, DeskContext, DeskError, ReportArgs};
use log::{error, info};
use std::fs;
use std::process;

const SAMPLE_REQUESTS: &str = r#"[
    {"calculator": "position_size", "balance": 10000, "risk_percent": 2, "stop_loss_pips": 50},
    {"calculator": "pip_value", "lots": 1},
    {"calculator": "risk_reward", "entry": 1.0850, "stop_loss": 1.0800, "take_profit": 1.0950},
    {"calculator": "fibonacci", "high": 1.1000, "low": 1.0500, "trend": "down"},
    {"calculator": "pivot_points", "high": 1.0900, "low": 1.0800, "close": 1.0850, "method": "camarilla"},
    {"calculator": "margin_required", "lots": 0.5, "leverage": "1:30"},
    {"calculator": "compound_interest", "principal": 10000, "monthly_contribution": 200, "annual_rate_percent": 7, "years": 10},
    {"calculator": "time_zone", "time": "22:00:00", "from_offset_hours": -5, "to_offset_hours": 9}
]"#;

fn run(args: &ReportArgs) -> Result<(), DeskError> {
    let config = args.desk_config()?;
    let mut desk = DeskContext::load(config)?;
    info!(
        "Desk ready on {} with {} reference prices",
        desk.selected_pair(),
        desk.prices().len()
    );

    let payload = match &args.requests {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE_REQUESTS.to_string(),
    };
    let requests: Vec<CalculationRequest> = serde_json::from_str(&payload)?;

    let mut failures = 0;
    for request in &requests {
        match desk.calculate(request) {
            Ok(outcome) => println!("{}", serde_json::to_string(&outcome)?),
            Err(e) => {
                failures += 1;
                println!("{}: {}", request.name(), e);
            }
        }
    }

    println!("\nMost used calculators:");
    for entry in desk.stats().most_used(5) {
        println!("  {:<20} {}", entry.name, entry.count);
    }
    println!(
        "{} of {} requests succeeded",
        requests.len() - failures,
        requests.len()
    );

    if desk.save_preferences()? {
        info!("Preferences saved");
    }
    Ok(())
}

fn main() {
    let args = ReportArgs::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
