//! # FX Desk
//!
//! `fx_desk` wires the [`fx_math`] formulas up to the things a calculator
//! front end needs around them: which pair is selected, which reference
//! prices are current, how often each calculator is used, and a JSON
//! request format that reaches every calculator.
//!
//! Nothing here fetches prices. Rate snapshots and quotes are parsed from
//! payloads produced by an external feed and handed to the desk.
//!
//! ## Usage Example
//!
//! ```
//! use fx_desk::{CalculationOutcome, CalculationRequest, DeskConfig, DeskContext};
//!
//! let mut desk = DeskContext::new(DeskConfig::default());
//! let request: CalculationRequest = serde_json::from_str(
//!     r#"{"calculator": "position_size", "balance": 10000, "risk_percent": 2, "stop_loss_pips": 50}"#,
//! ).unwrap();
//!
//! match desk.calculate(&request).unwrap() {
//!     CalculationOutcome::PositionSize(sizing) => assert!((sizing.lot_size - 0.4).abs() < 1e-9),
//!     other => panic!("unexpected outcome {:?}", other),
//! }
//! assert_eq!(desk.stats().total_calculations(), 1);
//! ```

use fx_math::MathError;
use thiserror::Error;

pub mod calculator;
pub mod cli;
pub mod config;
pub mod context;
pub mod preferences;
pub mod quotes;
pub mod stats;

pub use calculator::{CalculationOutcome, CalculationRequest, DeskView};
pub use cli::ReportArgs;
pub use config::DeskConfig;
pub use context::DeskContext;
pub use preferences::Preferences;
pub use quotes::{Quote, QuoteSource, RateSnapshot};
pub use stats::{CalculatorCount, UsageStats};

/// Errors that can occur while running the desk
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Calculation failed: {0}")]
    Math(#[from] MathError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate feed error: {0}")]
    Feed(String),
}

/// Result type for desk operations
pub type Result<T> = std::result::Result<T, DeskError>;
