//! # FX Toolkit
//!
//! Forex trading calculators. The formulas live in [`math`]; [`desk`] adds
//! the selected pair, reference rates, usage statistics and a JSON request
//! format on top.
//!
//! ## Example
//!
//! ```
//! use fx_toolkit::math::{pips, Instrument};
//!
//! let pair: Instrument = "USD/JPY".parse().unwrap();
//! assert_eq!(pips::pip_size(&pair), 0.01);
//! ```

pub use fx_desk as desk;
pub use fx_math as math;

pub use fx_desk::{CalculationOutcome, CalculationRequest, DeskConfig, DeskContext, DeskError};
pub use fx_math::{Direction, Instrument, MathError, RateTable};
