//! Domain types for SignalBoard

pub mod ids;
pub mod ohlc;
pub mod series;
pub mod signal;

pub use ids::{Security, WorkbookHash};
pub use ohlc::{OhlcFrame, OhlcRow};
pub use series::{PriceSeries, SeriesPoint};
pub use signal::{Action, Language, Signal, SignalSummary, SignalValue, ValuationEstimate};
