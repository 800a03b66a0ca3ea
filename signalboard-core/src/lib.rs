//! Signalboard Core: workbook loading, indicator computation, signal
//! classification and fundamental panels for one security at a time.
//!
//! - Workbook model (sheets of cells, loaded from a CSV directory)
//! - OHLC alignment across the four quote sheets
//! - Indicator engine (SMA, EMA, RSI, MACD, Bollinger, ROC, momentum proxy)
//! - Technical and valuation signal classifiers
//! - Fundamental panels (indices, profile, shareholders, volume)

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fundamentals;
pub mod indicators;
pub mod report;
pub mod session;
pub mod signals;
pub mod workbook;

pub use config::{AnalysisConfig, ConfigError};
pub use error::AnalysisError;
pub use report::{Panel, SecurityReport};
pub use session::{AnalysisSession, SessionError};
pub use workbook::{Workbook, WorkbookError};
