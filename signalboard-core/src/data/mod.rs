//! Sheet-to-series extraction and OHLC alignment

pub mod align;
pub mod series;

pub use align::{align_ohlc, align_security};
pub use series::read_series;
