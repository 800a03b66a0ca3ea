//! Analysis configuration, loadable from TOML.
//!
//! Every field has a default matching the dashboard's workbook layout, so an
//! empty file (or no file) is a valid configuration:
//!
//! ```toml
//! [periods]
//! technical_since = "2021-01-01"
//!
//! [indicators]
//! sma_windows = [7, 21, 100]
//!
//! [display]
//! language = "fr"
//! ```

use crate::domain::Language;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sheets: SheetNames,
    pub indicators: IndicatorConfig,
    pub periods: PeriodConfig,
    pub fundamentals: FundamentalsConfig,
    pub display: DisplayConfig,
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        let windows = ind
            .sma_windows
            .iter()
            .chain(ind.ema_windows.iter())
            .chain([
                &ind.rsi_window,
                &ind.macd_fast,
                &ind.macd_slow,
                &ind.macd_signal,
                &ind.bollinger_window,
                &ind.roc_window,
                &ind.momentum_window,
            ]);
        for &w in windows {
            if w == 0 {
                return Err(ConfigError::Invalid(
                    "indicator windows must be >= 1".into(),
                ));
            }
        }
        if ind.macd_fast >= ind.macd_slow {
            return Err(ConfigError::Invalid(format!(
                "macd_fast ({}) must be below macd_slow ({})",
                ind.macd_fast, ind.macd_slow
            )));
        }
        if !ind.bollinger_k.is_finite() || ind.bollinger_k <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bollinger_k must be positive, got {}",
                ind.bollinger_k
            )));
        }
        let f = &self.fundamentals;
        if f.shareholder_name_column == f.shareholder_percent_column {
            return Err(ConfigError::Invalid(
                "shareholder name and percentage columns must differ".into(),
            ));
        }
        Ok(())
    }
}

/// Sheet and column names expected in the workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    /// Sheet whose headers list the securities.
    pub securities: String,
    pub close: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub volume: String,
    pub indices: String,
    pub profile: String,
    pub informations: String,
    pub valuation: String,
    pub date_column: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            securities: "MAX".into(),
            close: "COURS".into(),
            open: "OUVERTURE".into(),
            high: "MAX".into(),
            low: "MIN".into(),
            volume: "VOLUME".into(),
            indices: "INDICES".into(),
            profile: "Profil".into(),
            informations: "Profil 1".into(),
            valuation: "Statistique".into(),
            date_column: "Date".into(),
        }
    }
}

/// Indicator windows. Signal thresholds are fixed and not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_windows: Vec<usize>,
    pub ema_windows: Vec<usize>,
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_window: usize,
    pub bollinger_k: f64,
    pub roc_window: usize,
    pub momentum_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_windows: vec![7, 21, 100],
            ema_windows: vec![14, 100],
            rsi_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_window: 20,
            bollinger_k: 2.0,
            roc_window: 12,
            momentum_window: 10,
        }
    }
}

/// Start dates applied before analysis. `None` keeps the full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    pub technical_since: Option<NaiveDate>,
    pub volume_since: Option<NaiveDate>,
    pub valuation_price_since: Option<NaiveDate>,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            technical_since: NaiveDate::from_ymd_opt(2021, 1, 1),
            volume_since: NaiveDate::from_ymd_opt(2018, 1, 1),
            valuation_price_since: NaiveDate::from_ymd_opt(2018, 1, 1),
        }
    }
}

/// Layout of the fundamental sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalsConfig {
    /// Trailing rows of the valuation sheet holding valuation methods.
    pub valuation_rows: usize,
    /// Zero-based column of holder names in a security's own sheet (D).
    pub shareholder_name_column: usize,
    /// Zero-based column of holding percentages (E).
    pub shareholder_percent_column: usize,
    /// Informations fields shown in the first display column.
    pub informations_split: usize,
}

impl Default for FundamentalsConfig {
    fn default() -> Self {
        Self {
            valuation_rows: 4,
            shareholder_name_column: 3,
            shareholder_percent_column: 4,
            informations_split: 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub language: Language,
}
