//! Analysis session: one loaded workbook plus the configuration it is read with.
//!
//! The session is immutable once built and is shared by reference between
//! analyses, including across threads.

use crate::config::{AnalysisConfig, ConfigError};
use crate::data::{align_security, read_series};
use crate::domain::{PriceSeries, Security, SignalSummary, WorkbookHash};
use crate::error::AnalysisError;
use crate::fundamentals::{
    classify_estimates, compare_with_indices, index_history, index_list, read_estimates,
    read_informations, read_profile, read_shareholders, read_volume, CompanyProfile, Informations,
    ShareholderBreakdown,
};
use crate::indicators::IndicatorSuite;
use crate::report::{IndexHistory, IndicesPanel, SecurityReport, TechnicalAnalysis, ValuationPanel};
use crate::signals::{classify_technical, technical_rules, SignalRule};
use crate::workbook::{Workbook, WorkbookError};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors while building a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Workbook(#[from] WorkbookError),
}

pub struct AnalysisSession {
    workbook: Workbook,
    config: AnalysisConfig,
    fingerprint: WorkbookHash,
    suite: IndicatorSuite,
    rules: Vec<Box<dyn SignalRule>>,
}

impl AnalysisSession {
    /// Build a session; the configuration is validated first.
    pub fn new(workbook: Workbook, config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fingerprint = workbook.fingerprint();
        let suite = IndicatorSuite::from_config(&config.indicators);
        let rules = technical_rules(&config.indicators);
        info!(
            sheets = workbook.len(),
            workbook = fingerprint.short(),
            "workbook loaded"
        );
        Ok(Self {
            workbook,
            config,
            fingerprint,
            suite,
            rules,
        })
    }

    /// Load a CSV workbook directory. The configuration is checked before
    /// the workbook is read.
    pub fn open(dir: &Path, config: AnalysisConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let workbook = Workbook::open(dir)?;
        Ok(Self::new(workbook, config)?)
    }

    /// Swap in a freshly loaded workbook; the configuration is kept.
    pub fn replace_workbook(&mut self, workbook: Workbook) {
        self.fingerprint = workbook.fingerprint();
        self.workbook = workbook;
        info!(workbook = self.fingerprint.short(), "workbook replaced");
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn fingerprint(&self) -> &WorkbookHash {
        &self.fingerprint
    }

    /// Securities listed as headers of the securities sheet, date column excluded.
    pub fn securities(&self) -> Result<Vec<Security>, AnalysisError> {
        let sheets = &self.config.sheets;
        let sheet = self.workbook.sheet(&sheets.securities)?;
        Ok(sheet
            .headers()
            .into_iter()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty() && *h != sheets.date_column)
            .collect())
    }

    /// Build every panel for `security`.
    pub fn analyze(&self, security: &str) -> SecurityReport {
        debug!(security, "analysis started");
        let report = SecurityReport {
            security: security.to_string(),
            workbook: self.fingerprint.clone(),
            technical: self.technical(security).into(),
            volume: self.volume(security).into(),
            indices: self.indices(security).into(),
            profile: self.profile(security).into(),
            informations: self.informations(security).into(),
            shareholders: self.shareholders(security).into(),
            valuation: self.valuation(security).into(),
        };
        for (panel, err) in report.unavailable() {
            warn!(security, panel, error = %err, "panel unavailable");
        }
        report
    }

    /// Aligned OHLC frame, indicators and the ten-row signal table.
    pub fn technical(&self, security: &str) -> Result<TechnicalAnalysis, AnalysisError> {
        let frame = align_security(
            &self.workbook,
            &self.config.sheets,
            security,
            self.config.periods.technical_since,
        )?;
        let last_price = frame
            .last()
            .map(|row| row.close)
            .ok_or_else(|| AnalysisError::NoPriceData {
                security: security.to_string(),
            })?;

        let indicators = self.suite.compute(&frame.closes());
        let signals = classify_technical(
            &self.rules,
            &indicators,
            last_price,
            self.config.display.language,
        );
        let summary = SignalSummary::from_signals(&signals);
        debug!(
            security,
            buy = summary.buy,
            sell = summary.sell,
            neutral = summary.neutral,
            "technical signals classified"
        );

        Ok(TechnicalAnalysis {
            frame,
            indicators,
            last_price,
            signals,
            summary,
        })
    }

    /// Buy/Sell/Neutral tally of the technical table.
    pub fn summary(&self, security: &str) -> Result<SignalSummary, AnalysisError> {
        self.technical(security).map(|t| t.summary)
    }

    pub fn volume(&self, security: &str) -> Result<PriceSeries, AnalysisError> {
        let sheets = &self.config.sheets;
        read_volume(
            self.workbook.sheet(&sheets.volume)?,
            &sheets.date_column,
            security,
            self.config.periods.volume_since,
        )
    }

    pub fn indices(&self, security: &str) -> Result<IndicesPanel, AnalysisError> {
        let sheets = &self.config.sheets;
        let indices = index_list(self.workbook.sheet(&sheets.indices)?, security)?;
        if indices.is_empty() {
            return Ok(IndicesPanel {
                indices,
                comparison: None,
                histories: Vec::new(),
            });
        }

        let prices = self.workbook.sheet(&sheets.close);
        let comparison = prices.clone().and_then(|p| {
            compare_with_indices(
                p,
                &sheets.date_column,
                security,
                &indices,
                self.config.periods.technical_since,
            )
        });
        let histories = indices
            .iter()
            .map(|index| IndexHistory {
                index: index.clone(),
                history: prices
                    .clone()
                    .and_then(|p| index_history(p, &sheets.date_column, index))
                    .into(),
            })
            .collect();

        Ok(IndicesPanel {
            indices,
            comparison: Some(comparison.into()),
            histories,
        })
    }

    pub fn profile(&self, security: &str) -> Result<CompanyProfile, AnalysisError> {
        read_profile(self.workbook.sheet(&self.config.sheets.profile)?, security)
    }

    pub fn informations(&self, security: &str) -> Result<Informations, AnalysisError> {
        read_informations(
            self.workbook.sheet(&self.config.sheets.informations)?,
            security,
            self.config.fundamentals.informations_split,
        )
    }

    /// Holder breakdown from the sheet named after the security.
    pub fn shareholders(&self, security: &str) -> Result<ShareholderBreakdown, AnalysisError> {
        let f = &self.config.fundamentals;
        let sheet = self.workbook.sheet(security)?;
        Ok(read_shareholders(
            sheet,
            f.shareholder_name_column,
            f.shareholder_percent_column,
        ))
    }

    /// Valuation estimates against the latest close since the valuation start date.
    pub fn valuation(&self, security: &str) -> Result<ValuationPanel, AnalysisError> {
        let sheets = &self.config.sheets;
        let estimates = read_estimates(
            self.workbook.sheet(&sheets.valuation)?,
            security,
            self.config.fundamentals.valuation_rows,
        )?;

        let closes = read_series(
            self.workbook.sheet(&sheets.close)?,
            &sheets.date_column,
            security,
        )?;
        let closes = match self.config.periods.valuation_price_since {
            Some(start) => closes.since(start),
            None => closes,
        };
        let latest = closes
            .last_defined()
            .ok_or_else(|| AnalysisError::NoPriceData {
                security: security.to_string(),
            })?;
        let price = latest.value.unwrap_or(f64::NAN);

        Ok(ValuationPanel {
            price,
            price_date: latest.date,
            signals: classify_estimates(&estimates, price),
        })
    }
}
