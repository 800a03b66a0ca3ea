//! Company profile sheets.
//!
//! Both `Profil` and `Profil 1` have a header row of security names and a
//! first column of field labels.

use crate::error::AnalysisError;
use crate::workbook::{Cell, Sheet};
use serde::Serialize;

/// One labelled profile value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyProfile {
    /// Free-text description from the first data row.
    pub description: Option<String>,
    pub key_stats: Vec<Field>,
}

/// Informations fields laid out in two display columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Informations {
    pub left: Vec<Field>,
    pub right: Vec<Field>,
}

impl Informations {
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.left.iter().chain(self.right.iter())
    }
}

/// Labelled non-empty values of the security's column, in sheet order.
fn labelled_values(sheet: &Sheet, security: &str) -> Result<Vec<Field>, AnalysisError> {
    let col = sheet.column_index(security)?;
    Ok(sheet
        .data_rows()
        .iter()
        .filter_map(|row| {
            let value = row.get(col).filter(|c| !c.is_empty())?;
            let label = row.first().map(Cell::to_string).unwrap_or_default();
            Some(Field {
                label: label.trim().to_string(),
                value: value.to_string(),
            })
        })
        .collect())
}

/// Description and key statistics for `security`.
///
/// Key statistics are the security's non-empty values with the first one
/// (normally the description) dropped.
pub fn read_profile(sheet: &Sheet, security: &str) -> Result<CompanyProfile, AnalysisError> {
    let col = sheet.column_index(security)?;
    let description = sheet
        .data_rows()
        .first()
        .and_then(|row| row.get(col))
        .filter(|c| !c.is_empty())
        .map(Cell::to_string);

    let key_stats = labelled_values(sheet, security)?
        .into_iter()
        .skip(1)
        .collect();

    Ok(CompanyProfile {
        description,
        key_stats,
    })
}

/// Non-empty informations fields, the first `split` in the left column.
pub fn read_informations(
    sheet: &Sheet,
    security: &str,
    split: usize,
) -> Result<Informations, AnalysisError> {
    let mut left = labelled_values(sheet, security)?;
    let right = left.split_off(split.min(left.len()));
    Ok(Informations { left, right })
}
