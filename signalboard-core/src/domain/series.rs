//! Dated value series read from one sheet column.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated observation. `value` is `None` where the sheet has no number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Ordered `(date, value)` pairs for one security and one quoted field.
///
/// Dates are unique and strictly increasing: construction sorts by date and
/// keeps the first occurrence of a duplicated date (in input order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    name: String,
    points: Vec<SeriesPoint>,
}

impl PriceSeries {
    pub fn new(name: impl Into<String>, mut points: Vec<SeriesPoint>) -> Self {
        // Stable sort keeps input order among equal dates, so dedup keeps the first.
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Values with missing observations as NaN, ready for indicator input.
    pub fn values(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.value.unwrap_or(f64::NAN))
            .collect()
    }

    /// Value on an exact date.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .and_then(|i| self.points[i].value)
    }

    /// Date of the first defined value.
    pub fn first_valid_date(&self) -> Option<NaiveDate> {
        self.points.iter().find(|p| p.value.is_some()).map(|p| p.date)
    }

    /// Latest defined observation.
    pub fn last_defined(&self) -> Option<SeriesPoint> {
        self.points.iter().rev().find(|p| p.value.is_some()).copied()
    }

    /// Points dated on or after `start`.
    pub fn since(&self, start: NaiveDate) -> Self {
        let from = self.points.partition_point(|p| p.date < start);
        Self {
            name: self.name.clone(),
            points: self.points[from..].to_vec(),
        }
    }

    /// Drop points with no value.
    pub fn defined_only(&self) -> Self {
        Self {
            name: self.name.clone(),
            points: self
                .points
                .iter()
                .filter(|p| p.value.is_some())
                .copied()
                .collect(),
        }
    }
}
