use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic workbook hash (BLAKE3 over sheet names and cell text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkbookHash(pub String);

impl WorkbookHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// First 12 hex digits, for log lines and headers.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl fmt::Display for WorkbookHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a security, as it appears in sheet headers.
pub type Security = String;
