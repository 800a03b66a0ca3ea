//! Load a workbook exported as one CSV file per sheet.
//!
//! `COURS.csv` becomes sheet `COURS`, `Profil 1.csv` becomes `Profil 1`.
//! Semicolon-delimited exports (the usual French spreadsheet setting) are
//! detected from the first line. Non-UTF-8 bytes are replaced rather than
//! rejected.

use super::{Cell, Sheet, Workbook};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors while reading a workbook from disk.
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("workbook path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("no CSV sheets found in {0}")]
    Empty(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Read every `*.csv` file in `dir` as a sheet.
pub fn load_csv_dir(dir: &Path) -> Result<Workbook, WorkbookError> {
    if !dir.is_dir() {
        return Err(WorkbookError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| WorkbookError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| WorkbookError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(WorkbookError::Empty(dir.to_path_buf()));
    }

    let mut sheets = Vec::with_capacity(paths.len());
    for path in &paths {
        let sheet = read_sheet(path)?;
        debug!(
            sheet = sheet.name(),
            rows = sheet.row_count(),
            "loaded sheet"
        );
        sheets.push(sheet);
    }

    Ok(Workbook::new(sheets))
}

/// Read a single CSV file as a sheet named after the file stem.
pub fn read_sheet(path: &Path) -> Result<Sheet, WorkbookError> {
    let bytes = fs::read(path).map_err(|source| WorkbookError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let delimiter = detect_delimiter(&bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes.as_slice());

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|source| WorkbookError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<Cell> = record
            .iter()
            .map(|field| {
                let text = String::from_utf8_lossy(field);
                if delimiter == b';' {
                    Cell::parse_decimal_comma(&text)
                } else {
                    Cell::parse(&text)
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Sheet::new(name, rows))
}

fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);
    let semicolons = first_line.iter().filter(|&&b| b == b';').count();
    let commas = first_line.iter().filter(|&&b| b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_sheets_named_after_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("COURS.csv"), "Date,ACME\n2024-01-02,10.5\n").unwrap();
        fs::write(dir.path().join("Profil 1.csv"), "Champ,ACME\nSecteur,Industrie\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let wb = load_csv_dir(dir.path()).unwrap();
        assert_eq!(wb.sheet_names(), vec!["COURS", "Profil 1"]);

        let cours = wb.sheet("COURS").unwrap();
        assert_eq!(cours.cell(1, 1), &Cell::Number(10.5));
    }

    #[test]
    fn semicolon_exports_are_detected() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("ACME.csv"),
            ";;;Fondateur;12,5%\n;;;Public;87,5%\n",
        )
        .unwrap();

        let wb = load_csv_dir(dir.path()).unwrap();
        let sheet = wb.sheet("ACME").unwrap();
        assert_eq!(sheet.cell(0, 3), &Cell::Text("Fondateur".into()));
        assert_eq!(sheet.cell(1, 4), &Cell::Text("87,5%".into()));
    }

    #[test]
    fn comma_exports_keep_thousands_groups_as_text() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("VOLUME.csv"), "Date,ACME\n2024-01-02,\"1,234\"\n").unwrap();
        fs::write(dir.path().join("COURS.csv"), "Date;ACME\n2024-01-02;1,234\n").unwrap();

        let wb = load_csv_dir(dir.path()).unwrap();
        assert_eq!(
            wb.sheet("VOLUME").unwrap().cell(1, 1),
            &Cell::Text("1,234".into())
        );
        assert_eq!(wb.sheet("COURS").unwrap().cell(1, 1), &Cell::Number(1.234));
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("S.csv"), "a,b,c\n1\n1,2,3,4\n").unwrap();
        let wb = load_csv_dir(dir.path()).unwrap();
        let sheet = wb.sheet("S").unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.width(), 4);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_csv_dir(dir.path()),
            Err(WorkbookError::Empty(_))
        ));
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("COURS.csv");
        fs::write(&file, "Date\n").unwrap();
        assert!(matches!(
            load_csv_dir(&file),
            Err(WorkbookError::NotADirectory(_))
        ));
    }
}
