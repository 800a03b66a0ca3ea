//! End-to-end analysis over a workbook written to a temporary CSV directory.

use signalboard_core::domain::{Action, SignalValue};
use signalboard_core::{AnalysisConfig, AnalysisError, AnalysisSession, Panel, Workbook};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SECURITIES: [&str; 2] = ["ACME", "GLOBEX"];

/// Quote sheets, newest date first, 150 business-ish days from 2021-01-04.
fn write_quotes(dir: &Path) {
    let mut close = String::from("Date;ACME;GLOBEX;MASI\n");
    let mut open = String::from("Date;ACME;GLOBEX\n");
    let mut high = String::from("Date;ACME;GLOBEX\n");
    let mut low = String::from("Date;ACME;GLOBEX\n");
    let mut volume = String::from("Date;ACME;GLOBEX\n");

    let start = chrono::NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
    for i in (0..150).rev() {
        let date = start + chrono::Duration::days(i);
        let acme = 100.0 + i as f64 * 0.5;
        let globex = 80.0 - i as f64 * 0.2;
        let masi = if i >= 30 {
            format!("{}", 12000.0 + i as f64)
        } else {
            String::new()
        };
        close.push_str(&format!("{date};{acme};{globex};{masi}\n"));
        open.push_str(&format!("{date};{acme};{globex}\n"));
        high.push_str(&format!("{date};{};{}\n", acme + 1.0, globex + 1.0));
        low.push_str(&format!("{date};{};{}\n", acme - 1.0, globex - 1.0));
        volume.push_str(&format!("{date};{};{}\n", 1000 + i, 500 + i));
    }

    fs::write(dir.join("COURS.csv"), close).unwrap();
    fs::write(dir.join("OUVERTURE.csv"), open).unwrap();
    fs::write(dir.join("MAX.csv"), high).unwrap();
    fs::write(dir.join("MIN.csv"), low).unwrap();
    fs::write(dir.join("VOLUME.csv"), volume).unwrap();
}

fn write_fundamentals(dir: &Path) {
    fs::write(dir.join("INDICES.csv"), "ACME;GLOBEX\nMASI;\nMADEX;\n").unwrap();
    fs::write(
        dir.join("Profil.csv"),
        "Champ;ACME;GLOBEX\nProfil;Anvils and rockets;Everything\nSecteur;Industrie;Conglomérat\nCapital;1000;\n",
    )
    .unwrap();
    fs::write(
        dir.join("Profil 1.csv"),
        "Champ;ACME\nISIN;MA01\nTicker;ACM\nDevise;MAD\nMarché;Principal\nNominal;10\n",
    )
    .unwrap();
    fs::write(
        dir.join("Statistique.csv"),
        "Méthode;ACME;GLOBEX\nPER;12;8\nDCF;500;10\nMultiples;100;n/a\nANR;174,5;60\nGraham;50;90\n",
    )
    .unwrap();
    fs::write(
        dir.join("ACME.csv"),
        ";;;Holding SA;\"51,5%\"\n;;;Flottant;\"48,5%\"\n;;;Mystère;abc\n",
    )
    .unwrap();
}

fn workbook_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_quotes(dir.path());
    write_fundamentals(dir.path());
    dir
}

fn session(dir: &TempDir) -> AnalysisSession {
    AnalysisSession::open(dir.path(), AnalysisConfig::default()).unwrap()
}

#[test]
fn lists_securities_from_max_sheet() {
    let dir = workbook_dir();
    assert_eq!(session(&dir).securities().unwrap(), SECURITIES.to_vec());
}

#[test]
fn full_report_for_acme() {
    let dir = workbook_dir();
    let report = session(&dir).analyze("ACME");
    assert!(report.unavailable().is_empty(), "{:?}", report.unavailable());

    let technical = report.technical.ready().unwrap();
    assert_eq!(technical.frame.len(), 150);
    assert_eq!(technical.excluded_rows(), 0);
    assert_eq!(technical.last_price, 100.0 + 149.0 * 0.5);
    assert_eq!(technical.signals.len(), 10);
    // Steady uptrend: price above every moving average.
    for s in &technical.signals[..3] {
        assert_eq!(s.action, Action::Buy, "{}", s.name);
    }
    assert!(matches!(technical.signals[5].value, SignalValue::Bands { .. }));

    let volume = report.volume.ready().unwrap();
    assert_eq!(volume.len(), 150);

    let indices = report.indices.ready().unwrap();
    assert_eq!(indices.indices, vec!["MASI", "MADEX"]);
    let comparison = indices.comparison.as_ref().unwrap().ready().unwrap();
    assert_eq!(comparison.missing, vec!["MADEX"]);
    assert_eq!(comparison.security.len(), 120);
    assert!(indices.histories[0].history.is_ready());
    assert!(matches!(
        indices.histories[1].history,
        Panel::Unavailable(AnalysisError::MissingColumn { .. })
    ));

    let profile = report.profile.ready().unwrap();
    assert_eq!(profile.description.as_deref(), Some("Anvils and rockets"));
    assert_eq!(profile.key_stats.len(), 2);

    let info = report.informations.ready().unwrap();
    assert_eq!(info.left.len(), 4);
    assert_eq!(info.right.len(), 1);

    let holders = report.shareholders.ready().unwrap();
    assert_eq!(holders.holders.len(), 2);
    assert_eq!(holders.rejected.len(), 1);

    let valuation = report.valuation.ready().unwrap();
    assert_eq!(valuation.price, 174.5);
    let actions: Vec<Action> = valuation.signals.iter().map(|s| s.action).collect();
    // DCF 500, Multiples 100, ANR 174.5, Graham 50
    assert_eq!(
        actions,
        vec![Action::Buy, Action::Sell, Action::Neutral, Action::Sell]
    );
}

#[test]
fn missing_indices_column_only_affects_indices_panel() {
    let dir = workbook_dir();
    fs::write(dir.path().join("INDICES.csv"), "ACME\nMASI\n").unwrap();
    let report = session(&dir).analyze("GLOBEX");

    assert_eq!(
        report.indices.error(),
        Some(&AnalysisError::missing_column("INDICES", "GLOBEX"))
    );
    assert!(report.technical.is_ready());
    assert!(report.volume.is_ready());
    assert!(report.profile.is_ready());
    assert!(report.valuation.is_ready());
}

#[test]
fn analysis_is_deterministic() {
    let dir = workbook_dir();
    let s = session(&dir);
    let first = serde_json::to_string(&s.analyze("ACME")).unwrap();
    let second = serde_json::to_string(&s.analyze("ACME")).unwrap();
    assert_eq!(first, second);

    let reloaded = session(&dir);
    assert_eq!(reloaded.fingerprint(), s.fingerprint());
}

#[test]
fn empty_technical_window_is_no_price_data() {
    let dir = workbook_dir();
    let mut config = AnalysisConfig::default();
    config.periods.technical_since = chrono::NaiveDate::from_ymd_opt(2030, 1, 1);
    let s = AnalysisSession::open(dir.path(), config).unwrap();
    assert_eq!(
        s.technical("ACME").unwrap_err(),
        AnalysisError::NoPriceData {
            security: "ACME".into()
        }
    );
}

#[test]
fn inconsistent_rows_are_counted() {
    let dir = workbook_dir();
    // Push ACME's low above its high on the last date.
    let min = fs::read_to_string(dir.path().join("MIN.csv")).unwrap();
    let patched: Vec<String> = min
        .lines()
        .map(|line| {
            if line.starts_with("2021-06-02;") {
                let fields: Vec<&str> = line.split(';').collect();
                format!("{};10000;{}", fields[0], fields[2])
            } else {
                line.to_string()
            }
        })
        .collect();
    fs::write(dir.path().join("MIN.csv"), patched.join("\n") + "\n").unwrap();

    let t = session(&dir).technical("ACME").unwrap();
    assert_eq!(t.excluded_rows(), 1);
    assert_eq!(t.frame.len(), 149);
}

#[test]
fn workbook_loads_every_csv() {
    let dir = workbook_dir();
    let wb = Workbook::open(dir.path()).unwrap();
    assert_eq!(wb.len(), 10);
    assert!(wb.has_sheet("Profil 1"));
}
