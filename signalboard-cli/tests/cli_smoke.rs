use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::tempdir;

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root")
        .to_path_buf()
}

fn signalboard() -> Command {
    if let Some(bin) = option_env!("CARGO_BIN_EXE_signalboard") {
        Command::new(bin)
    } else {
        let mut cmd = Command::new("cargo");
        cmd.args(["run", "-q", "-p", "signalboard-cli", "--"]);
        cmd
    }
}

fn run(args: &[&str]) -> Output {
    signalboard()
        .args(args)
        .current_dir(workspace_root())
        .output()
        .expect("failed to spawn signalboard")
}

/// Small workbook: 60 days of quotes for ACME, newest first, plus a valuation sheet.
fn write_workbook(dir: &Path) {
    let mut close = String::from("Date;ACME\n");
    let mut open = String::from("Date;ACME\n");
    let mut high = String::from("Date;ACME\n");
    let mut low = String::from("Date;ACME\n");
    let start = chrono::NaiveDate::from_ymd_opt(2021, 3, 1).expect("date");
    for i in (0..60).rev() {
        let date = start + chrono::Duration::days(i);
        let price = 50.0 + i as f64;
        close.push_str(&format!("{date};{price}\n"));
        open.push_str(&format!("{date};{price}\n"));
        high.push_str(&format!("{date};{}\n", price + 1.0));
        low.push_str(&format!("{date};{}\n", price - 1.0));
    }
    fs::write(dir.join("COURS.csv"), close).expect("write");
    fs::write(dir.join("OUVERTURE.csv"), open).expect("write");
    fs::write(dir.join("MAX.csv"), high).expect("write");
    fs::write(dir.join("MIN.csv"), low).expect("write");
    fs::write(dir.join("Statistique.csv"), "Méthode;ACME\nDCF;200\nANR;20\n").expect("write");
}

#[test]
fn sheets_lists_workbook() {
    let temp_dir = tempdir().expect("temp dir");
    write_workbook(temp_dir.path());

    let output = run(&["sheets", temp_dir.path().to_str().expect("path")]);
    assert!(output.status.success(), "sheets exited with {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("COURS"));
    assert!(stdout.contains("Statistique"));
}

#[test]
fn securities_lists_headers() {
    let temp_dir = tempdir().expect("temp dir");
    write_workbook(temp_dir.path());

    let output = run(&["securities", temp_dir.path().to_str().expect("path")]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ACME");
}

#[test]
fn analyze_writes_json_report() {
    let temp_dir = tempdir().expect("temp dir");
    write_workbook(temp_dir.path());
    let report_path = temp_dir.path().join("out").join("acme.json");
    fs::create_dir_all(report_path.parent().expect("parent")).expect("mkdir");

    let output = run(&[
        "analyze",
        temp_dir.path().to_str().expect("path"),
        "--security",
        "ACME",
        "--format",
        "json",
        "--output",
        report_path.to_str().expect("report"),
    ]);
    assert!(output.status.success(), "analyze exited with {:?}", output.status);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report written"))
            .expect("valid JSON");
    assert_eq!(report["security"], "ACME");
    assert_eq!(report["technical"]["status"], "ready");
    assert_eq!(
        report["technical"]["data"]["signals"]
            .as_array()
            .expect("signals")
            .len(),
        10
    );
    assert_eq!(report["valuation"]["status"], "ready");
    assert_eq!(report["indices"]["status"], "unavailable");
}

#[test]
fn analyze_text_uses_configured_language() {
    let temp_dir = tempdir().expect("temp dir");
    write_workbook(temp_dir.path());
    let config_path = temp_dir.path().join("signalboard.toml");
    fs::write(&config_path, "[display]\nlanguage = \"fr\"\n").expect("write config");

    let output = run(&[
        "analyze",
        temp_dir.path().to_str().expect("path"),
        "--security",
        "ACME",
        "--config",
        config_path.to_str().expect("config"),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Moyenne Mobile (7)"));
    assert!(stdout.contains("Acheter"));
}

#[test]
fn scan_tallies_every_security() {
    let temp_dir = tempdir().expect("temp dir");
    write_workbook(temp_dir.path());

    let output = run(&[
        "scan",
        temp_dir.path().to_str().expect("path"),
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    let rows: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("scan output is JSON");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["security"], "ACME");
    let summary = &rows[0]["summary"];
    let total = summary["buy"].as_u64().unwrap()
        + summary["sell"].as_u64().unwrap()
        + summary["neutral"].as_u64().unwrap();
    assert_eq!(total, 10);
}

#[test]
fn invalid_since_date_fails() {
    let temp_dir = tempdir().expect("temp dir");
    write_workbook(temp_dir.path());

    let output = run(&[
        "scan",
        temp_dir.path().to_str().expect("path"),
        "--since",
        "01/03/2021",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--since"));
}
