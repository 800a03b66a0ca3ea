//! Signalboard CLI: inspect workbooks, analyze a security, scan all securities.
//!
//! Commands:
//! - `sheets`: list the workbook's sheets with their sizes
//! - `show`: print the first rows of one sheet
//! - `securities`: list the securities of the workbook
//! - `analyze`: full report for one security, as text or JSON
//! - `scan`: Buy/Sell/Neutral tally for every security, computed in parallel

mod render;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use signalboard_core::domain::{Action, SignalSummary};
use signalboard_core::{AnalysisConfig, AnalysisSession, Workbook};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "signalboard",
    about = "Signalboard: technical and fundamental dashboard over a spreadsheet workbook"
)]
struct Cli {
    /// Also write log events to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List sheet names with row and column counts.
    Sheets {
        /// Workbook directory (one CSV file per sheet).
        dir: PathBuf,
    },
    /// Print the first rows of a sheet.
    Show {
        dir: PathBuf,

        #[arg(long)]
        sheet: String,

        /// Number of data rows to print.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// List securities (headers of the securities sheet).
    Securities {
        dir: PathBuf,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Analyze one security.
    Analyze {
        dir: PathBuf,

        #[arg(long)]
        security: String,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Technical analysis start date (YYYY-MM-DD), overrides the config.
        #[arg(long)]
        since: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the report to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Tally technical signals for every security.
    Scan {
        dir: PathBuf,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Technical analysis start date (YYYY-MM-DD), overrides the config.
        #[arg(long)]
        since: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file)?;

    match cli.command {
        Commands::Sheets { dir } => run_sheets(&dir),
        Commands::Show { dir, sheet, limit } => run_show(&dir, &sheet, limit),
        Commands::Securities { dir, config } => run_securities(&dir, config.as_deref()),
        Commands::Analyze {
            dir,
            security,
            config,
            since,
            format,
            output,
        } => run_analyze(
            &dir,
            &security,
            config.as_deref(),
            since.as_deref(),
            format,
            output.as_deref(),
        ),
        Commands::Scan {
            dir,
            config,
            since,
            format,
        } => run_scan(&dir, config.as_deref(), since.as_deref(), format),
    }
}

/// Log to stderr (stdout carries reports) and optionally to a file.
fn init_tracing(log_file: Option<PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|err| anyhow!("failed to create log directory {parent:?}: {err}"))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| anyhow!("failed to open log file {path:?}: {err}"))?;
        let (non_blocking_writer, guard) = non_blocking(file);
        // The writer flushes on guard drop; keep it for the whole process.
        let _guard = Box::leak(Box::new(guard));
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking_writer);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init()
            .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
    }
}

fn load_config(path: Option<&Path>, since: Option<&str>) -> Result<AnalysisConfig> {
    let mut config = match path {
        Some(p) => AnalysisConfig::from_file(p)
            .with_context(|| format!("loading config {}", p.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(s) = since {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --since date '{s}', expected YYYY-MM-DD"))?;
        config.periods.technical_since = Some(date);
    }
    Ok(config)
}

fn open_session(dir: &Path, config: AnalysisConfig) -> Result<AnalysisSession> {
    AnalysisSession::open(dir, config)
        .with_context(|| format!("loading workbook {}", dir.display()))
}

fn run_sheets(dir: &Path) -> Result<()> {
    let workbook =
        Workbook::open(dir).with_context(|| format!("loading workbook {}", dir.display()))?;

    println!("Workbook: {}", dir.display());
    println!("Fingerprint: {}", workbook.fingerprint().short());
    println!();
    println!("{:<24} {:>8} {:>8}", "Sheet", "Rows", "Columns");
    println!("{}", "-".repeat(42));
    for sheet in workbook.sheets() {
        println!(
            "{:<24} {:>8} {:>8}",
            sheet.name(),
            sheet.row_count(),
            sheet.width()
        );
    }
    Ok(())
}

fn run_show(dir: &Path, sheet_name: &str, limit: usize) -> Result<()> {
    let workbook =
        Workbook::open(dir).with_context(|| format!("loading workbook {}", dir.display()))?;
    let sheet = workbook.sheet(sheet_name)?;

    println!("{}", sheet.headers().join(" | "));
    for row in sheet.data_rows().iter().take(limit) {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("{}", cells.join(" | "));
    }
    let remaining = sheet.data_rows().len().saturating_sub(limit);
    if remaining > 0 {
        println!("... {remaining} more rows");
    }
    Ok(())
}

fn run_securities(dir: &Path, config: Option<&Path>) -> Result<()> {
    let session = open_session(dir, load_config(config, None)?)?;
    for security in session.securities()? {
        println!("{security}");
    }
    Ok(())
}

fn run_analyze(
    dir: &Path,
    security: &str,
    config: Option<&Path>,
    since: Option<&str>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let session = open_session(dir, load_config(config, since)?)?;
    let report = session.analyze(security);

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Text => render::report_text(&report, session.config().display.language),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
            println!("Report saved to: {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_scan(
    dir: &Path,
    config: Option<&Path>,
    since: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let session = open_session(dir, load_config(config, since)?)?;
    let securities = session.securities()?;
    info!(securities = securities.len(), "scan started");

    let rows: Vec<ScanRow> = securities
        .par_iter()
        .map(|security| ScanRow {
            security: security.clone(),
            result: session.summary(security).map_err(|e| e.to_string()),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| match &row.result {
                    Ok(summary) => serde_json::json!({
                        "security": row.security,
                        "summary": summary,
                        "consensus": summary.consensus(),
                    }),
                    Err(err) => serde_json::json!({
                        "security": row.security,
                        "error": err,
                    }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            let language = session.config().display.language;
            println!(
                "{:<16} {:>5} {:>5} {:>8}  {}",
                "Security", "Buy", "Sell", "Neutral", "Consensus"
            );
            println!("{}", "-".repeat(50));
            for row in &rows {
                match &row.result {
                    Ok(s) => println!(
                        "{:<16} {:>5} {:>5} {:>8}  {}",
                        row.security,
                        s.buy,
                        s.sell,
                        s.neutral,
                        s.consensus().label(language)
                    ),
                    Err(err) => println!("{:<16} error: {err}", row.security),
                }
            }
            let buys = rows
                .iter()
                .filter(|r| matches!(&r.result, Ok(s) if s.consensus() == Action::Buy))
                .count();
            println!();
            println!("{} securities, {} with a Buy consensus", rows.len(), buys);
        }
    }
    Ok(())
}

struct ScanRow {
    security: String,
    result: std::result::Result<SignalSummary, String>,
}
