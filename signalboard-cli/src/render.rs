//! Plain-text rendering of a security report.

use signalboard_core::domain::{Action, Language, PriceSeries, Signal};
use signalboard_core::fundamentals::{CompanyProfile, Informations, ShareholderBreakdown};
use signalboard_core::report::{IndicesPanel, TechnicalAnalysis, ValuationPanel};
use signalboard_core::{Panel, SecurityReport};

pub fn report_text(report: &SecurityReport, language: Language) -> String {
    let mut out = Vec::new();
    out.push(format!("Security: {}", report.security));
    out.push(format!("Workbook: {}", report.workbook.short()));

    section(&mut out, "Technical analysis", &report.technical, |out, t| {
        technical(out, t, language)
    });
    section(&mut out, "Volume", &report.volume, volume);
    section(&mut out, "Indices", &report.indices, indices);
    section(&mut out, "Profile", &report.profile, profile);
    section(&mut out, "Informations", &report.informations, informations);
    section(&mut out, "Shareholders", &report.shareholders, shareholders);
    section(&mut out, "Valuation", &report.valuation, |out, v| {
        valuation(out, v, language)
    });

    out.join("\n")
}

fn section<T>(
    out: &mut Vec<String>,
    title: &str,
    panel: &Panel<T>,
    body: impl FnOnce(&mut Vec<String>, &T),
) {
    out.push(String::new());
    out.push(title.to_string());
    out.push("=".repeat(title.chars().count()));
    match panel {
        Panel::Ready(value) => body(out, value),
        Panel::Unavailable(err) => out.push(format!("unavailable: {err}")),
    }
}

fn signal_table(out: &mut Vec<String>, signals: &[Signal], language: Language) {
    out.push(format!("{:<34} {:<34} {}", "Indicator", "Value", "Action"));
    out.push("-".repeat(78));
    for s in signals {
        out.push(format!(
            "{:<34} {:<34} {}",
            s.name,
            s.value.to_string(),
            s.action.label(language)
        ));
    }
}

fn technical(out: &mut Vec<String>, t: &TechnicalAnalysis, language: Language) {
    let (first, last) = match (t.frame.rows.first(), t.frame.rows.last()) {
        (Some(f), Some(l)) => (f.date, l.date),
        _ => return,
    };
    out.push(format!(
        "{} rows from {first} to {last}, last close {:.2}",
        t.frame.len(),
        t.last_price
    ));
    if t.excluded_rows() > 0 {
        out.push(format!(
            "{} rows excluded for inconsistent OHLC",
            t.excluded_rows()
        ));
    }
    out.push(String::new());
    signal_table(out, &t.signals, language);
    out.push(String::new());
    out.push(format!(
        "{}: {}  {}: {}  {}: {}  => {}",
        Action::Buy.label(language),
        t.summary.buy,
        Action::Sell.label(language),
        t.summary.sell,
        Action::Neutral.label(language),
        t.summary.neutral,
        t.summary.consensus().label(language)
    ));
}

fn series_line(series: &PriceSeries) -> String {
    let defined = series.defined_only();
    match (defined.points().first(), defined.last_defined()) {
        (Some(first), Some(last)) => format!(
            "{}: {} points, {} .. {}, last {:.2}",
            series.name(),
            defined.len(),
            first.date,
            last.date,
            last.value.unwrap_or(f64::NAN)
        ),
        _ => format!("{}: no data", series.name()),
    }
}

fn volume(out: &mut Vec<String>, series: &PriceSeries) {
    out.push(series_line(series));
}

fn indices(out: &mut Vec<String>, panel: &IndicesPanel) {
    if panel.indices.is_empty() {
        out.push("no index listed".to_string());
        return;
    }
    out.push(format!("Listed in: {}", panel.indices.join(", ")));
    match &panel.comparison {
        Some(Panel::Ready(c)) => {
            match c.start {
                Some(start) => out.push(format!("Common start: {start}")),
                None => out.push("Common start: none".to_string()),
            }
            out.push(series_line(&c.security));
            for index in &c.indices {
                out.push(series_line(index));
            }
            for missing in &c.missing {
                out.push(format!("{missing}: not in the price sheet"));
            }
        }
        Some(Panel::Unavailable(err)) => out.push(format!("comparison unavailable: {err}")),
        None => {}
    }
}

fn profile(out: &mut Vec<String>, p: &CompanyProfile) {
    if let Some(description) = &p.description {
        out.push(description.clone());
    }
    for field in &p.key_stats {
        out.push(format!("{:<32} {}", field.label, field.value));
    }
}

fn informations(out: &mut Vec<String>, info: &Informations) {
    for field in info.fields() {
        out.push(format!("{:<32} {}", field.label, field.value));
    }
}

fn shareholders(out: &mut Vec<String>, breakdown: &ShareholderBreakdown) {
    for holder in &breakdown.holders {
        out.push(format!("{:<40} {:>7.2}%", holder.name, holder.percentage));
    }
    out.push(format!(
        "{:<40} {:>7.2}%",
        "Total",
        breakdown.total_percentage()
    ));
    for err in &breakdown.rejected {
        out.push(format!("skipped: {err}"));
    }
}

fn valuation(out: &mut Vec<String>, v: &ValuationPanel, language: Language) {
    out.push(format!("Price {:.2} on {}", v.price, v.price_date));
    out.push(String::new());
    signal_table(out, &v.signals, language);
}
