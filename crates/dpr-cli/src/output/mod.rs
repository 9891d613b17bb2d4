use std::collections::BTreeMap;
use std::io::IsTerminal;

use dpr_core::ValidationReport;
use dpr_engine::{ReportFormat, SummaryRow, average_score, summary_rows};
use serde::Serialize;

use crate::cli::OutputFormat;

pub mod table;

/// Table layout for stdout: colored on a terminal unless `NO_COLOR` is set,
/// narrowed to `COLUMNS` when present.
#[must_use]
pub fn table_options() -> table::TableOptions {
    table::TableOptions {
        max_width: std::env::var("COLUMNS").ok().and_then(|v| v.parse().ok()),
        color: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Print rendered output.
pub fn output(rendered: &str) {
    println!("{rendered}");
}

#[derive(Serialize)]
struct ValidationOutput<'a> {
    reports: &'a BTreeMap<String, ValidationReport>,
    summary: Vec<SummaryRow>,
    average_score: Option<f64>,
}

/// Render validation results: the per-section reports, then the cumulative summary.
pub fn render_validation(
    reports: &BTreeMap<String, ValidationReport>,
    format: OutputFormat,
    options: table::TableOptions,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ValidationOutput {
            reports,
            summary: summary_rows(reports),
            average_score: average_score(reports),
        })?),
        OutputFormat::Narrative => {
            let mut out = dpr_engine::render(reports, ReportFormat::Narrative)?;
            out.push_str("## Summary\n\n");
            out.push_str(&summary(reports, options));
            Ok(out)
        }
        OutputFormat::Table => Ok(summary(reports, options)),
    }
}

/// Summary table followed by the average score line.
#[must_use]
pub fn summary(reports: &BTreeMap<String, ValidationReport>, options: table::TableOptions) -> String {
    let rows: Vec<Vec<String>> = summary_rows(reports)
        .into_iter()
        .map(|row| {
            vec![
                row.section,
                format!("{:.1}", row.score),
                row.grade.to_string(),
                row.status.to_string(),
                if row.ready { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    let table = table::render_table(
        &["section", "score", "grade", "status", "ready"],
        &rows,
        options,
    );

    match average_score(reports) {
        Some(average) => format!(
            "{table}\n\nAverage score: {average:.1}/100 across {} section(s)",
            reports.len()
        ),
        None => String::from("(no sections validated)"),
    }
}
