//! Input loading for `dprv validate`: section files, facts, and metrics.

use std::path::Path;

use anyhow::{Context, bail};
use dpr_core::{FinancialMetrics, ProjectFacts, SectionType};
use dpr_engine::{ValidationRequest, extract, fixtures};
use serde::de::DeserializeOwned;

/// File holding a section inside the input directory.
#[must_use]
pub const fn section_file(section: SectionType) -> &'static str {
    match section {
        SectionType::ExecutiveSummary => "01_executive_summary.md",
        SectionType::FinancialPlan => "03_financial_plan.md",
        SectionType::TechnicalFeasibility => "06_technical_feasibility.md",
    }
}

/// Load one request per available section file under `dir`.
///
/// Missing or unreadable files are skipped with a warning. Text before the first
/// recognised heading is dropped.
///
/// # Errors
///
/// Fails when `dir` is not a directory or none of the requested files could be read.
pub fn load_sections(
    dir: &Path,
    sections: &[SectionType],
    facts: &ProjectFacts,
    metrics: Option<FinancialMetrics>,
) -> anyhow::Result<Vec<ValidationRequest>> {
    if !dir.is_dir() {
        bail!("input directory '{}' does not exist", dir.display());
    }

    let mut requests = Vec::with_capacity(sections.len());
    for &section in sections {
        let path = dir.join(section_file(section));
        if !path.exists() {
            tracing::warn!(section = %section, path = %path.display(), "section file missing; skipping");
            continue;
        }
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(section = %section, path = %path.display(), %error, "section file unreadable; skipping");
                continue;
            }
        };
        requests.push(ValidationRequest::new(
            section,
            extract::strip_preamble(&text),
            facts.clone(),
            metrics,
        ));
    }

    if requests.is_empty() {
        bail!("no readable section files found in '{}'", dir.display());
    }
    Ok(requests)
}

/// Built-in mock sections restricted to `sections`.
#[must_use]
pub fn mock_sections(sections: &[SectionType]) -> Vec<ValidationRequest> {
    fixtures::mock_requests()
        .into_iter()
        .filter(|request| sections.contains(&request.section_type))
        .collect()
}

/// Read a TOML or JSON record, chosen by file extension.
///
/// # Errors
///
/// Fails on an unreadable file, an unsupported extension, or malformed content.
pub fn load_record<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
        }
        Some("json") => {
            serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
        }
        _ => bail!(
            "unsupported file type for {} (expected .toml or .json)",
            path.display()
        ),
    }
}

/// First non-empty of an explicit flag and a configured path.
#[must_use]
pub fn pick_path<'a>(flag: Option<&'a str>, configured: &'a str) -> Option<&'a Path> {
    flag.or_else(|| Some(configured).filter(|path| !path.trim().is_empty()))
        .map(Path::new)
}

/// Facts from `path`, or the sample project facts when no file is given.
///
/// # Errors
///
/// Propagates [`load_record`] failures.
pub fn load_facts(path: Option<&Path>) -> anyhow::Result<ProjectFacts> {
    path.map_or_else(|| Ok(fixtures::sample_facts()), load_record)
}

/// Metrics from `path`, or none when no file is given.
///
/// # Errors
///
/// Propagates [`load_record`] failures.
pub fn load_metrics(path: Option<&Path>) -> anyhow::Result<Option<FinancialMetrics>> {
    path.map(load_record).transpose()
}
