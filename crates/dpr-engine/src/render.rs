//! Report rendering: structured JSON and a markdown narrative.
//!
//! Input is a `BTreeMap`, so sections always render in name order and identical
//! reports produce byte-identical output.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use dpr_core::{Grade, SubmissionStatus, ValidationReport};
use serde::Serialize;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON mirroring the report model.
    Structured,
    /// Markdown for people.
    Narrative,
}

/// Render a set of section reports.
///
/// # Errors
///
/// Returns [`EngineError::Serialize`] if JSON serialization fails.
pub fn render(
    reports: &BTreeMap<String, ValidationReport>,
    format: ReportFormat,
) -> Result<String, EngineError> {
    match format {
        ReportFormat::Structured => Ok(serde_json::to_string_pretty(reports)?),
        ReportFormat::Narrative => Ok(narrative(reports)),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn section_title(report: &ValidationReport) -> String {
    let title = report.section_type.display_name();
    if report.section_name == report.section_type.as_str() {
        title.to_string()
    } else {
        format!("{title} ({})", report.section_name)
    }
}

fn enumerate(out: &mut String, heading: &str, items: &[String]) {
    let _ = writeln!(out, "### {heading}\n");
    if items.is_empty() {
        out.push_str("None.\n");
    }
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. {item}", index + 1);
    }
    out.push('\n');
}

fn narrative(reports: &BTreeMap<String, ValidationReport>) -> String {
    let mut out = String::from("# DPR Validation Report\n\n");

    for report in reports.values() {
        let _ = writeln!(out, "## {}\n", section_title(report));
        let _ = writeln!(
            out,
            "Overall: {:.1}/100 | Grade: {} | Status: {} | Ready for submission: {}",
            report.overall_score,
            report.grade,
            report.status,
            yes_no(report.ready_for_submission)
        );
        let _ = writeln!(out, "Policy: {}\n", report.policy);

        for tier in &report.tiers {
            let _ = writeln!(
                out,
                "- {}: {:.1}% ({}/{})",
                tier.name.label(),
                tier.percentage,
                tier.passed,
                tier.total
            );
        }
        out.push('\n');

        enumerate(&mut out, "Issues", &report.issues);
        enumerate(&mut out, "Suggestions", &report.suggestions);
        out.push_str("---\n\n");
    }

    out
}

/// One line of the cumulative summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub section: String,
    pub score: f64,
    pub grade: Grade,
    pub status: SubmissionStatus,
    pub ready: bool,
}

/// Summary rows in section-name order.
#[must_use]
pub fn summary_rows(reports: &BTreeMap<String, ValidationReport>) -> Vec<SummaryRow> {
    reports
        .values()
        .map(|report| SummaryRow {
            section: report.section_name.clone(),
            score: report.overall_score,
            grade: report.grade,
            status: report.status,
            ready: report.ready_for_submission,
        })
        .collect()
}

/// Mean overall score, or `None` when there are no reports.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_score(reports: &BTreeMap<String, ValidationReport>) -> Option<f64> {
    if reports.is_empty() {
        return None;
    }
    let total: f64 = reports.values().map(|report| report.overall_score).sum();
    Some(total / reports.len() as f64)
}

#[cfg(test)]
mod tests {
    use dpr_core::{
        AggregationPolicy, CheckOutcome, CheckResult, SectionType, Severity, Tier, TierResult,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn report(name: &str, score: f64, issues: &[&str]) -> ValidationReport {
        let checks = vec![CheckResult::new(
            "S1.1",
            "Heading",
            Tier::Structure,
            Severity::Critical,
            CheckOutcome::Pass,
            "ok",
        )];
        ValidationReport {
            section_name: name.to_string(),
            section_type: SectionType::ExecutiveSummary,
            policy: AggregationPolicy::WeightedTier,
            overall_score: score,
            grade: Grade::from_score(score),
            status: SubmissionStatus::from_score(score),
            ready_for_submission: score >= 80.0,
            tiers: vec![TierResult::from_checks(Tier::Structure, checks)],
            issues: issues.iter().map(ToString::to_string).collect(),
            suggestions: issues.iter().map(|issue| format!("fix {issue}")).collect(),
        }
    }

    #[test]
    fn narrative_layout() {
        let reports = BTreeMap::from([(
            "executive_summary".to_string(),
            report("executive_summary", 87.5, &["[S1.2] missing"]),
        )]);
        let text = render(&reports, ReportFormat::Narrative).unwrap();
        let expected = "\
# DPR Validation Report

## Executive Summary

Overall: 87.5/100 | Grade: A- | Status: PASS | Ready for submission: yes
Policy: weighted_tier

- Structure: 100.0% (1/1)

### Issues

1. [S1.2] missing

### Suggestions

1. fix [S1.2] missing

---

";
        assert_eq!(text, expected);
    }

    #[test]
    fn narrative_names_non_canonical_sections() {
        let reports = BTreeMap::from([("mock_poor".to_string(), report("mock_poor", 40.0, &[]))]);
        let text = render(&reports, ReportFormat::Narrative).unwrap();
        assert!(text.contains("## Executive Summary (mock_poor)"));
        assert!(text.contains("Ready for submission: no"));
        assert!(text.contains("### Issues\n\nNone.\n"));
    }

    #[test]
    fn structured_round_trips() {
        let reports = BTreeMap::from([("a".to_string(), report("a", 90.0, &[]))]);
        let json = render(&reports, ReportFormat::Structured).unwrap();
        let back: BTreeMap<String, ValidationReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reports);
        assert!(json.contains("\"overall_score\": 90.0"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let reports = BTreeMap::from([
            ("b".to_string(), report("b", 70.0, &["x"])),
            ("a".to_string(), report("a", 95.0, &[])),
        ]);
        for format in [ReportFormat::Structured, ReportFormat::Narrative] {
            assert_eq!(render(&reports, format).unwrap(), render(&reports.clone(), format).unwrap());
        }
    }

    #[test]
    fn summary_and_average() {
        let reports = BTreeMap::from([
            ("b".to_string(), report("b", 70.0, &[])),
            ("a".to_string(), report("a", 90.0, &[])),
        ]);
        let rows = summary_rows(&reports);
        assert_eq!(rows[0].section, "a");
        assert!(rows[0].ready);
        assert_eq!(rows[1].grade, Grade::BMinus);
        assert_eq!(average_score(&reports), Some(80.0));
        assert_eq!(average_score(&BTreeMap::new()), None);
    }
}
