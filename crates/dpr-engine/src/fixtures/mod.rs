//! Built-in sample inputs for regression runs (`dprv validate --source mock`) and tests.
//!
//! The sample project is a Printing Industry cluster in Tirupati applying for an
//! MSE-CDP grant. The well-formed texts are expected to clear the readiness
//! threshold with these facts and metrics; the poor and missing-section texts are not.

use dpr_core::{FinancialMetrics, ProjectFacts, SectionType};

use crate::engine::ValidationRequest;

pub const EXECUTIVE_SUMMARY_GOOD: &str = include_str!("executive_summary_good.md");
pub const EXECUTIVE_SUMMARY_POOR: &str = include_str!("executive_summary_poor.md");
pub const EXECUTIVE_SUMMARY_MISSING: &str = include_str!("executive_summary_missing.md");
pub const FINANCIAL_PLAN_GOOD: &str = include_str!("financial_plan_good.md");
pub const TECHNICAL_FEASIBILITY_GOOD: &str = include_str!("technical_feasibility_good.md");

#[must_use]
pub fn sample_facts() -> ProjectFacts {
    ProjectFacts {
        cluster_type: Some("Printing Industry".into()),
        location: Some("Tirupati, Andhra Pradesh".into()),
        members: Some(50),
        project_cost: Some(82_000_000.0),
        facility_type: Some("Digital Printing Equipment".into()),
        grant_scheme: Some("MSE-CDP".into()),
        subsidy_range: Some("60-80%".into()),
    }
}

#[must_use]
pub const fn sample_metrics() -> FinancialMetrics {
    FinancialMetrics {
        npv: Some(28_700_000.0),
        irr: Some(15.5),
        dscr: Some(3.5),
        breakeven_pct: Some(45.0),
        payback_years: Some(4.5),
        grant_percentage: Some(70.0),
    }
}

/// Every mock section, named `mock_<section>_<variant>`.
#[must_use]
pub fn mock_requests() -> Vec<ValidationRequest> {
    let sections = [
        (SectionType::ExecutiveSummary, "good", EXECUTIVE_SUMMARY_GOOD),
        (SectionType::ExecutiveSummary, "poor", EXECUTIVE_SUMMARY_POOR),
        (SectionType::ExecutiveSummary, "missing", EXECUTIVE_SUMMARY_MISSING),
        (SectionType::FinancialPlan, "good", FINANCIAL_PLAN_GOOD),
        (SectionType::TechnicalFeasibility, "good", TECHNICAL_FEASIBILITY_GOOD),
    ];
    sections
        .into_iter()
        .map(|(section, variant, text)| {
            ValidationRequest::new(section, text, sample_facts(), Some(sample_metrics()))
                .named(format!("mock_{}_{variant}", section.as_str()))
        })
        .collect()
}
