//! End-to-end validation scenarios over the built-in fixtures.

use std::sync::Arc;

use dpr_config::ScoringConfig;
use dpr_core::{
    AggregationPolicy, CheckOutcome, FinancialMetrics, Grade, PolicyBounds, ProjectFacts,
    READY_THRESHOLD, SectionType, Severity, Tier, ValidationReport,
};
use dpr_engine::{
    CheckCatalog, OracleError, OracleRequest, OracleSettings, OracleVerdict, ReportFormat,
    SemanticOracle, ValidationRequest, Validator, checks, fixtures, render,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn request(section: SectionType, text: &str, metrics: Option<FinancialMetrics>) -> ValidationRequest {
    ValidationRequest::new(section, text, fixtures::sample_facts(), metrics)
}

async fn validate(request: &ValidationRequest) -> ValidationReport {
    Validator::standard().validate(request).await
}

fn outcome(report: &ValidationReport, id: &str) -> CheckOutcome {
    report
        .check(id)
        .unwrap_or_else(|| panic!("{id} missing from report"))
        .outcome
}

#[tokio::test]
async fn missing_subsections_fail_every_presence_check() {
    let text = "# EXECUTIVE SUMMARY\n\nThe CFC project for the cluster is described here in prose only.";
    let report = validate(&request(SectionType::ExecutiveSummary, text, None)).await;

    for id in ["S1.2", "S1.3", "S1.4", "S1.5", "S1.6"] {
        assert_eq!(outcome(&report, id), CheckOutcome::Fail, "{id}");
    }
    assert_eq!(outcome(&report, "S1.1"), CheckOutcome::Pass);
    assert!(report.overall_score < READY_THRESHOLD);
    assert!(!report.ready_for_submission);
    assert!(report.issues.iter().any(|issue| issue.starts_with("[S1.4]")));
}

#[tokio::test]
async fn metrics_within_bounds_pass_numeric_compliance() {
    let metrics = FinancialMetrics {
        npv: Some(28_700_000.0),
        irr: Some(15.5),
        dscr: Some(3.5),
        breakeven_pct: Some(45.0),
        ..FinancialMetrics::default()
    };
    let report = validate(&request(
        SectionType::FinancialPlan,
        fixtures::FINANCIAL_PLAN_GOOD,
        Some(metrics),
    ))
    .await;

    for id in ["CP2.3", "CP2.4", "CP2.5", "CP2.6"] {
        assert_eq!(outcome(&report, id), CheckOutcome::Pass, "{id}");
    }
}

#[tokio::test]
async fn mentioning_dscr_is_not_enough() {
    let metrics = FinancialMetrics {
        dscr: Some(2.0),
        ..FinancialMetrics::default()
    };
    let text = "# FINANCIAL PLAN\n\n## Debt Service Analysis\n\nThe DSCR is comfortable.";
    let report = validate(&request(SectionType::FinancialPlan, text, Some(metrics))).await;

    let dscr = report.check("CP2.3").expect("dscr check present");
    assert_eq!(dscr.outcome, CheckOutcome::Fail);
    assert!(dscr.message.contains("does not meet"), "{}", dscr.message);
    assert!(report.issues.iter().any(|issue| issue.starts_with("[CP2.3]")));
}

#[tokio::test]
async fn absent_metrics_fail_with_explanation() {
    let report = validate(&request(SectionType::FinancialPlan, fixtures::FINANCIAL_PLAN_GOOD, None)).await;
    let npv = report.check("CP2.5").expect("npv check present");
    assert_eq!(npv.outcome, CheckOutcome::Fail);
    assert_eq!(npv.message, "NPV not available");
}

#[tokio::test]
async fn tier_without_checks_is_vacuous() {
    let mut catalog = CheckCatalog::empty();
    for definition in checks::definitions(SectionType::ExecutiveSummary) {
        if definition.tier != Tier::Quality {
            catalog.register(SectionType::ExecutiveSummary, definition);
        }
    }
    let validator = Validator::new(catalog, ScoringConfig::default(), PolicyBounds::default());
    let report = validator
        .validate(&request(
            SectionType::ExecutiveSummary,
            fixtures::EXECUTIVE_SUMMARY_POOR,
            None,
        ))
        .await;

    let quality = report.tier(Tier::Quality).expect("quality tier present");
    assert_eq!(quality.total, 0);
    assert_eq!(quality.percentage, 100.0);
    assert!((0.0..=100.0).contains(&report.overall_score));
}

#[tokio::test]
async fn identical_input_gives_identical_report() {
    let validator = Validator::standard();
    let requests = fixtures::mock_requests();

    let first = validator.validate_all(&requests).await;
    let second = validator.validate_all(&requests).await;
    assert_eq!(first, second);

    for format in [ReportFormat::Structured, ReportFormat::Narrative] {
        assert_eq!(render(&first, format).unwrap(), render(&second, format).unwrap());
    }
}

#[rstest]
#[case(SectionType::ExecutiveSummary, fixtures::EXECUTIVE_SUMMARY_GOOD)]
#[case(SectionType::FinancialPlan, fixtures::FINANCIAL_PLAN_GOOD)]
#[case(SectionType::TechnicalFeasibility, fixtures::TECHNICAL_FEASIBILITY_GOOD)]
#[tokio::test]
async fn well_formed_sections_are_ready(#[case] section: SectionType, #[case] text: &str) {
    let report = validate(&request(section, text, Some(fixtures::sample_metrics()))).await;
    assert!(report.ready_for_submission, "{section}: {:?}", report.issues);
    assert!(report.issues.is_empty(), "{section}: {:?}", report.issues);
}

#[rstest]
#[case(fixtures::EXECUTIVE_SUMMARY_POOR)]
#[case(fixtures::EXECUTIVE_SUMMARY_MISSING)]
#[tokio::test]
async fn deficient_summaries_are_not_ready(#[case] text: &str) {
    let report = validate(&request(
        SectionType::ExecutiveSummary,
        text,
        Some(fixtures::sample_metrics()),
    ))
    .await;
    assert!(!report.ready_for_submission);
    assert!(report.overall_score < READY_THRESHOLD);
}

#[tokio::test]
async fn poor_summary_flags_tone_and_placeholders() {
    let report = validate(&request(
        SectionType::ExecutiveSummary,
        fixtures::EXECUTIVE_SUMMARY_POOR,
        None,
    ))
    .await;
    assert_eq!(outcome(&report, "C1.6"), CheckOutcome::Fail);
    assert_eq!(outcome(&report, "Q1.6"), CheckOutcome::Fail);
}

#[tokio::test]
async fn reports_hold_their_invariants() {
    let reports = Validator::standard()
        .validate_all(&fixtures::mock_requests())
        .await;
    assert_eq!(reports.len(), fixtures::mock_requests().len());

    for report in reports.values() {
        assert!((0.0..=100.0).contains(&report.overall_score));
        assert_eq!(report.ready_for_submission, report.overall_score >= READY_THRESHOLD);
        assert_eq!(report.grade, Grade::from_score(report.overall_score));
        assert_eq!(report.issues.len(), report.suggestions.len());
        assert_eq!(report.tiers.len(), Tier::ALL.len());

        let blocking = report
            .tiers
            .iter()
            .flat_map(|tier| &tier.checks)
            .filter(|check| check.outcome == CheckOutcome::Fail && check.severity.is_blocking())
            .count();
        assert_eq!(report.issues.len(), blocking, "{}", report.section_name);
        for tier in &report.tiers {
            assert_eq!(tier.passed + tier.failed(), tier.total);
        }
    }
}

#[tokio::test]
async fn empty_facts_never_panic() {
    let validator = Validator::standard();
    for section in SectionType::ALL {
        let request = ValidationRequest::new(section, "", ProjectFacts::default(), None);
        let report = validator.validate(&request).await;
        assert!(report.overall_score < READY_THRESHOLD);
    }
}

#[tokio::test]
async fn policies_diverge_by_section_type() {
    let reports = Validator::standard()
        .validate_all(&fixtures::mock_requests())
        .await;
    assert_eq!(
        reports["mock_executive_summary_good"].policy,
        AggregationPolicy::WeightedTier
    );
    assert_eq!(reports["mock_financial_plan_good"].policy, AggregationPolicy::FlatCheck);
    assert_eq!(
        reports["mock_technical_feasibility_good"].policy,
        AggregationPolicy::FlatCheck
    );
}

struct Rejecting;

impl SemanticOracle for Rejecting {
    fn judge(&self, _: OracleRequest) -> BoxFuture<'_, Result<OracleVerdict, OracleError>> {
        async {
            Ok(OracleVerdict {
                pass: false,
                reason: "too thin".into(),
            })
        }
        .boxed()
    }
}

#[tokio::test]
async fn oracle_verdicts_reach_the_report() {
    let validator = Validator::standard().with_oracle(Arc::new(Rejecting), OracleSettings::default());
    let report = validator
        .validate(&request(
            SectionType::ExecutiveSummary,
            fixtures::EXECUTIVE_SUMMARY_GOOD,
            Some(fixtures::sample_metrics()),
        ))
        .await;

    let profile = report.check("C1.2").expect("oracle check present");
    assert_eq!(profile.outcome, CheckOutcome::Fail);
    assert_eq!(profile.message, "Cluster Profile: too thin");
    assert_eq!(profile.severity, Severity::Medium);
    // Medium severity lowers the score without raising an issue.
    assert!(report.overall_score < 100.0);
    assert!(report.issues.is_empty());
}

#[tokio::test]
async fn identical_input_with_fixed_oracle_gives_identical_report() {
    let validator = Validator::standard().with_oracle(Arc::new(Rejecting), OracleSettings::default());
    let requests = fixtures::mock_requests();

    let first = validator.validate_all(&requests).await;
    let second = validator.validate_all(&requests).await;
    assert_eq!(first, second);
    assert_eq!(
        outcome(&first["mock_executive_summary_good"], "C1.2"),
        CheckOutcome::Fail
    );

    for format in [ReportFormat::Structured, ReportFormat::Narrative] {
        assert_eq!(render(&first, format).unwrap(), render(&second, format).unwrap());
    }
}

#[tokio::test]
async fn stray_bold_line_does_not_replace_expected_impact() {
    let text = fixtures::EXECUTIVE_SUMMARY_GOOD.replacen(
        "## Financial Highlights",
        "**Impact of past neglect:**\nUnits lost export orders for a decade.\n\n## Financial Highlights",
        1,
    );
    assert_ne!(text, fixtures::EXECUTIVE_SUMMARY_GOOD);

    let report = validate(&request(
        SectionType::ExecutiveSummary,
        &text,
        Some(fixtures::sample_metrics()),
    ))
    .await;
    assert_eq!(outcome(&report, "S1.5"), CheckOutcome::Pass);
    assert_eq!(outcome(&report, "C1.4"), CheckOutcome::Pass);
}

#[tokio::test]
async fn out_of_range_grant_next_to_scheme_band_fails() {
    let text = fixtures::EXECUTIVE_SUMMARY_GOOD.replacen(
        "a grant of 70% of the eligible project cost",
        "a grant of 90% of the eligible project cost",
        1,
    );
    assert_ne!(text, fixtures::EXECUTIVE_SUMMARY_GOOD);

    let report = validate(&request(SectionType::ExecutiveSummary, &text, None)).await;
    let grant = report.check("CP1.2").expect("grant check present");
    assert_eq!(grant.outcome, CheckOutcome::Fail);
    assert_eq!(grant.message, "Grant percentage 90% outside 60-80%");
    assert!(report.issues.iter().any(|issue| issue.starts_with("[CP1.2]")));
}

#[tokio::test]
async fn without_oracle_adequacy_is_indeterminate() {
    let report = validate(&request(
        SectionType::TechnicalFeasibility,
        fixtures::TECHNICAL_FEASIBILITY_GOOD,
        Some(fixtures::sample_metrics()),
    ))
    .await;
    let check = report.check("C3.7").expect("oracle check present");
    assert_eq!(check.outcome, CheckOutcome::Indeterminate);
    assert!(check.passed);
}
