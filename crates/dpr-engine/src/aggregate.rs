//! Aggregation and grading of tier results into a section report.
//!
//! Two scoring formulas coexist and are chosen per section type:
//!
//! ```text
//! weighted_tier  overall = sum(tier.percentage * weight(tier))
//! flat_check     overall = sum(passed) / sum(total) * 100   (100 when no checks)
//! ```
//!
//! Either way the score is clamped to `[0, 100]`, and readiness is
//! `overall >= READY_THRESHOLD` regardless of policy.

use dpr_core::{
    AggregationPolicy, Grade, READY_THRESHOLD, SectionType, SubmissionStatus, TierResult,
    TierWeights, VACUOUS_TIER_PERCENTAGE, ValidationReport, report::ratio_percentage,
};

use crate::catalog::CheckCatalog;

/// Overall score for `tiers` under `policy`, clamped to `[0, 100]`.
#[must_use]
pub fn overall_score(tiers: &[TierResult], policy: AggregationPolicy, weights: &TierWeights) -> f64 {
    let raw = match policy {
        AggregationPolicy::WeightedTier => tiers
            .iter()
            .map(|tier| tier.percentage * weights.weight_for(tier.name))
            .sum(),
        AggregationPolicy::FlatCheck => {
            let passed: usize = tiers.iter().map(|tier| tier.passed).sum();
            let total: usize = tiers.iter().map(|tier| tier.total).sum();
            if total == 0 {
                VACUOUS_TIER_PERCENTAGE
            } else {
                ratio_percentage(passed, total)
            }
        }
    };
    if raw.is_finite() { raw.clamp(0.0, 100.0) } else { 0.0 }
}

/// One issue and one paired suggestion per failed critical/high check, in tier
/// then catalog order.
#[must_use]
pub fn issues_and_suggestions(
    catalog: &CheckCatalog,
    section_type: SectionType,
    tiers: &[TierResult],
) -> (Vec<String>, Vec<String>) {
    tiers
        .iter()
        .flat_map(|tier| tier.checks.iter())
        .filter(|check| check.is_blocking_failure())
        .map(|check| {
            let remediation = catalog
                .checks_for(section_type, check.tier)
                .iter()
                .find(|definition| definition.id == check.check_id)
                .map_or_else(|| format!("Resolve: {}", check.message), |d| d.remediation.to_string());
            (format!("[{}] {}", check.check_id, check.message), remediation)
        })
        .unzip()
}

/// Combine the four tier results into an immutable section report.
#[must_use]
pub fn aggregate(
    catalog: &CheckCatalog,
    section_name: &str,
    section_type: SectionType,
    tiers: Vec<TierResult>,
    policy: AggregationPolicy,
    weights: &TierWeights,
) -> ValidationReport {
    let overall_score = overall_score(&tiers, policy, weights);
    let (issues, suggestions) = issues_and_suggestions(catalog, section_type, &tiers);

    tracing::info!(
        section = section_name,
        %policy,
        score = format_args!("{overall_score:.1}"),
        issues = issues.len(),
        "section scored"
    );

    ValidationReport {
        section_name: section_name.to_string(),
        section_type,
        policy,
        overall_score,
        grade: Grade::from_score(overall_score),
        status: SubmissionStatus::from_score(overall_score),
        ready_for_submission: overall_score >= READY_THRESHOLD,
        tiers,
        issues,
        suggestions,
    }
}
