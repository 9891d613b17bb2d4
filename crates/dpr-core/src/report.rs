//! Check, tier, and section report types.
//!
//! `CheckResult -> TierResult -> ValidationReport` are built once per validation
//! call, fully populated at construction, and never mutated afterwards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{
    AggregationPolicy, CheckOutcome, Grade, SectionType, Severity, SubmissionStatus, Tier,
};

/// Minimum overall score for a section to be ready for submission.
pub const READY_THRESHOLD: f64 = 80.0;

/// Percentage assigned to a tier with no registered checks (vacuously satisfied).
pub const VACUOUS_TIER_PERCENTAGE: f64 = 100.0;

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckResult {
    pub check_id: String,
    pub name: String,
    pub tier: Tier,
    pub severity: Severity,
    pub outcome: CheckOutcome,
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    #[must_use]
    pub fn new(
        check_id: impl Into<String>,
        name: impl Into<String>,
        tier: Tier,
        severity: Severity,
        outcome: CheckOutcome,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            name: name.into(),
            tier,
            severity,
            outcome,
            passed: outcome.passed(),
            message: message.into(),
        }
    }

    /// A failed check that should surface as a top-level issue.
    #[must_use]
    pub const fn is_blocking_failure(&self) -> bool {
        !self.passed && self.severity.is_blocking()
    }
}

/// Aggregated result of one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TierResult {
    pub name: Tier,
    pub percentage: f64,
    pub passed: usize,
    pub total: usize,
    pub checks: Vec<CheckResult>,
}

impl TierResult {
    /// Build a tier result, computing the passed tally and percentage.
    ///
    /// A tier without checks resolves to [`VACUOUS_TIER_PERCENTAGE`].
    #[must_use]
    pub fn from_checks(name: Tier, checks: Vec<CheckResult>) -> Self {
        let total = checks.len();
        let passed = checks.iter().filter(|check| check.passed).count();
        let percentage = if total == 0 {
            VACUOUS_TIER_PERCENTAGE
        } else {
            ratio_percentage(passed, total)
        };
        Self {
            name,
            percentage,
            passed,
            total,
            checks,
        }
    }

    #[must_use]
    pub const fn failed(&self) -> usize {
        self.total - self.passed
    }
}

/// `passed / total * 100` for non-zero `total`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio_percentage(passed: usize, total: usize) -> f64 {
    passed as f64 / total as f64 * 100.0
}

/// Validation outcome for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub section_name: String,
    pub section_type: SectionType,
    pub policy: AggregationPolicy,
    pub overall_score: f64,
    pub grade: Grade,
    pub status: SubmissionStatus,
    pub ready_for_submission: bool,
    pub tiers: Vec<TierResult>,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationReport {
    /// Look up a tier result by name.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> Option<&TierResult> {
        self.tiers.iter().find(|result| result.name == tier)
    }

    /// Look up a check result by id across all tiers.
    #[must_use]
    pub fn check(&self, check_id: &str) -> Option<&CheckResult> {
        self.tiers
            .iter()
            .flat_map(|tier| tier.checks.iter())
            .find(|check| check.check_id == check_id)
    }
}
