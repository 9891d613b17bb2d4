//! Section types, tiers, severities, outcomes, grades, and aggregation policies.
//!
//! Enums serialize as `snake_case` except [`Grade`] (letter strings such as `"A-"`)
//! and [`SubmissionStatus`] (`SCREAMING_SNAKE_CASE`), which mirror how grades and
//! statuses are written in reports.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// SectionType
// ---------------------------------------------------------------------------

/// A chapter of the DPR that has a registered check catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    ExecutiveSummary,
    FinancialPlan,
    TechnicalFeasibility,
}

impl SectionType {
    /// Every section type, in document order.
    pub const ALL: [Self; 3] = [
        Self::ExecutiveSummary,
        Self::FinancialPlan,
        Self::TechnicalFeasibility,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executive_summary",
            Self::FinancialPlan => "financial_plan",
            Self::TechnicalFeasibility => "technical_feasibility",
        }
    }

    /// Human-readable title used in narrative reports.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "Executive Summary",
            Self::FinancialPlan => "Financial Plan",
            Self::TechnicalFeasibility => "Technical Feasibility",
        }
    }

    /// Check-id ordinal (`S1.x` for the executive summary, `S2.x` for the financial plan...).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::ExecutiveSummary => 1,
            Self::FinancialPlan => 2,
            Self::TechnicalFeasibility => 3,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownSectionType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// One of the four independent rule groups applied to a section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Structure,
    Content,
    Compliance,
    Quality,
}

impl Tier {
    /// Every tier, in evaluation and reporting order.
    pub const ALL: [Self; 4] = [
        Self::Structure,
        Self::Content,
        Self::Compliance,
        Self::Quality,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Content => "content",
            Self::Compliance => "compliance",
            Self::Quality => "quality",
        }
    }

    /// Capitalised label for narrative output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "Structure",
            Self::Content => "Content",
            Self::Compliance => "Compliance",
            Self::Quality => "Quality",
        }
    }

    /// Check-id prefix (`S`, `C`, `CP`, `Q`).
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Structure => "S",
            Self::Content => "C",
            Self::Compliance => "CP",
            Self::Quality => "Q",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// How much a failed check matters for submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Failures at this severity surface as top-level issues.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckOutcome
// ---------------------------------------------------------------------------

/// Outcome of a single check.
///
/// ```text
/// pass           rule satisfied
/// warn           counted as passed, but outside the ideal band
/// fail           rule not satisfied
/// indeterminate  counted as passed; the check could not be decided (oracle unavailable)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Pass,
    Warn,
    Fail,
    Indeterminate,
}

impl CheckOutcome {
    /// Whether the outcome counts toward the tier's passed tally.
    #[must_use]
    pub const fn passed(self) -> bool {
        !matches!(self, Self::Fail)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warn => "warn",
            Self::Fail => "fail",
            Self::Indeterminate => "indeterminate",
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Fine-grained letter grade (8 passing bands plus F).
///
/// ```text
/// A+ >= 95, A >= 90, A- >= 85, B+ >= 80, B >= 75, B- >= 70, C+ >= 65, C >= 60, F otherwise
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    const BANDS: [(f64, Self); 8] = [
        (95.0, Self::APlus),
        (90.0, Self::A),
        (85.0, Self::AMinus),
        (80.0, Self::BPlus),
        (75.0, Self::B),
        (70.0, Self::BMinus),
        (65.0, Self::CPlus),
        (60.0, Self::C),
    ];

    /// Map an overall score to its grade. NaN maps to [`Grade::F`].
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map_or(Self::F, |(_, grade)| *grade)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SubmissionStatus
// ---------------------------------------------------------------------------

/// Coarse five-band status used when narrating submission readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Excellent,
    Pass,
    Acceptable,
    BelowStandard,
    Fail,
}

impl SubmissionStatus {
    /// Map an overall score to its status band.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 80.0 {
            Self::Pass
        } else if score >= 70.0 {
            Self::Acceptable
        } else if score >= 60.0 {
            Self::BelowStandard
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Pass => "PASS",
            Self::Acceptable => "ACCEPTABLE",
            Self::BelowStandard => "BELOW_STANDARD",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AggregationPolicy
// ---------------------------------------------------------------------------

/// How tier results combine into an overall score.
///
/// Both formulas exist side by side and are selected per section type in
/// configuration:
///
/// ```text
/// weighted_tier  overall = sum(tier.percentage * weight(tier))
/// flat_check     overall = sum(passed) / sum(total) * 100
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    WeightedTier,
    FlatCheck,
}

impl AggregationPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightedTier => "weighted_tier",
            Self::FlatCheck => "flat_check",
        }
    }
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weighted_tier" | "weighted" => Ok(Self::WeightedTier),
            "flat_check" | "flat" => Ok(Self::FlatCheck),
            _ => Err(CoreError::UnknownPolicy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TierWeights
// ---------------------------------------------------------------------------

/// Per-tier weights for [`AggregationPolicy::WeightedTier`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TierWeights {
    pub structure: f64,
    pub content: f64,
    pub compliance: f64,
    pub quality: f64,
}

impl TierWeights {
    #[must_use]
    pub const fn weight_for(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Structure => self.structure,
            Tier::Content => self.content,
            Tier::Compliance => self.compliance,
            Tier::Quality => self.quality,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.structure + self.content + self.compliance + self.quality
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            structure: 0.25,
            content: 0.30,
            compliance: 0.30,
            quality: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(100.0, Grade::APlus)]
    #[case(95.0, Grade::APlus)]
    #[case(94.99, Grade::A)]
    #[case(90.0, Grade::A)]
    #[case(85.0, Grade::AMinus)]
    #[case(80.0, Grade::BPlus)]
    #[case(75.0, Grade::B)]
    #[case(70.0, Grade::BMinus)]
    #[case(65.0, Grade::CPlus)]
    #[case(60.0, Grade::C)]
    #[case(59.99, Grade::F)]
    #[case(0.0, Grade::F)]
    fn grade_bands(#[case] score: f64, #[case] expected: Grade) {
        assert_eq!(Grade::from_score(score), expected);
    }

    #[rstest]
    #[case(90.0, SubmissionStatus::Excellent)]
    #[case(89.9, SubmissionStatus::Pass)]
    #[case(80.0, SubmissionStatus::Pass)]
    #[case(70.0, SubmissionStatus::Acceptable)]
    #[case(60.0, SubmissionStatus::BelowStandard)]
    #[case(12.5, SubmissionStatus::Fail)]
    fn status_bands(#[case] score: f64, #[case] expected: SubmissionStatus) {
        assert_eq!(SubmissionStatus::from_score(score), expected);
    }

    #[test]
    fn grade_is_monotonic() {
        let rank = |grade: Grade| Grade::BANDS.iter().position(|(_, g)| *g == grade).unwrap_or(8);
        let mut previous = rank(Grade::from_score(0.0));
        for step in 1..=1000 {
            let current = rank(Grade::from_score(f64::from(step) / 10.0));
            assert!(current <= previous, "grade regressed at score {}", step / 10);
            previous = current;
        }
    }

    #[test]
    fn nan_score_grades_as_f() {
        assert_eq!(Grade::from_score(f64::NAN), Grade::F);
        assert_eq!(SubmissionStatus::from_score(f64::NAN), SubmissionStatus::Fail);
    }

    #[test]
    fn grade_serializes_as_letter() {
        let json = serde_json::to_string(&Grade::AMinus).unwrap();
        assert_eq!(json, "\"A-\"");
        let json = serde_json::to_string(&SubmissionStatus::BelowStandard).unwrap();
        assert_eq!(json, "\"BELOW_STANDARD\"");
    }

    #[test]
    fn outcome_passed_tally() {
        assert!(CheckOutcome::Pass.passed());
        assert!(CheckOutcome::Warn.passed());
        assert!(CheckOutcome::Indeterminate.passed());
        assert!(!CheckOutcome::Fail.passed());
    }

    #[test]
    fn severity_blocking() {
        assert!(Severity::Critical.is_blocking());
        assert!(Severity::High.is_blocking());
        assert!(!Severity::Medium.is_blocking());
        assert!(!Severity::Low.is_blocking());
    }

    #[rstest]
    #[case("executive_summary", SectionType::ExecutiveSummary)]
    #[case("Executive-Summary", SectionType::ExecutiveSummary)]
    #[case("financial plan", SectionType::FinancialPlan)]
    #[case("technical_feasibility", SectionType::TechnicalFeasibility)]
    fn section_type_parses(#[case] input: &str, #[case] expected: SectionType) {
        assert_eq!(input.parse::<SectionType>(), Ok(expected));
    }

    #[test]
    fn unknown_section_type_is_error() {
        assert_eq!(
            "market_analysis".parse::<SectionType>(),
            Err(CoreError::UnknownSectionType("market_analysis".into()))
        );
    }

    #[test]
    fn policy_parses_aliases() {
        assert_eq!("weighted".parse(), Ok(AggregationPolicy::WeightedTier));
        assert_eq!("flat-check".parse(), Ok(AggregationPolicy::FlatCheck));
        assert!("median".parse::<AggregationPolicy>().is_err());
    }

    #[test]
    fn default_weights_sum_to_one() {
        let weights = TierWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-9);
        assert_eq!(weights.weight_for(Tier::Compliance), 0.30);
    }
}
