//! Score aggregation settings.

use std::collections::BTreeMap;

use dpr_core::{AggregationPolicy, SectionType, TierWeights};
use serde::{Deserialize, Serialize};

/// Per-section policy defaults.
///
/// The executive summary is scored with tier weights; the financial plan and
/// technical feasibility sections are scored by flat check ratio.
fn default_policies() -> BTreeMap<String, AggregationPolicy> {
    BTreeMap::from([
        (
            SectionType::ExecutiveSummary.as_str().to_string(),
            AggregationPolicy::WeightedTier,
        ),
        (
            SectionType::FinancialPlan.as_str().to_string(),
            AggregationPolicy::FlatCheck,
        ),
        (
            SectionType::TechnicalFeasibility.as_str().to_string(),
            AggregationPolicy::FlatCheck,
        ),
    ])
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Tier weights for the weighted-tier policy.
    #[serde(default)]
    pub weights: TierWeights,

    /// Aggregation policy keyed by section type name.
    #[serde(default = "default_policies")]
    pub policies: BTreeMap<String, AggregationPolicy>,
}

impl ScoringConfig {
    /// Policy for a section type. Sections without an entry use the weighted-tier policy.
    #[must_use]
    pub fn policy_for(&self, section: SectionType) -> AggregationPolicy {
        self.policies
            .get(section.as_str())
            .copied()
            .unwrap_or(AggregationPolicy::WeightedTier)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: TierWeights::default(),
            policies: default_policies(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policies_per_section() {
        let config = ScoringConfig::default();
        assert_eq!(
            config.policy_for(SectionType::ExecutiveSummary),
            AggregationPolicy::WeightedTier
        );
        assert_eq!(
            config.policy_for(SectionType::FinancialPlan),
            AggregationPolicy::FlatCheck
        );
        assert_eq!(
            config.policy_for(SectionType::TechnicalFeasibility),
            AggregationPolicy::FlatCheck
        );
    }

    #[test]
    fn missing_entry_falls_back_to_weighted() {
        let config = ScoringConfig {
            policies: BTreeMap::new(),
            ..ScoringConfig::default()
        };
        assert_eq!(
            config.policy_for(SectionType::FinancialPlan),
            AggregationPolicy::WeightedTier
        );
    }
}
