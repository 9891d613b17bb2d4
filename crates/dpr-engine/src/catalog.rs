//! Check catalog: per-section-type, per-tier registry of check definitions.

use std::collections::HashMap;

use dpr_core::{
    CheckOutcome, FinancialMetrics, PolicyBounds, ProjectFacts, SectionType, Severity, Tier,
};

use crate::checks;
use crate::layout::SectionLayout;

/// Everything a rule sees. Borrowed from the request for one validation call.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub text: &'a str,
    pub facts: &'a ProjectFacts,
    pub metrics: Option<&'a FinancialMetrics>,
    pub bounds: &'a PolicyBounds,
    pub layout: &'a SectionLayout,
}

/// Outcome and message produced by a rule or the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: CheckOutcome,
    pub message: String,
}

impl Verdict {
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            outcome: CheckOutcome::Pass,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            outcome: CheckOutcome::Warn,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            outcome: CheckOutcome::Fail,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn indeterminate(message: impl Into<String>) -> Self {
        Self {
            outcome: CheckOutcome::Indeterminate,
            message: message.into(),
        }
    }

    /// Pass or fail depending on `ok`.
    #[must_use]
    pub fn from_bool(ok: bool, pass: impl Into<String>, fail: impl Into<String>) -> Self {
        if ok { Self::pass(pass) } else { Self::fail(fail) }
    }
}

/// Subsection judged by the semantic oracle.
#[derive(Debug, Clone, Copy)]
pub struct OracleProbe {
    pub subsection: &'static str,
    pub aliases: &'static [&'static str],
    pub question: &'static str,
}

/// How a check is decided.
#[derive(Debug, Clone, Copy)]
pub enum CheckRule {
    /// Pure, synchronous rule over the check input.
    Rule(fn(&CheckInput<'_>) -> Verdict),
    /// Adequacy judgment delegated to the semantic oracle (may suspend).
    Oracle(OracleProbe),
}

#[derive(Debug, Clone)]
pub struct CheckDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: Tier,
    pub severity: Severity,
    /// Suggestion surfaced when the check fails at a blocking severity.
    pub remediation: &'static str,
    pub rule: CheckRule,
}

impl CheckDefinition {
    #[must_use]
    pub const fn rule(
        id: &'static str,
        name: &'static str,
        tier: Tier,
        severity: Severity,
        remediation: &'static str,
        rule: fn(&CheckInput<'_>) -> Verdict,
    ) -> Self {
        Self {
            id,
            name,
            tier,
            severity,
            remediation,
            rule: CheckRule::Rule(rule),
        }
    }

    #[must_use]
    pub const fn oracle(
        id: &'static str,
        name: &'static str,
        tier: Tier,
        severity: Severity,
        remediation: &'static str,
        probe: OracleProbe,
    ) -> Self {
        Self {
            id,
            name,
            tier,
            severity,
            remediation,
            rule: CheckRule::Oracle(probe),
        }
    }
}

/// Registry of check definitions. Insertion order within a (section type, tier)
/// pair is evaluation and reporting order.
#[derive(Debug, Clone, Default)]
pub struct CheckCatalog {
    entries: HashMap<(SectionType, Tier), Vec<CheckDefinition>>,
}

impl CheckCatalog {
    /// A catalog with no checks registered.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in catalog for every section type.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        for section in SectionType::ALL {
            for definition in checks::definitions(section) {
                catalog.register(section, definition);
            }
        }
        catalog
    }

    /// Append a definition under its own tier.
    pub fn register(&mut self, section_type: SectionType, definition: CheckDefinition) {
        self.entries
            .entry((section_type, definition.tier))
            .or_default()
            .push(definition);
    }

    /// Definitions for one (section type, tier), in registration order.
    #[must_use]
    pub fn checks_for(&self, section_type: SectionType, tier: Tier) -> &[CheckDefinition] {
        self.entries
            .get(&(section_type, tier))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Definitions for a section type across all tiers, in tier order.
    pub fn section(&self, section_type: SectionType) -> impl Iterator<Item = &CheckDefinition> {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.checks_for(section_type, tier).iter())
    }

    /// Total number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn always_pass(_: &CheckInput<'_>) -> Verdict {
        Verdict::pass("ok")
    }

    #[rstest]
    #[case(SectionType::ExecutiveSummary, [8, 8, 7, 6])]
    #[case(SectionType::FinancialPlan, [9, 6, 10, 6])]
    #[case(SectionType::TechnicalFeasibility, [9, 7, 8, 6])]
    fn standard_catalog_sizes(#[case] section: SectionType, #[case] sizes: [usize; 4]) {
        let catalog = CheckCatalog::standard();
        let actual = Tier::ALL.map(|tier| catalog.checks_for(section, tier).len());
        assert_eq!(actual, sizes);
    }

    #[test]
    fn standard_ids_are_unique_and_prefixed() {
        let catalog = CheckCatalog::standard();
        let mut seen = HashSet::new();
        for section in SectionType::ALL {
            for tier in Tier::ALL {
                for definition in catalog.checks_for(section, tier) {
                    assert_eq!(definition.tier, tier);
                    let expected = format!("{}{}.", tier.id_prefix(), section.ordinal());
                    assert!(
                        definition.id.starts_with(&expected),
                        "{} should start with {expected}",
                        definition.id
                    );
                    assert!(seen.insert(definition.id), "duplicate id {}", definition.id);
                }
            }
        }
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn register_preserves_order_and_tier() {
        let mut catalog = CheckCatalog::empty();
        assert!(catalog.is_empty());
        catalog.register(
            SectionType::FinancialPlan,
            CheckDefinition::rule("X.2", "second", Tier::Quality, Severity::Low, "", always_pass),
        );
        catalog.register(
            SectionType::FinancialPlan,
            CheckDefinition::rule("X.1", "first", Tier::Quality, Severity::Low, "", always_pass),
        );
        let ids: Vec<_> = catalog
            .checks_for(SectionType::FinancialPlan, Tier::Quality)
            .iter()
            .map(|definition| definition.id)
            .collect();
        assert_eq!(ids, vec!["X.2", "X.1"]);
        assert!(catalog.checks_for(SectionType::FinancialPlan, Tier::Content).is_empty());
        assert!(catalog.checks_for(SectionType::ExecutiveSummary, Tier::Quality).is_empty());
    }
}
