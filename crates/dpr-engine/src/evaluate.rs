//! Tier evaluation: run one tier's catalog entries and tally the results.

use dpr_core::{CheckResult, SectionType, Tier, TierResult};
use futures::future::join_all;

use crate::catalog::{CheckCatalog, CheckDefinition, CheckInput, CheckRule, Verdict};
use crate::checks::common::missing_subsection;
use crate::extract;
use crate::oracle::{self, OracleRequest, OracleSettings, SemanticOracle};

/// Evaluate every check registered for `(section_type, tier)`.
///
/// Rule checks are synchronous; oracle checks for the tier are awaited together.
/// Results keep catalog order. A tier without checks yields the vacuous result.
pub async fn evaluate_tier(
    catalog: &CheckCatalog,
    oracle: Option<&dyn SemanticOracle>,
    settings: OracleSettings,
    section_type: SectionType,
    tier: Tier,
    input: &CheckInput<'_>,
) -> TierResult {
    let definitions = catalog.checks_for(section_type, tier);
    let verdicts = join_all(
        definitions
            .iter()
            .map(|definition| run_check(definition, oracle, settings, input)),
    )
    .await;

    let checks: Vec<CheckResult> = definitions
        .iter()
        .zip(verdicts)
        .map(|(definition, verdict)| {
            tracing::debug!(
                section = %section_type,
                check = definition.id,
                outcome = %verdict.outcome,
                message = %verdict.message,
                "check evaluated"
            );
            CheckResult::new(
                definition.id,
                definition.name,
                definition.tier,
                definition.severity,
                verdict.outcome,
                verdict.message,
            )
        })
        .collect();

    TierResult::from_checks(tier, checks)
}

async fn run_check(
    definition: &CheckDefinition,
    oracle: Option<&dyn SemanticOracle>,
    settings: OracleSettings,
    input: &CheckInput<'_>,
) -> Verdict {
    match definition.rule {
        CheckRule::Rule(rule) => rule(input),
        CheckRule::Oracle(probe) => {
            let body = extract::extract_subsection(input.text, probe.aliases);
            if body.is_empty() {
                return missing_subsection(probe.subsection);
            }
            let request = OracleRequest::new(definition.id, probe.subsection, probe.question, &body);
            oracle::consult(oracle, request, settings).await
        }
    }
}

#[cfg(test)]
mod tests {
    use dpr_core::{CheckOutcome, PolicyBounds, ProjectFacts, Severity};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::OracleProbe;
    use crate::layout;

    fn passing(_: &CheckInput<'_>) -> Verdict {
        Verdict::pass("ok")
    }

    fn failing(_: &CheckInput<'_>) -> Verdict {
        Verdict::fail("nope")
    }

    async fn evaluate(catalog: &CheckCatalog, tier: Tier, text: &str) -> TierResult {
        let facts = ProjectFacts::default();
        let bounds = PolicyBounds::default();
        let input = CheckInput {
            text,
            facts: &facts,
            metrics: None,
            bounds: &bounds,
            layout: &layout::EXECUTIVE_SUMMARY,
        };
        evaluate_tier(
            catalog,
            None,
            OracleSettings::default(),
            SectionType::ExecutiveSummary,
            tier,
            &input,
        )
        .await
    }

    #[tokio::test]
    async fn tallies_in_catalog_order() {
        let mut catalog = CheckCatalog::empty();
        for (id, rule) in [("Q1.1", passing as fn(&CheckInput<'_>) -> Verdict), ("Q1.2", failing), ("Q1.3", passing)] {
            catalog.register(
                SectionType::ExecutiveSummary,
                CheckDefinition::rule(id, id, Tier::Quality, Severity::Low, "fix", rule),
            );
        }
        let result = evaluate(&catalog, Tier::Quality, "text").await;
        let ids: Vec<_> = result.checks.iter().map(|check| check.check_id.as_str()).collect();
        assert_eq!(ids, vec!["Q1.1", "Q1.2", "Q1.3"]);
        assert_eq!((result.passed, result.total), (2, 3));
        assert!((result.percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_tier_is_vacuous() {
        let result = evaluate(&CheckCatalog::empty(), Tier::Quality, "text").await;
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage, 100.0);
    }

    #[tokio::test]
    async fn oracle_probe_without_subsection_fails() {
        let mut catalog = CheckCatalog::empty();
        catalog.register(
            SectionType::ExecutiveSummary,
            CheckDefinition::oracle(
                "C1.2",
                "Cluster profile adequacy",
                Tier::Content,
                Severity::Medium,
                "fix",
                OracleProbe {
                    subsection: "Cluster Profile",
                    aliases: &["cluster profile"],
                    question: "Adequate?",
                },
            ),
        );

        let result = evaluate(&catalog, Tier::Content, "# EXECUTIVE SUMMARY\n\nBody").await;
        assert_eq!(result.checks[0].outcome, CheckOutcome::Fail);

        let result = evaluate(&catalog, Tier::Content, "## Cluster Profile\n\nFifty units.").await;
        assert_eq!(result.checks[0].outcome, CheckOutcome::Indeterminate);
        assert!(result.checks[0].passed);
    }
}
