//! Validator facade: one immutable request in, one section report out.

use std::collections::BTreeMap;
use std::sync::Arc;

use dpr_config::ScoringConfig;
use dpr_core::{FinancialMetrics, PolicyBounds, ProjectFacts, SectionType, Tier, ValidationReport};
use futures::future::join_all;

use crate::aggregate;
use crate::catalog::{CheckCatalog, CheckInput};
use crate::evaluate::evaluate_tier;
use crate::layout;
use crate::oracle::{OracleSettings, SemanticOracle};

/// Everything one validation call reads. Owned and never mutated by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub section_name: String,
    pub section_type: SectionType,
    pub text: String,
    pub facts: ProjectFacts,
    pub metrics: Option<FinancialMetrics>,
}

impl ValidationRequest {
    /// A request named after its section type.
    #[must_use]
    pub fn new(
        section_type: SectionType,
        text: impl Into<String>,
        facts: ProjectFacts,
        metrics: Option<FinancialMetrics>,
    ) -> Self {
        Self {
            section_name: section_type.as_str().to_string(),
            section_type,
            text: text.into(),
            facts,
            metrics,
        }
    }

    #[must_use]
    pub fn named(mut self, section_name: impl Into<String>) -> Self {
        self.section_name = section_name.into();
        self
    }
}

/// Stateless validator. Cheap to share; every call depends only on its request.
#[derive(Clone)]
pub struct Validator {
    catalog: Arc<CheckCatalog>,
    scoring: ScoringConfig,
    bounds: PolicyBounds,
    oracle: Option<Arc<dyn SemanticOracle>>,
    oracle_settings: OracleSettings,
}

impl Validator {
    #[must_use]
    pub fn new(catalog: CheckCatalog, scoring: ScoringConfig, bounds: PolicyBounds) -> Self {
        Self {
            catalog: Arc::new(catalog),
            scoring,
            bounds,
            oracle: None,
            oracle_settings: OracleSettings::default(),
        }
    }

    /// Validator with the standard catalog and default scoring and bounds.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            CheckCatalog::standard(),
            ScoringConfig::default(),
            PolicyBounds::default(),
        )
    }

    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn SemanticOracle>, settings: OracleSettings) -> Self {
        self.oracle = Some(oracle);
        self.oracle_settings = settings;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &CheckCatalog {
        &self.catalog
    }

    /// Validate one section. The four tiers run concurrently and are joined
    /// before aggregation.
    pub async fn validate(&self, request: &ValidationRequest) -> ValidationReport {
        let input = CheckInput {
            text: &request.text,
            facts: &request.facts,
            metrics: request.metrics.as_ref(),
            bounds: &self.bounds,
            layout: layout::for_section(request.section_type),
        };
        let oracle = self.oracle.as_deref();
        let settings = self.oracle_settings;
        let section = request.section_type;
        let catalog = self.catalog.as_ref();

        let (structure, content, compliance, quality) = tokio::join!(
            evaluate_tier(catalog, oracle, settings, section, Tier::Structure, &input),
            evaluate_tier(catalog, oracle, settings, section, Tier::Content, &input),
            evaluate_tier(catalog, oracle, settings, section, Tier::Compliance, &input),
            evaluate_tier(catalog, oracle, settings, section, Tier::Quality, &input),
        );

        aggregate::aggregate(
            catalog,
            &request.section_name,
            section,
            vec![structure, content, compliance, quality],
            self.scoring.policy_for(section),
            &self.scoring.weights,
        )
    }

    /// Validate independent sections concurrently, keyed by section name.
    ///
    /// Requests sharing a name overwrite earlier ones in the result.
    pub async fn validate_all(
        &self,
        requests: &[ValidationRequest],
    ) -> BTreeMap<String, ValidationReport> {
        join_all(requests.iter().map(|request| self.validate(request)))
            .await
            .into_iter()
            .map(|report| (report.section_name.clone(), report))
            .collect()
    }
}
