//! Declarative section layouts: title aliases, required subsections, and size bands.
//!
//! Adding a section type means adding a table here and a check module; the
//! extractor and evaluators never hard-code heading text.

use dpr_core::SectionType;

/// A required subsection and the surface forms its heading may take.
#[derive(Debug, Clone, Copy)]
pub struct SubsectionSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub aliases: &'static [&'static str],
}

/// Inclusive numeric band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: usize,
    pub max: usize,
}

impl Band {
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(self, value: usize) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SectionLayout {
    pub section_type: SectionType,
    pub title: &'static str,
    pub title_aliases: &'static [&'static str],
    pub subsections: &'static [SubsectionSpec],
    pub word_band: Band,
    pub paragraph_band: Option<Band>,
}

impl SectionLayout {
    /// Look up a subsection by key.
    #[must_use]
    pub fn subsection(&self, key: &str) -> Option<&'static SubsectionSpec> {
        self.subsections.iter().find(|spec| spec.key == key)
    }

    /// Aliases for a subsection key; empty when the key is unknown.
    #[must_use]
    pub fn aliases(&self, key: &str) -> &'static [&'static str] {
        self.subsection(key)
            .map(|spec| spec.aliases)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Executive Summary
// ---------------------------------------------------------------------------

pub const EXECUTIVE_SUMMARY: SectionLayout = SectionLayout {
    section_type: SectionType::ExecutiveSummary,
    title: "Executive Summary",
    title_aliases: &["executive summary"],
    subsections: &[
        SubsectionSpec {
            key: "project_overview",
            title: "Project Overview",
            aliases: &["project overview", "overview of the project", "project summary"],
        },
        SubsectionSpec {
            key: "cluster_profile",
            title: "Cluster Profile",
            aliases: &["cluster profile", "cluster overview", "about the cluster"],
        },
        SubsectionSpec {
            key: "financial_highlights",
            title: "Financial Highlights",
            aliases: &["financial highlights", "financial summary", "key financials"],
        },
        SubsectionSpec {
            key: "expected_impact",
            title: "Expected Impact",
            aliases: &["expected impact", "project impact", "expected outcomes", "impact assessment"],
        },
        SubsectionSpec {
            key: "recommendation",
            title: "Recommendation",
            aliases: &["recommendation", "conclusion"],
        },
    ],
    word_band: Band::new(800, 1500),
    paragraph_band: Some(Band::new(5, 8)),
};

// ---------------------------------------------------------------------------
// Financial Plan
// ---------------------------------------------------------------------------

pub const FINANCIAL_PLAN: SectionLayout = SectionLayout {
    section_type: SectionType::FinancialPlan,
    title: "Financial Plan",
    title_aliases: &["financial plan", "financial analysis"],
    subsections: &[
        SubsectionSpec {
            key: "project_cost_breakdown",
            title: "Project Cost Breakdown",
            aliases: &["project cost breakdown", "cost breakdown", "project cost"],
        },
        SubsectionSpec {
            key: "funding_structure",
            title: "Funding Structure",
            aliases: &["funding structure", "means of finance", "funding pattern"],
        },
        SubsectionSpec {
            key: "financial_viability_metrics",
            title: "Financial Viability Metrics",
            aliases: &["financial viability metrics", "viability metrics", "financial viability"],
        },
        SubsectionSpec {
            key: "revenue_projections",
            title: "Revenue Projections",
            aliases: &["revenue projections", "revenue projection", "projected revenue"],
        },
        SubsectionSpec {
            key: "debt_service_analysis",
            title: "Debt Service Analysis",
            aliases: &["debt service analysis", "debt service", "repayment schedule"],
        },
        SubsectionSpec {
            key: "financial_feasibility_assessment",
            title: "Financial Feasibility Assessment",
            aliases: &["financial feasibility assessment", "financial feasibility", "feasibility assessment"],
        },
    ],
    word_band: Band::new(600, 2500),
    paragraph_band: None,
};

// ---------------------------------------------------------------------------
// Technical Feasibility
// ---------------------------------------------------------------------------

pub const TECHNICAL_FEASIBILITY: SectionLayout = SectionLayout {
    section_type: SectionType::TechnicalFeasibility,
    title: "Technical Feasibility",
    title_aliases: &["technical feasibility", "technical analysis"],
    subsections: &[
        SubsectionSpec {
            key: "technology_assessment",
            title: "Technology Assessment",
            aliases: &["technology assessment", "technology selection", "proposed technology"],
        },
        SubsectionSpec {
            key: "equipment_specifications",
            title: "Equipment Specifications",
            aliases: &["equipment specifications", "equipment specification", "machinery and equipment", "equipment list"],
        },
        SubsectionSpec {
            key: "infrastructure_requirements",
            title: "Infrastructure Requirements",
            aliases: &["infrastructure requirements", "infrastructure facilities", "land and building"],
        },
        SubsectionSpec {
            key: "production_capacity",
            title: "Production Capacity",
            aliases: &["production capacity", "installed capacity", "capacity utilisation", "capacity utilization"],
        },
        SubsectionSpec {
            key: "implementation_schedule",
            title: "Implementation Schedule",
            aliases: &["implementation schedule", "implementation timeline", "project schedule"],
        },
        SubsectionSpec {
            key: "manpower_requirements",
            title: "Manpower Requirements",
            aliases: &["manpower requirements", "manpower plan", "human resources", "staffing plan"],
        },
    ],
    word_band: Band::new(800, 2500),
    paragraph_band: Some(Band::new(6, 15)),
};

/// Layout table for a section type.
#[must_use]
pub const fn for_section(section_type: SectionType) -> &'static SectionLayout {
    match section_type {
        SectionType::ExecutiveSummary => &EXECUTIVE_SUMMARY,
        SectionType::FinancialPlan => &FINANCIAL_PLAN,
        SectionType::TechnicalFeasibility => &TECHNICAL_FEASIBILITY,
    }
}
