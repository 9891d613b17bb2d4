//! Executive Summary catalog (8 structure, 8 content, 7 compliance, 6 quality).

use dpr_core::{SectionType, Severity, Tier};

use super::common;
use crate::catalog::{CheckDefinition, CheckInput, OracleProbe, Verdict};
use crate::layout::EXECUTIVE_SUMMARY;
use crate::text;

const FACILITY_WORDS: &[&str] = &["cfc", "facility", "centre", "center"];

const FINANCIAL_TERMS: &[&str] = &[
    "npv",
    "irr",
    "dscr",
    "break-even",
    "breakeven",
    "cost",
    "grant",
    "subsidy",
];

const IMPACT_TERMS: &[&str] = &[
    "employment",
    "job",
    "revenue",
    "turnover",
    "technology",
    "market",
    "skill",
];

const APPROVAL_INDICATORS: &[&str] = &[
    "recommend",
    "approval",
    "viable",
    "feasible",
    "should be approved",
];

const JUSTIFICATION_TERMS: &[&str] = &["financial", "viability", "impact", "compliance"];

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

fn overview_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "project_overview")
}

fn cluster_profile_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "cluster_profile")
}

fn financial_highlights_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "financial_highlights")
}

fn expected_impact_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "expected_impact")
}

fn recommendation_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "recommendation")
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// At least three of cluster type, city, member count, and a facility mention.
fn overview_facts(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "project_overview");
    if body.is_empty() {
        return common::missing_subsection("Project Overview");
    }
    let lower = body.to_lowercase();
    let facts = input.facts;

    let members = facts.members.map(|count| count.to_string());
    let checks = [
        ("cluster type", facts.cluster_type().map(str::to_lowercase)),
        ("location", facts.location_city().map(str::to_lowercase)),
        ("member count", members),
    ];

    let mut found = Vec::new();
    let mut missing = Vec::new();
    for (label, value) in checks {
        match value {
            Some(value) if lower.contains(&value) => found.push(label),
            Some(_) => missing.push(label.to_string()),
            None => missing.push(format!("{label} (not available)")),
        }
    }
    if text::contains_any(&body, FACILITY_WORDS) {
        found.push("facility");
    } else {
        missing.push("facility".to_string());
    }

    if found.len() >= 3 {
        Verdict::pass(format!("Overview states {}", found.join(", ")))
    } else {
        Verdict::fail(format!(
            "Overview states only {} of 4 key facts; missing {}",
            found.len(),
            missing.join(", ")
        ))
    }
}

fn financial_highlights(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "financial_highlights");
    if body.is_empty() {
        return common::missing_subsection("Financial Highlights");
    }
    common::keyword_threshold(&body, "Financial Highlights", FINANCIAL_TERMS, 5)
}

fn expected_impact(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "expected_impact");
    if body.is_empty() {
        return common::missing_subsection("Expected Impact");
    }
    let keywords = common::keyword_threshold(&body, "Expected Impact", IMPACT_TERMS, 4);
    if !keywords.outcome.passed() {
        return keywords;
    }
    if text::has_quantity(&body) {
        keywords
    } else {
        Verdict::fail("Expected Impact has no quantified figure (₹ amount or percentage)")
    }
}

fn recommendation(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "recommendation");
    if body.is_empty() {
        return common::missing_subsection("Recommendation");
    }
    let indicator = text::contains_any(&body, APPROVAL_INDICATORS);
    let justified = text::contains_any(&body, JUSTIFICATION_TERMS);
    match (indicator, justified) {
        (true, true) => Verdict::pass("Recommendation is explicit and justified"),
        (false, _) => Verdict::fail("Recommendation does not ask for approval"),
        (true, false) => Verdict::fail("Recommendation lacks a financial, impact, or compliance justification"),
    }
}

/// Project cost and member count are both stated somewhere in the section.
fn key_facts_stated(input: &CheckInput<'_>) -> Verdict {
    let Some(members) = input.facts.members else {
        return Verdict::fail("Member count not available");
    };
    let cost_stated = text::has_currency(input.text) || text::contains_any(input.text, &["crore"]);
    let members_stated = input.text.contains(&members.to_string());
    match (cost_stated, members_stated) {
        (true, true) => Verdict::pass("Project cost and member count stated"),
        (false, _) => Verdict::fail("Project cost is not stated"),
        (true, false) => Verdict::fail(format!("Member count ({members}) is not stated")),
    }
}

#[must_use]
pub fn definitions() -> Vec<CheckDefinition> {
    let layout = &EXECUTIVE_SUMMARY;
    let mut definitions = vec![
        CheckDefinition::rule(
            "S1.1",
            "Executive Summary heading",
            Tier::Structure,
            Severity::Critical,
            "Start the section with an '# EXECUTIVE SUMMARY' heading",
            common::main_heading,
        ),
        CheckDefinition::rule(
            "S1.2",
            "Project Overview heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Project Overview' subsection",
            overview_heading,
        ),
        CheckDefinition::rule(
            "S1.3",
            "Cluster Profile heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Cluster Profile' subsection",
            cluster_profile_heading,
        ),
        CheckDefinition::rule(
            "S1.4",
            "Financial Highlights heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Financial Highlights' subsection",
            financial_highlights_heading,
        ),
        CheckDefinition::rule(
            "S1.5",
            "Expected Impact heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Expected Impact' subsection",
            expected_impact_heading,
        ),
        CheckDefinition::rule(
            "S1.6",
            "Recommendation heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Recommendation' subsection",
            recommendation_heading,
        ),
        CheckDefinition::rule(
            "S1.7",
            "Word count",
            Tier::Structure,
            Severity::Medium,
            "Keep the executive summary between 800 and 1500 words",
            common::word_count_in_band,
        ),
        CheckDefinition::rule(
            "S1.8",
            "Paragraph count",
            Tier::Structure,
            Severity::Low,
            "Use 5 to 8 paragraphs",
            common::paragraph_count_in_band,
        ),
        CheckDefinition::rule(
            "C1.1",
            "Project overview facts",
            Tier::Content,
            Severity::High,
            "State the cluster type, location, member count, and proposed facility in the overview",
            overview_facts,
        ),
        CheckDefinition::oracle(
            "C1.2",
            "Cluster profile adequacy",
            Tier::Content,
            Severity::Medium,
            "Describe the cluster's history, challenges, and how the CFC addresses them",
            OracleProbe {
                subsection: "Cluster Profile",
                aliases: layout.aliases("cluster_profile"),
                question: "Does this cluster profile adequately describe the cluster, its challenges, and how the proposed facility addresses them?",
            },
        ),
        CheckDefinition::rule(
            "C1.3",
            "Financial highlights",
            Tier::Content,
            Severity::High,
            "Report NPV, IRR, DSCR, break-even, project cost, and grant in the financial highlights",
            financial_highlights,
        ),
        CheckDefinition::rule(
            "C1.4",
            "Expected impact",
            Tier::Content,
            Severity::Medium,
            "Quantify employment, turnover, technology, and market impact",
            expected_impact,
        ),
        CheckDefinition::rule(
            "C1.5",
            "Recommendation",
            Tier::Content,
            Severity::High,
            "Recommend approval explicitly and justify it with viability, impact, and compliance",
            recommendation,
        ),
        CheckDefinition::rule(
            "C1.6",
            "Professional tone",
            Tier::Content,
            Severity::Medium,
            "Remove informal phrases",
            common::no_informal_phrases,
        ),
        CheckDefinition::rule(
            "C1.7",
            "Capitalisation",
            Tier::Content,
            Severity::Low,
            "Start every sentence with a capital letter",
            common::capitalisation,
        ),
        CheckDefinition::rule(
            "C1.8",
            "Key facts stated",
            Tier::Content,
            Severity::High,
            "State the total project cost and the number of member units",
            key_facts_stated,
        ),
        CheckDefinition::rule(
            "CP1.1",
            "Scheme named",
            Tier::Compliance,
            Severity::Critical,
            "Name the MSE-CDP scheme explicitly",
            common::scheme_named,
        ),
        CheckDefinition::rule(
            "CP1.2",
            "Grant percentage within range",
            Tier::Compliance,
            Severity::Critical,
            "State a grant percentage within the 60-80% range",
            common::grant_in_range,
        ),
        CheckDefinition::rule(
            "CP1.3",
            "Project cost within ceiling",
            Tier::Compliance,
            Severity::Critical,
            "Keep the project cost within ₹30 crore and state it",
            common::cost_within_ceiling,
        ),
        CheckDefinition::rule(
            "CP1.4",
            "Completeness reference",
            Tier::Compliance,
            Severity::Low,
            "Refer to the comprehensive DPR the summary introduces",
            common::completeness_reference,
        ),
        CheckDefinition::rule(
            "CP1.5",
            "Implementing entity",
            Tier::Compliance,
            Severity::High,
            "Name the SPV or implementing agency",
            common::implementing_entity,
        ),
        CheckDefinition::rule(
            "CP1.6",
            "Implementation timeline",
            Tier::Compliance,
            Severity::High,
            "State the implementation period (e.g. 18 months)",
            common::timeline,
        ),
        CheckDefinition::rule(
            "CP1.7",
            "State government approval",
            Tier::Compliance,
            Severity::Medium,
            "Mention state government approval status",
            common::approving_authority,
        ),
    ];
    definitions.extend(common::quality_definitions(SectionType::ExecutiveSummary));
    definitions
}
