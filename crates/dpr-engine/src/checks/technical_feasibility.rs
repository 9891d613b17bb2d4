//! Technical Feasibility catalog (9 structure, 7 content, 8 compliance, 6 quality).

use std::sync::LazyLock;

use dpr_core::{SectionType, Severity, Tier};
use regex::Regex;

use super::common;
use crate::catalog::{CheckDefinition, CheckInput, OracleProbe, Verdict};
use crate::layout::TECHNICAL_FEASIBILITY;
use crate::text;

const EQUIPMENT_TERMS: &[&str] = &[
    "machine",
    "equipment",
    "printer",
    "press",
    "capacity",
    "model",
    "specification",
    "make",
    "kw",
    "automatic",
    "cutting",
    "binding",
];

const INFRASTRUCTURE_TERMS: &[&str] = &[
    "sq ft",
    "sq. ft",
    "square feet",
    "sq m",
    "building",
    "land",
    "power",
    "electricity",
    "water",
    "shed",
    "area",
    "kva",
];

const MANPOWER_TERMS: &[&str] = &[
    "operator",
    "technician",
    "engineer",
    "manager",
    "staff",
    "supervisor",
    "helper",
    "skilled",
    "workers",
    "employees",
];

const STATUTORY_TERMS: &[&str] = &[
    "pollution control",
    "consent to establish",
    "clearance",
    "approval",
    "licence",
    "license",
    "noc",
    "fire safety",
];

static SCHEDULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*(?:-\s*\d+\s*)?months?\b|\bmonth\s+\d+|\bphase\b")
        .expect("schedule pattern compiles")
});

fn technology_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "technology_assessment")
}

fn equipment_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "equipment_specifications")
}

fn infrastructure_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "infrastructure_requirements")
}

fn capacity_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "production_capacity")
}

fn schedule_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "implementation_schedule")
}

fn manpower_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "manpower_requirements")
}

fn technology_assessment(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "technology_assessment");
    if body.is_empty() {
        return common::missing_subsection("Technology Assessment");
    }
    let named: Vec<&str> = [input.facts.facility_type(), input.facts.cluster_type()]
        .into_iter()
        .flatten()
        .collect();
    if named.is_empty() {
        return Verdict::fail("Facility type and cluster type not available");
    }
    Verdict::from_bool(
        text::contains_any(&body, &named),
        "Technology assessment addresses the proposed facility",
        format!("Technology assessment does not mention {}", named.join(" or ")),
    )
}

fn equipment(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "equipment_specifications");
    if body.is_empty() {
        return common::missing_subsection("Equipment Specifications");
    }
    common::keyword_threshold(&body, "Equipment Specifications", EQUIPMENT_TERMS, 3)
}

fn infrastructure(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "infrastructure_requirements");
    if body.is_empty() {
        return common::missing_subsection("Infrastructure Requirements");
    }
    if !text::has_number(&body) {
        return Verdict::fail("Infrastructure Requirements state no quantities");
    }
    common::keyword_threshold(&body, "Infrastructure Requirements", INFRASTRUCTURE_TERMS, 2)
}

fn production_capacity(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "production_capacity");
    if body.is_empty() {
        return common::missing_subsection("Production Capacity");
    }
    Verdict::from_bool(
        !text::percentages(&body).is_empty(),
        "Capacity utilisation stated",
        "Production Capacity states no utilisation percentage",
    )
}

fn schedule(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "implementation_schedule");
    if body.is_empty() {
        return common::missing_subsection("Implementation Schedule");
    }
    Verdict::from_bool(
        SCHEDULE.is_match(&body),
        "Schedule gives months or phases",
        "Implementation Schedule gives no months or phases",
    )
}

fn manpower(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "manpower_requirements");
    if body.is_empty() {
        return common::missing_subsection("Manpower Requirements");
    }
    if !text::has_number(&body) {
        return Verdict::fail("Manpower Requirements give no head count");
    }
    common::keyword_threshold(&body, "Manpower Requirements", MANPOWER_TERMS, 2)
}

fn facility_stated(input: &CheckInput<'_>) -> Verdict {
    let Some(facility) = input.facts.facility_type() else {
        return Verdict::fail("Facility type not available");
    };
    Verdict::from_bool(
        text::contains_any(input.text, &[facility]),
        format!("Facility type '{facility}' stated"),
        format!("Facility type '{facility}' is not stated"),
    )
}

fn location_stated(input: &CheckInput<'_>) -> Verdict {
    let Some(city) = input.facts.location_city() else {
        return Verdict::fail("Location not available");
    };
    Verdict::from_bool(
        text::contains_any(input.text, &[city]),
        format!("Location '{city}' stated"),
        format!("Location '{city}' is not stated"),
    )
}

fn statutory_clearances(input: &CheckInput<'_>) -> Verdict {
    Verdict::from_bool(
        text::contains_any(input.text, STATUTORY_TERMS),
        "Statutory approvals or clearances addressed",
        "Statutory approvals and clearances must be addressed",
    )
}

#[must_use]
pub fn definitions() -> Vec<CheckDefinition> {
    let layout = &TECHNICAL_FEASIBILITY;
    let mut definitions = vec![
        CheckDefinition::rule(
            "S3.1",
            "Technical Feasibility heading",
            Tier::Structure,
            Severity::Critical,
            "Start the section with a '# TECHNICAL FEASIBILITY' heading",
            common::main_heading,
        ),
        CheckDefinition::rule(
            "S3.2",
            "Technology Assessment heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Technology Assessment' subsection",
            technology_heading,
        ),
        CheckDefinition::rule(
            "S3.3",
            "Equipment Specifications heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Equipment Specifications' subsection",
            equipment_heading,
        ),
        CheckDefinition::rule(
            "S3.4",
            "Infrastructure Requirements heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Infrastructure Requirements' subsection",
            infrastructure_heading,
        ),
        CheckDefinition::rule(
            "S3.5",
            "Production Capacity heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Production Capacity' subsection",
            capacity_heading,
        ),
        CheckDefinition::rule(
            "S3.6",
            "Implementation Schedule heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Implementation Schedule' subsection",
            schedule_heading,
        ),
        CheckDefinition::rule(
            "S3.7",
            "Manpower Requirements heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Manpower Requirements' subsection",
            manpower_heading,
        ),
        CheckDefinition::rule(
            "S3.8",
            "Word count",
            Tier::Structure,
            Severity::Medium,
            "Keep the technical feasibility section between 800 and 2500 words",
            common::word_count_in_band,
        ),
        CheckDefinition::rule(
            "S3.9",
            "Paragraph count",
            Tier::Structure,
            Severity::Low,
            "Use 6 to 15 paragraphs",
            common::paragraph_count_in_band,
        ),
        CheckDefinition::rule(
            "C3.1",
            "Technology fit",
            Tier::Content,
            Severity::High,
            "Relate the technology assessment to the proposed facility",
            technology_assessment,
        ),
        CheckDefinition::rule(
            "C3.2",
            "Equipment detail",
            Tier::Content,
            Severity::High,
            "List each machine with make, model, and capacity",
            equipment,
        ),
        CheckDefinition::rule(
            "C3.3",
            "Infrastructure detail",
            Tier::Content,
            Severity::Medium,
            "Quantify built-up area, power load, and water requirements",
            infrastructure,
        ),
        CheckDefinition::rule(
            "C3.4",
            "Capacity utilisation",
            Tier::Content,
            Severity::Medium,
            "State installed capacity and year-wise utilisation percentages",
            production_capacity,
        ),
        CheckDefinition::rule(
            "C3.5",
            "Implementation schedule",
            Tier::Content,
            Severity::High,
            "Break the schedule into phases with month ranges",
            schedule,
        ),
        CheckDefinition::rule(
            "C3.6",
            "Manpower plan",
            Tier::Content,
            Severity::Medium,
            "Give head counts per role",
            manpower,
        ),
        CheckDefinition::oracle(
            "C3.7",
            "Technology adequacy",
            Tier::Content,
            Severity::Medium,
            "Justify the technology choice against the cluster's needs",
            OracleProbe {
                subsection: "Technology Assessment",
                aliases: layout.aliases("technology_assessment"),
                question: "Does this technology assessment justify the chosen technology for the cluster's needs?",
            },
        ),
        CheckDefinition::rule(
            "CP3.1",
            "Scheme named",
            Tier::Compliance,
            Severity::High,
            "Name the MSE-CDP scheme explicitly",
            common::scheme_named,
        ),
        CheckDefinition::rule(
            "CP3.2",
            "Project cost within ceiling",
            Tier::Compliance,
            Severity::Critical,
            "Keep the project cost within ₹30 crore and state it",
            common::cost_within_ceiling,
        ),
        CheckDefinition::rule(
            "CP3.3",
            "Facility type stated",
            Tier::Compliance,
            Severity::High,
            "Name the facility the CFC will house",
            facility_stated,
        ),
        CheckDefinition::rule(
            "CP3.4",
            "Location stated",
            Tier::Compliance,
            Severity::High,
            "State where the CFC will be located",
            location_stated,
        ),
        CheckDefinition::rule(
            "CP3.5",
            "Implementing entity",
            Tier::Compliance,
            Severity::Medium,
            "Name the SPV that will operate the facility",
            common::implementing_entity,
        ),
        CheckDefinition::rule(
            "CP3.6",
            "Implementation timeline",
            Tier::Compliance,
            Severity::High,
            "State the implementation period",
            common::timeline,
        ),
        CheckDefinition::rule(
            "CP3.7",
            "Statutory clearances",
            Tier::Compliance,
            Severity::Medium,
            "List pollution control, fire safety, and other clearances",
            statutory_clearances,
        ),
        CheckDefinition::rule(
            "CP3.8",
            "Break-even utilisation",
            Tier::Compliance,
            Severity::High,
            "Show break-even below 60% capacity utilisation",
            common::breakeven_utilisation,
        ),
    ];
    definitions.extend(common::quality_definitions(SectionType::TechnicalFeasibility));
    definitions
}
