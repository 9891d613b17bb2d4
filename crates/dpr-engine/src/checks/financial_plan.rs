//! Financial Plan catalog (9 structure, 6 content, 10 compliance, 6 quality).

use dpr_core::{SectionType, Severity, Tier};

use super::common;
use crate::catalog::{CheckDefinition, CheckInput, OracleProbe, Verdict};
use crate::layout::FINANCIAL_PLAN;
use crate::text;

const COST_COMPONENTS: &[&str] = &[
    "equipment",
    "machinery",
    "building",
    "civil",
    "land",
    "installation",
    "contingency",
    "preliminary",
    "working capital",
    "furniture",
];

const FUNDING_TERMS: &[&str] = &[
    "grant",
    "subsidy",
    "contribution",
    "loan",
    "equity",
    "bank",
    "spv",
];

const VIABILITY_GROUPS: &[&[&str]] = &[
    &["npv", "net present value"],
    &["irr", "internal rate of return"],
    &["dscr", "debt service coverage"],
    &["break-even", "breakeven", "break even"],
    &["payback"],
];

const PROJECTION_TERMS: &[&str] = &[
    "revenue",
    "income",
    "sales",
    "year",
    "growth",
    "capacity utilisation",
    "capacity utilization",
    "user charges",
    "projection",
];

const DEBT_TERMS: &[&str] = &[
    "loan",
    "interest",
    "repayment",
    "instalment",
    "installment",
    "dscr",
    "moratorium",
    "principal",
];

fn cost_breakdown_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "project_cost_breakdown")
}

fn funding_structure_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "funding_structure")
}

fn viability_metrics_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "financial_viability_metrics")
}

fn revenue_projections_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "revenue_projections")
}

fn debt_service_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "debt_service_analysis")
}

fn feasibility_assessment_heading(input: &CheckInput<'_>) -> Verdict {
    common::subsection_heading(input, "financial_feasibility_assessment")
}

fn cost_breakdown(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "project_cost_breakdown");
    if body.is_empty() {
        return common::missing_subsection("Project Cost Breakdown");
    }
    if !text::has_currency(&body) {
        return Verdict::fail("Project Cost Breakdown has no rupee amounts");
    }
    common::keyword_threshold(&body, "Project Cost Breakdown", COST_COMPONENTS, 2)
}

fn funding_structure(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "funding_structure");
    if body.is_empty() {
        return common::missing_subsection("Funding Structure");
    }
    if text::percentages(&body).is_empty() {
        return Verdict::fail("Funding Structure states no funding shares in percent");
    }
    common::keyword_threshold(&body, "Funding Structure", FUNDING_TERMS, 3)
}

fn viability_metrics(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "financial_viability_metrics");
    if body.is_empty() {
        return common::missing_subsection("Financial Viability Metrics");
    }
    let found = common::count_groups(&body, VIABILITY_GROUPS);
    Verdict::from_bool(
        found >= 4,
        format!("{found} of 5 viability metrics reported"),
        format!("Only {found} of 5 viability metrics (NPV, IRR, DSCR, break-even, payback) reported"),
    )
}

fn revenue_projections(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "revenue_projections");
    if body.is_empty() {
        return common::missing_subsection("Revenue Projections");
    }
    if !text::has_number(&body) {
        return Verdict::fail("Revenue Projections contain no figures");
    }
    common::keyword_threshold(&body, "Revenue Projections", PROJECTION_TERMS, 3)
}

fn debt_service(input: &CheckInput<'_>) -> Verdict {
    let body = common::subsection_body(input, "debt_service_analysis");
    if body.is_empty() {
        return common::missing_subsection("Debt Service Analysis");
    }
    common::keyword_threshold(&body, "Debt Service Analysis", DEBT_TERMS, 3)
}

#[must_use]
pub fn definitions() -> Vec<CheckDefinition> {
    let layout = &FINANCIAL_PLAN;
    let mut definitions = vec![
        CheckDefinition::rule(
            "S2.1",
            "Financial Plan heading",
            Tier::Structure,
            Severity::Critical,
            "Start the section with a '# FINANCIAL PLAN' heading",
            common::main_heading,
        ),
        CheckDefinition::rule(
            "S2.2",
            "Project Cost Breakdown heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Project Cost Breakdown' subsection",
            cost_breakdown_heading,
        ),
        CheckDefinition::rule(
            "S2.3",
            "Funding Structure heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Funding Structure' subsection",
            funding_structure_heading,
        ),
        CheckDefinition::rule(
            "S2.4",
            "Financial Viability Metrics heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Financial Viability Metrics' subsection",
            viability_metrics_heading,
        ),
        CheckDefinition::rule(
            "S2.5",
            "Revenue Projections heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Revenue Projections' subsection",
            revenue_projections_heading,
        ),
        CheckDefinition::rule(
            "S2.6",
            "Debt Service Analysis heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Debt Service Analysis' subsection",
            debt_service_heading,
        ),
        CheckDefinition::rule(
            "S2.7",
            "Financial Feasibility Assessment heading",
            Tier::Structure,
            Severity::High,
            "Add a '## Financial Feasibility Assessment' subsection",
            feasibility_assessment_heading,
        ),
        CheckDefinition::rule(
            "S2.8",
            "Word count",
            Tier::Structure,
            Severity::Medium,
            "Keep the financial plan between 600 and 2500 words",
            common::word_count_in_band,
        ),
        CheckDefinition::rule(
            "S2.9",
            "Tabular data",
            Tier::Structure,
            Severity::Medium,
            "Present cost and funding figures in a table or '- **Label:** value' rows",
            common::tabular_data,
        ),
        CheckDefinition::rule(
            "C2.1",
            "Cost breakdown",
            Tier::Content,
            Severity::High,
            "Itemise equipment, building, installation, and contingency costs in rupees",
            cost_breakdown,
        ),
        CheckDefinition::rule(
            "C2.2",
            "Funding structure",
            Tier::Content,
            Severity::High,
            "Give the grant, member contribution, and loan shares in percent",
            funding_structure,
        ),
        CheckDefinition::rule(
            "C2.3",
            "Viability metrics",
            Tier::Content,
            Severity::High,
            "Report NPV, IRR, DSCR, break-even, and payback period",
            viability_metrics,
        ),
        CheckDefinition::rule(
            "C2.4",
            "Revenue projections",
            Tier::Content,
            Severity::Medium,
            "Project revenue year by year with capacity utilisation",
            revenue_projections,
        ),
        CheckDefinition::rule(
            "C2.5",
            "Debt service",
            Tier::Content,
            Severity::Medium,
            "Describe loan amount, interest, moratorium, and repayment",
            debt_service,
        ),
        CheckDefinition::oracle(
            "C2.6",
            "Feasibility assessment adequacy",
            Tier::Content,
            Severity::Medium,
            "Conclude with an assessment that ties the metrics to scheme requirements",
            OracleProbe {
                subsection: "Financial Feasibility Assessment",
                aliases: layout.aliases("financial_feasibility_assessment"),
                question: "Does this assessment conclude on financial feasibility using the project's metrics and the scheme's requirements?",
            },
        ),
        CheckDefinition::rule(
            "CP2.1",
            "Project cost within ceiling",
            Tier::Compliance,
            Severity::Critical,
            "Keep the project cost within ₹30 crore and state it",
            common::cost_within_ceiling,
        ),
        CheckDefinition::rule(
            "CP2.2",
            "Grant percentage within range",
            Tier::Compliance,
            Severity::Critical,
            "State a grant percentage within the 60-80% range",
            common::grant_in_range,
        ),
        CheckDefinition::rule(
            "CP2.3",
            "DSCR above floor",
            Tier::Compliance,
            Severity::Critical,
            "Show a DSCR above 3.0",
            common::dscr_above_floor,
        ),
        CheckDefinition::rule(
            "CP2.4",
            "Break-even below ceiling",
            Tier::Compliance,
            Severity::High,
            "Show break-even below 60% capacity utilisation",
            common::breakeven_below_ceiling,
        ),
        CheckDefinition::rule(
            "CP2.5",
            "Positive NPV",
            Tier::Compliance,
            Severity::Critical,
            "Show a positive NPV",
            common::npv_positive,
        ),
        CheckDefinition::rule(
            "CP2.6",
            "IRR above floor",
            Tier::Compliance,
            Severity::High,
            "Show an IRR above 10%",
            common::irr_above_floor,
        ),
        CheckDefinition::rule(
            "CP2.7",
            "Scheme named",
            Tier::Compliance,
            Severity::High,
            "Name the MSE-CDP scheme explicitly",
            common::scheme_named,
        ),
        CheckDefinition::rule(
            "CP2.8",
            "Implementing entity",
            Tier::Compliance,
            Severity::Medium,
            "Name the SPV contributing the member share",
            common::implementing_entity,
        ),
        CheckDefinition::rule(
            "CP2.9",
            "Implementation timeline",
            Tier::Compliance,
            Severity::Medium,
            "State the implementation and repayment periods",
            common::timeline,
        ),
        CheckDefinition::rule(
            "CP2.10",
            "State government approval",
            Tier::Compliance,
            Severity::Medium,
            "Mention state government approval of the funding",
            common::approving_authority,
        ),
    ];
    definitions.extend(common::quality_definitions(SectionType::FinancialPlan));
    definitions
}

#[cfg(test)]
mod tests {
    use dpr_core::{CheckOutcome, PolicyBounds, ProjectFacts};
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(rule: fn(&CheckInput<'_>) -> Verdict, text: &str) -> Verdict {
        let facts = ProjectFacts::default();
        let bounds = PolicyBounds::default();
        rule(&CheckInput {
            text,
            facts: &facts,
            metrics: None,
            bounds: &bounds,
            layout: &FINANCIAL_PLAN,
        })
    }

    #[test]
    fn cost_breakdown_needs_amounts() {
        let text = "## Project Cost Breakdown\n\nEquipment and building costs are listed below.";
        assert_eq!(
            run(cost_breakdown, text).message,
            "Project Cost Breakdown has no rupee amounts"
        );
        let text = "## Project Cost Breakdown\n\nEquipment ₹5.1 crore, building ₹1.2 crore.";
        assert_eq!(run(cost_breakdown, text).outcome, CheckOutcome::Pass);
    }

    #[test]
    fn viability_counts_metric_groups() {
        let text = "## Financial Viability Metrics\n\nNPV and net present value, IRR, DSCR.";
        let verdict = run(viability_metrics, text);
        assert_eq!(verdict.outcome, CheckOutcome::Fail);
        assert!(verdict.message.starts_with("Only 3 of 5"));

        let text = "## Financial Viability Metrics\n\nNPV, IRR, DSCR and payback.";
        assert_eq!(run(viability_metrics, text).outcome, CheckOutcome::Pass);
    }

    #[test]
    fn funding_needs_percentages() {
        let text = "## Funding Structure\n\nGrant, member contribution and bank loan.";
        assert_eq!(run(funding_structure, text).outcome, CheckOutcome::Fail);
        let text = "## Funding Structure\n\nGrant 70%, member contribution 20%, bank loan 10%.";
        assert_eq!(run(funding_structure, text).outcome, CheckOutcome::Pass);
    }

    #[test]
    fn debt_service_keywords() {
        let text = "## Debt Service Analysis\n\nThe term loan carries 10% interest with quarterly repayment.";
        assert_eq!(run(debt_service, text).outcome, CheckOutcome::Pass);
        assert_eq!(
            run(debt_service, "# FINANCIAL PLAN").message,
            "'Debt Service Analysis' subsection not found"
        );
    }
}
