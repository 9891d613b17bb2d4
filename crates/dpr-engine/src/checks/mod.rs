//! Built-in check definitions, one module per section type.

pub mod common;
pub mod executive_summary;
pub mod financial_plan;
pub mod technical_feasibility;

use dpr_core::SectionType;

use crate::catalog::CheckDefinition;

/// Standard definitions for `section`, in tier then catalog order.
#[must_use]
pub fn definitions(section: SectionType) -> Vec<CheckDefinition> {
    match section {
        SectionType::ExecutiveSummary => executive_summary::definitions(),
        SectionType::FinancialPlan => financial_plan::definitions(),
        SectionType::TechnicalFeasibility => technical_feasibility::definitions(),
    }
}
