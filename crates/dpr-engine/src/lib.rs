//! # dpr-engine
//!
//! Tiered validation and scoring of generated DPR sections.
//!
//! A section's markdown text is run through four tiers of checks (Structure,
//! Content, Compliance, Quality) taken from a per-section-type catalog, then the
//! tier results are aggregated into a graded [`ValidationReport`] under the
//! section type's configured aggregation policy.
//!
//! - [`layout`] / [`extract`]: required headings per section type and subsection lookup
//! - [`catalog`] / [`checks`]: the check registry and the built-in checks
//! - [`evaluate`]: per-tier evaluation, oracle checks awaited concurrently
//! - [`oracle`]: optional semantic adequacy judge with timeout and one retry
//! - [`aggregate`]: scoring, grading, issues and suggestions
//! - [`render`]: structured JSON and narrative markdown output
//!
//! ```no_run
//! use dpr_engine::{ValidationRequest, Validator, fixtures};
//! use dpr_core::SectionType;
//!
//! # async fn run() {
//! let request = ValidationRequest::new(
//!     SectionType::ExecutiveSummary,
//!     fixtures::EXECUTIVE_SUMMARY_GOOD,
//!     fixtures::sample_facts(),
//!     Some(fixtures::sample_metrics()),
//! );
//! let report = Validator::standard().validate(&request).await;
//! println!("{:.1} {}", report.overall_score, report.grade);
//! # }
//! ```
//!
//! [`ValidationReport`]: dpr_core::ValidationReport

pub mod aggregate;
pub mod catalog;
pub mod checks;
pub mod engine;
pub mod evaluate;
pub mod extract;
pub mod fixtures;
pub mod layout;
pub mod oracle;
pub mod render;
pub mod text;

mod error;

pub use catalog::{CheckCatalog, CheckDefinition, CheckInput, CheckRule, OracleProbe, Verdict};
pub use engine::{ValidationRequest, Validator};
pub use error::{EngineError, OracleError};
pub use oracle::{HttpOracle, OracleRequest, OracleSettings, OracleVerdict, SemanticOracle};
pub use render::{ReportFormat, SummaryRow, average_score, render, summary_rows};
