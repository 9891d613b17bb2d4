//! # dpr-core
//!
//! Core types shared by every crate of the DPR section validator.
//!
//! This crate provides:
//! - Project facts and financial metrics consumed read-only by the engine
//! - Compliance policy bounds (MSE-CDP defaults)
//! - Section, tier, severity, outcome, grade, and status enums
//! - Check, tier, and section report types
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod facts;
pub mod policy;
pub mod report;

pub use enums::{
    AggregationPolicy, CheckOutcome, Grade, SectionType, Severity, SubmissionStatus, Tier,
    TierWeights,
};
pub use errors::CoreError;
pub use facts::{FinancialMetrics, ProjectFacts};
pub use policy::PolicyBounds;
pub use report::{
    CheckResult, READY_THRESHOLD, TierResult, VACUOUS_TIER_PERCENTAGE, ValidationReport,
};
