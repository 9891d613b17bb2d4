//! Rules shared across section types.
//!
//! Structure and Quality rules read the section's layout from [`CheckInput`], so a
//! single function serves every section type. Compliance rules implement the
//! two-part condition: the figure satisfies its bound AND the text names it.

use std::sync::LazyLock;

use dpr_core::{SectionType, Severity, Tier};
use regex::Regex;

use crate::catalog::{CheckDefinition, CheckInput, Verdict};
use crate::extract;
use crate::text;

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

pub const SCHEME_TERMS: &[&str] = &[
    "mse-cdp",
    "mse cdp",
    "cluster development programme",
    "cluster development program",
];

pub const IMPLEMENTING_ENTITY_TERMS: &[&str] = &[
    "spv",
    "special purpose vehicle",
    "implementing agency",
    "implementing entity",
    "cluster association",
];

pub const APPROVAL_AUTHORITY_TERMS: &[&str] = &[
    "state government",
    "government approval",
    "state approval",
    "approvals",
];

pub const COMPLETENESS_TERMS: &[&str] = &[
    "complete",
    "comprehensive",
    "detailed",
    "all sections",
    "full",
];

const GRANT_TERMS: &[&str] = &["grant", "subsidy"];
const FACILITY_SYMBOL_TERMS: &[&str] = &["cfc", "common facility centre", "common facility center"];

static TIMELINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*months?\b|\d+\s*years?\b|timeline|schedule|implementation period")
        .expect("timeline pattern compiles")
});

static INFORMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:okay|here's|let me|i think|maybe|probably|kind of|sort of)\b")
        .expect("informal pattern compiles")
});

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rupee amount in crore, as written in DPRs.
#[must_use]
pub fn format_crore(amount: f64) -> String {
    format!("₹{:.2} crore", amount / 10_000_000.0)
}

/// Body of a layout subsection; empty when the heading is absent.
#[must_use]
pub fn subsection_body(input: &CheckInput<'_>, key: &str) -> String {
    extract::extract_subsection(input.text, input.layout.aliases(key))
}

/// Display title of a layout subsection (falls back to the key).
#[must_use]
pub fn subsection_title<'a>(input: &CheckInput<'a>, key: &'a str) -> &'a str {
    input.layout.subsection(key).map_or(key, |spec| spec.title)
}

/// Deterministic failure for a subsection whose heading was not found.
#[must_use]
pub fn missing_subsection(title: &str) -> Verdict {
    Verdict::fail(format!("'{title}' subsection not found"))
}

/// Number of groups with at least one term present in `text`.
#[must_use]
pub fn count_groups(text: &str, groups: &[&[&str]]) -> usize {
    groups
        .iter()
        .filter(|group| text::contains_any(text, group))
        .count()
}

/// Pass when `body` contains at least `min` of `keywords`.
#[must_use]
pub fn keyword_threshold(body: &str, what: &str, keywords: &[&str], min: usize) -> Verdict {
    let found = text::count_keywords(body, keywords);
    Verdict::from_bool(
        found >= min,
        format!("{what}: {found} key terms found (minimum {min})"),
        format!("{what}: only {found} key terms found (minimum {min})"),
    )
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

pub fn main_heading(input: &CheckInput<'_>) -> Verdict {
    let title = input.layout.title;
    Verdict::from_bool(
        extract::find_heading(input.text, input.layout.title_aliases).is_some(),
        format!("'{title}' heading present"),
        format!("'{title}' heading not found"),
    )
}

#[must_use]
pub fn subsection_heading(input: &CheckInput<'_>, key: &str) -> Verdict {
    let title = subsection_title(input, key);
    Verdict::from_bool(
        extract::find_heading(input.text, input.layout.aliases(key)).is_some(),
        format!("'{title}' subsection heading present"),
        format!("'{title}' subsection heading not found"),
    )
}

pub fn word_count_in_band(input: &CheckInput<'_>) -> Verdict {
    let band = input.layout.word_band;
    let words = text::word_count(input.text);
    Verdict::from_bool(
        band.contains(words),
        format!("Word count {words} within {}-{}", band.min, band.max),
        format!("Word count {words} outside {}-{}", band.min, band.max),
    )
}

/// Out-of-band paragraph counts degrade to a warning, never a failure.
pub fn paragraph_count_in_band(input: &CheckInput<'_>) -> Verdict {
    let count = text::paragraphs(input.text).len();
    match input.layout.paragraph_band {
        Some(band) if band.contains(count) => {
            Verdict::pass(format!("{count} paragraphs within {}-{}", band.min, band.max))
        }
        Some(band) => Verdict::warn(format!(
            "{count} paragraphs outside the recommended {}-{}",
            band.min, band.max
        )),
        None => Verdict::pass(format!("{count} paragraphs")),
    }
}

pub fn tabular_data(input: &CheckInput<'_>) -> Verdict {
    let rows = text::label_value_rows(input.text);
    if text::has_table(input.text) {
        Verdict::pass("Tabular data present")
    } else if rows >= 3 {
        Verdict::pass(format!("{rows} label/value rows present"))
    } else {
        Verdict::fail("No table or structured label/value rows found")
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

pub fn no_informal_phrases(input: &CheckInput<'_>) -> Verdict {
    let found: Vec<String> = INFORMAL
        .find_iter(input.text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    if found.is_empty() {
        Verdict::pass("Professional tone maintained")
    } else {
        Verdict::fail(format!("Informal phrases found: {}", found.join(", ")))
    }
}

pub fn capitalisation(input: &CheckInput<'_>) -> Verdict {
    let issues = text::lowercase_sentence_starts(input.text);
    if issues <= 2 {
        Verdict::pass(format!("{issues} capitalisation issues"))
    } else {
        Verdict::warn(format!("{issues} sentences start with a lowercase letter"))
    }
}

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

pub fn scheme_named(input: &CheckInput<'_>) -> Verdict {
    let named = text::contains_any(input.text, SCHEME_TERMS)
        || input
            .facts
            .grant_scheme()
            .is_some_and(|scheme| text::contains_any(input.text, &[scheme]));
    Verdict::from_bool(
        named,
        "Grant scheme referenced",
        "Grant scheme (MSE-CDP) must be explicitly mentioned",
    )
}

/// Grant percentage in range AND grant/subsidy mentioned.
///
/// The figure comes from the metrics when present, otherwise from the text (see
/// [`stated_grant`]).
pub fn grant_in_range(input: &CheckInput<'_>) -> Verdict {
    let bounds = input.bounds;
    let (min, max) = (bounds.grant_pct_min, bounds.grant_pct_max);

    let stated = input
        .metrics
        .and_then(|m| m.grant_percentage)
        .or_else(|| stated_grant(input.text));
    let Some(pct) = stated else {
        return Verdict::fail("Grant percentage not available");
    };
    if !bounds.grant_within_range(pct) {
        return Verdict::fail(format!("Grant percentage {pct}% outside {min}-{max}%"));
    }
    if !text::contains_any(input.text, GRANT_TERMS) {
        return Verdict::fail(format!("Grant of {pct}% is in range but not stated in the text"));
    }
    Verdict::pass(format!("Grant {pct}% within {min}-{max}%"))
}

/// The grant figure written in `text`: on the first line that mentions a grant
/// or subsidy and carries a single percentage, the first percentage after the
/// term, else the nearest one before it. Range notation never counts.
fn stated_grant(text: &str) -> Option<f64> {
    text.lines().find_map(|line| {
        let lower = line.to_ascii_lowercase();
        let anchor = GRANT_TERMS.iter().filter_map(|term| lower.find(term)).min()?;
        let figures = text::stated_percentages(line);
        figures
            .iter()
            .find(|(at, _)| *at >= anchor)
            .or_else(|| figures.iter().rev().find(|(at, _)| *at < anchor))
            .map(|(_, pct)| *pct)
    })
}

/// Project cost at most the ceiling AND cost mentioned.
pub fn cost_within_ceiling(input: &CheckInput<'_>) -> Verdict {
    let Some(cost) = input.facts.project_cost else {
        return Verdict::fail("Project cost not available");
    };
    let ceiling = input.bounds.max_project_cost;
    if !input.bounds.cost_within_ceiling(cost) {
        return Verdict::fail(format!(
            "Project cost {} exceeds ceiling {}",
            format_crore(cost),
            format_crore(ceiling)
        ));
    }
    if !text::contains_any(input.text, &["cost"]) {
        return Verdict::fail("Project cost within ceiling but not stated in the text");
    }
    Verdict::pass(format!(
        "Project cost {} within ceiling {}",
        format_crore(cost),
        format_crore(ceiling)
    ))
}

/// Shared shape of the metric-bound checks.
fn metric_check(
    input: &CheckInput<'_>,
    label: &str,
    value: Option<f64>,
    within: impl Fn(f64) -> bool,
    bound: &str,
    terms: &[&str],
) -> Verdict {
    let Some(value) = value else {
        return Verdict::fail(format!("{label} not available"));
    };
    if !within(value) {
        return Verdict::fail(format!("{label} {value} does not meet {bound}"));
    }
    if !text::contains_any(input.text, terms) {
        return Verdict::fail(format!("{label} {value} meets {bound} but is not mentioned in the text"));
    }
    Verdict::pass(format!("{label} {value} meets {bound}"))
}

pub fn dscr_above_floor(input: &CheckInput<'_>) -> Verdict {
    let bounds = input.bounds;
    metric_check(
        input,
        "DSCR",
        input.metrics.and_then(|m| m.dscr),
        |v| bounds.dscr_ok(v),
        &format!("> {}", bounds.min_dscr),
        &["dscr", "debt service coverage"],
    )
}

pub fn breakeven_below_ceiling(input: &CheckInput<'_>) -> Verdict {
    let bounds = input.bounds;
    metric_check(
        input,
        "Break-even",
        input.metrics.and_then(|m| m.breakeven_pct),
        |v| bounds.breakeven_ok(v),
        &format!("< {}%", bounds.max_breakeven_pct),
        &["break-even", "breakeven", "break even"],
    )
}

/// Break-even bound, accepting capacity-utilisation wording as the mention.
pub fn breakeven_utilisation(input: &CheckInput<'_>) -> Verdict {
    let bounds = input.bounds;
    metric_check(
        input,
        "Break-even",
        input.metrics.and_then(|m| m.breakeven_pct),
        |v| bounds.breakeven_ok(v),
        &format!("< {}%", bounds.max_breakeven_pct),
        &[
            "break-even",
            "breakeven",
            "capacity utilisation",
            "capacity utilization",
        ],
    )
}

pub fn npv_positive(input: &CheckInput<'_>) -> Verdict {
    let bounds = input.bounds;
    metric_check(
        input,
        "NPV",
        input.metrics.and_then(|m| m.npv),
        |v| bounds.npv_ok(v),
        &format!("> {}", bounds.min_npv),
        &["npv", "net present value"],
    )
}

pub fn irr_above_floor(input: &CheckInput<'_>) -> Verdict {
    let bounds = input.bounds;
    metric_check(
        input,
        "IRR",
        input.metrics.and_then(|m| m.irr),
        |v| bounds.irr_ok(v),
        &format!("> {}%", bounds.min_irr_pct),
        &["irr", "internal rate of return"],
    )
}

/// Completeness is often implicit in a summary, so absence only warns.
pub fn completeness_reference(input: &CheckInput<'_>) -> Verdict {
    if text::contains_any(input.text, COMPLETENESS_TERMS) {
        Verdict::pass("Comprehensive DPR coverage indicated")
    } else {
        Verdict::warn("No explicit completeness reference; implicit reference accepted")
    }
}

pub fn implementing_entity(input: &CheckInput<'_>) -> Verdict {
    Verdict::from_bool(
        text::contains_any(input.text, IMPLEMENTING_ENTITY_TERMS),
        "Implementing entity (SPV) referenced",
        "SPV or implementing entity must be mentioned",
    )
}

pub fn timeline(input: &CheckInput<'_>) -> Verdict {
    Verdict::from_bool(
        TIMELINE.is_match(input.text),
        "Implementation timeline stated",
        "Implementation timeline must be stated",
    )
}

pub fn approving_authority(input: &CheckInput<'_>) -> Verdict {
    Verdict::from_bool(
        text::contains_any(input.text, APPROVAL_AUTHORITY_TERMS),
        "State government approval referenced",
        "State government approval must be mentioned",
    )
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

const SENTENCE_LENGTH_MIN: f64 = 12.0;
const SENTENCE_LENGTH_MAX: f64 = 30.0;
const MIN_SENTENCE_BUCKETS: usize = 3;
const MAX_PASSIVE_RATIO: f64 = 0.3;
const MIN_DOMAIN_SYMBOLS: usize = 2;

const QUALITY_IDS: [[&str; 6]; 3] = [
    ["Q1.1", "Q1.2", "Q1.3", "Q1.4", "Q1.5", "Q1.6"],
    ["Q2.1", "Q2.2", "Q2.3", "Q2.4", "Q2.5", "Q2.6"],
    ["Q3.1", "Q3.2", "Q3.3", "Q3.4", "Q3.5", "Q3.6"],
];

pub fn sentence_length(input: &CheckInput<'_>) -> Verdict {
    let avg = text::average_sentence_length(input.text);
    Verdict::from_bool(
        (SENTENCE_LENGTH_MIN..=SENTENCE_LENGTH_MAX).contains(&avg),
        format!("Average sentence length {avg:.1} words"),
        format!(
            "Average sentence length {avg:.1} words outside {SENTENCE_LENGTH_MIN}-{SENTENCE_LENGTH_MAX}"
        ),
    )
}

pub fn sentence_variety(input: &CheckInput<'_>) -> Verdict {
    let buckets = text::sentence_bucket_count(input.text);
    Verdict::from_bool(
        buckets >= MIN_SENTENCE_BUCKETS,
        format!("{buckets} sentence-length groups"),
        format!("Only {buckets} sentence-length groups (minimum {MIN_SENTENCE_BUCKETS})"),
    )
}

#[allow(clippy::cast_precision_loss)]
pub fn passive_voice(input: &CheckInput<'_>) -> Verdict {
    let sentences = text::sentences(input.text).len();
    if sentences == 0 {
        return Verdict::fail("No sentences to assess");
    }
    let ratio = text::passive_indicator_count(input.text) as f64 / sentences as f64;
    Verdict::from_bool(
        ratio < MAX_PASSIVE_RATIO,
        format!("Passive-voice ratio {ratio:.2}"),
        format!("Passive-voice ratio {ratio:.2} at or above {MAX_PASSIVE_RATIO}"),
    )
}

pub fn domain_symbols(input: &CheckInput<'_>) -> Verdict {
    let used = [
        input.text.contains('₹'),
        text::contains_any(input.text, FACILITY_SYMBOL_TERMS),
        text::contains_any(input.text, &SCHEME_TERMS[..2]),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    Verdict::from_bool(
        used >= MIN_DOMAIN_SYMBOLS,
        format!("{used} of 3 domain symbols used (₹, CFC, MSE-CDP)"),
        format!("Only {used} of 3 domain symbols used (₹, CFC, MSE-CDP)"),
    )
}

pub fn heading_markers(input: &CheckInput<'_>) -> Verdict {
    let markers = text::heading_marker_count(input.text);
    let required = input.layout.subsections.len();
    Verdict::from_bool(
        markers >= required,
        format!("{markers} '##' heading markers"),
        format!("Only {markers} '##' heading markers (minimum {required})"),
    )
}

pub fn no_placeholders(input: &CheckInput<'_>) -> Verdict {
    let found = text::placeholders(input.text);
    if found.is_empty() {
        Verdict::pass("No unresolved placeholders")
    } else {
        Verdict::fail(format!("Unresolved placeholders: {}", found.join(", ")))
    }
}

/// The six Quality checks, identified for `section`.
#[must_use]
pub fn quality_definitions(section: SectionType) -> Vec<CheckDefinition> {
    let ids = QUALITY_IDS[usize::from(section.ordinal() - 1)];
    vec![
        CheckDefinition::rule(
            ids[0],
            "Average sentence length",
            Tier::Quality,
            Severity::Medium,
            "Keep sentences between 12 and 30 words on average",
            sentence_length,
        ),
        CheckDefinition::rule(
            ids[1],
            "Sentence variety",
            Tier::Quality,
            Severity::Low,
            "Mix short and long sentences",
            sentence_variety,
        ),
        CheckDefinition::rule(
            ids[2],
            "Active voice",
            Tier::Quality,
            Severity::Low,
            "Prefer active voice",
            passive_voice,
        ),
        CheckDefinition::rule(
            ids[3],
            "Consistent domain terminology",
            Tier::Quality,
            Severity::Medium,
            "Use ₹ for amounts and the CFC and MSE-CDP acronyms consistently",
            domain_symbols,
        ),
        CheckDefinition::rule(
            ids[4],
            "Heading structure",
            Tier::Quality,
            Severity::Medium,
            "Use '##' headings for every subsection",
            heading_markers,
        ),
        CheckDefinition::rule(
            ids[5],
            "No template placeholders",
            Tier::Quality,
            Severity::Medium,
            "Replace every unresolved template placeholder with project data",
            no_placeholders,
        ),
    ]
}
