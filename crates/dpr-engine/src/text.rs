//! Plain-text measurements used by Structure, Content, and Quality checks.
//!
//! Everything here is a pure function of its input. Sentence splitting is the
//! deliberately simple `.`-split heuristic; it miscounts decimals such as
//! `₹8.2 crore`, and the Quality bands are calibrated against that behaviour.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::extract;

/// Phrases counted as passive-voice indicators.
pub const PASSIVE_INDICATORS: &[&str] = &[
    "is being",
    "was being",
    "will be",
    "has been",
    "have been",
    "had been",
];

static CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:₹|\brs\.?|\binr)\s*\d|\d[\d,]*(?:\.\d+)?\s*(?:crore|lakh)")
        .expect("currency pattern compiles")
});

static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("percentage pattern compiles"));

static PERCENTAGE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*%?\s*(?:-|–|to)\s*\d+(?:\.\d+)?\s*%")
        .expect("percentage range pattern compiles")
});

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("digit pattern compiles"));

static TABLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|?\s*:?-{3,}:?\s*(?:\|\s*:?-{3,}:?\s*)*\|?$").expect("table separator compiles")
});

static LABEL_VALUE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-*]\s+\*\*[^*]+\*\*\s*:?\s*\S").expect("label row pattern compiles")
});

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{[a-z_][a-z0-9_]*\}|\[insert|\bTBD\b|lorem ipsum|\bXXX+\b")
        .expect("placeholder pattern compiles")
});

/// Whitespace-separated word count.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Blank-line separated blocks, excluding blocks that start with a heading marker.
#[must_use]
pub fn paragraphs(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
        .into_iter()
        .map(|block| block.trim().to_string())
        .filter(|block| !block.is_empty() && !block.starts_with('#'))
        .collect()
}

/// Non-empty `.`-separated fragments, trimmed.
#[must_use]
pub fn sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Total words divided by sentence count; `0.0` for text without sentences.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_sentence_length(text: &str) -> f64 {
    let count = sentences(text).len();
    if count == 0 {
        return 0.0;
    }
    word_count(text) as f64 / count as f64
}

/// Number of distinct 5-word length buckets across sentences.
#[must_use]
pub fn sentence_bucket_count(text: &str) -> usize {
    sentences(text)
        .iter()
        .map(|sentence| word_count(sentence) / 5)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Occurrences of [`PASSIVE_INDICATORS`] (case-insensitive).
#[must_use]
pub fn passive_indicator_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    PASSIVE_INDICATORS
        .iter()
        .map(|indicator| lower.matches(indicator).count())
        .sum()
}

/// Sentences (by the `.` heuristic) that start with a lowercase letter.
#[must_use]
pub fn lowercase_sentence_starts(text: &str) -> usize {
    sentences(text)
        .iter()
        .filter(|sentence| sentence.chars().next().is_some_and(char::is_lowercase))
        .count()
}

/// How many of `keywords` occur in `text` (case-insensitive, each counted once).
#[must_use]
pub fn count_keywords(text: &str, keywords: &[&str]) -> usize {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| lower.contains(&keyword.to_lowercase()))
        .count()
}

/// Whether any of `keywords` occurs in `text` (case-insensitive).
#[must_use]
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    count_keywords(text, keywords) > 0
}

/// Whether `text` contains a currency amount (`₹`, `Rs.`, `INR`, crore/lakh).
#[must_use]
pub fn has_currency(text: &str) -> bool {
    CURRENCY.is_match(text)
}

/// Every percentage value written as `NN%` or `NN.N%`.
#[must_use]
pub fn percentages(text: &str) -> Vec<f64> {
    PERCENTAGE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|value| value.as_str().parse::<f64>().ok())
        .collect()
}

/// Single percentages with their byte offsets, skipping range notation such as
/// `60-80%` or `60% to 80%`.
#[must_use]
pub fn stated_percentages(text: &str) -> Vec<(usize, f64)> {
    let ranges: Vec<_> = PERCENTAGE_RANGE.find_iter(text).map(|found| found.range()).collect();
    PERCENTAGE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter(|value| !ranges.iter().any(|range| range.contains(&value.start())))
        .filter_map(|value| value.as_str().parse::<f64>().ok().map(|pct| (value.start(), pct)))
        .collect()
}

/// Whether `text` contains a currency-formatted or percentage-formatted figure.
#[must_use]
pub fn has_quantity(text: &str) -> bool {
    has_currency(text) || PERCENTAGE.is_match(text)
}

/// Whether `text` contains any digit.
#[must_use]
pub fn has_number(text: &str) -> bool {
    DIGIT.is_match(text)
}

/// Whether `text` contains a markdown pipe table (a `|` row followed by a separator row).
#[must_use]
pub fn has_table(text: &str) -> bool {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    lines
        .windows(2)
        .any(|pair| pair[0].starts_with('|') && TABLE_SEPARATOR.is_match(pair[1]))
}

/// Count of `- **Label:** value` rows.
#[must_use]
pub fn label_value_rows(text: &str) -> usize {
    text.lines().filter(|line| LABEL_VALUE_ROW.is_match(line)).count()
}

/// Count of heading lines at level two or deeper (`##` through `######`).
///
/// Bold-line headings and `##` inside prose are not counted.
#[must_use]
pub fn heading_marker_count(text: &str) -> usize {
    extract::headings(text)
        .iter()
        .filter(|heading| (2..extract::BOLD_HEADING_RANK).contains(&heading.rank))
        .count()
}

/// Unresolved template placeholders such as `{project_overview}` or `TBD`.
#[must_use]
pub fn placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect()
}
