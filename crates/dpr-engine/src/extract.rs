//! Structural extractor: heading detection and subsection slicing.
//!
//! Two heading dialects are recognised:
//!
//! ```text
//! ## Funding Structure        ATX heading, rank = number of '#'
//! **Funding Structure:**      whole-line bold heading, rank 7
//! ```
//!
//! A subsection runs from the line after its heading to the next heading of
//! equal or higher rank (lower or equal number), or the end of the text. Nothing
//! in this module panics or errors; an absent heading yields an empty string.

use std::sync::LazyLock;

use regex::Regex;

/// Rank assigned to whole-line bold headings (below every ATX level).
pub const BOLD_HEADING_RANK: u8 = 7;

static ENUMERATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+(?:\.\d+)*\.?|[A-Za-z][.)]|[ivxIVX]+[.)])\s+")
        .expect("enumeration pattern compiles")
});

/// A heading line found in section text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Zero-based line index.
    pub line: usize,
    pub rank: u8,
    /// Normalised title (lowercase, no markers, no enumeration).
    pub title: String,
}

/// Parse one line as a heading, returning its rank and raw title.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        let rest = &trimmed[hashes..];
        if hashes > 6 || !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
            return None;
        }
        let title = rest.trim().trim_end_matches('#').trim();
        let rank = u8::try_from(hashes).ok()?;
        return Some((rank, title));
    }

    let unpunctuated = trimmed.trim_end_matches(':');
    if unpunctuated.len() > 4 && unpunctuated.starts_with("**") && unpunctuated.ends_with("**") {
        let inner = &unpunctuated[2..unpunctuated.len() - 2];
        if !inner.trim().is_empty() && !inner.contains("**") {
            return Some((BOLD_HEADING_RANK, inner));
        }
    }

    None
}

/// Normalise a heading title or alias for comparison.
#[must_use]
pub fn normalize_title(raw: &str) -> String {
    let unbolded = raw.replace("**", "");
    let trimmed = unbolded.trim();
    let unnumbered = ENUMERATION.replace(trimmed, "");
    let unpunctuated = unnumbered.trim().trim_end_matches(':');
    unpunctuated
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Every heading in `text`, in document order.
#[must_use]
pub fn headings(text: &str) -> Vec<Heading> {
    text.lines()
        .enumerate()
        .filter_map(|(line, content)| {
            parse_heading(content).map(|(rank, title)| Heading {
                line,
                rank,
                title: normalize_title(title),
            })
        })
        .collect()
}

/// Heading for the first alias that matches anywhere in `text`.
///
/// Aliases are tried in order, so the canonical title wins over a looser
/// alternative found earlier in the document. Within one alias, an ATX heading
/// beats a bold line; ties go to the earliest line. A match means the
/// normalised title starts with the normalised alias.
#[must_use]
pub fn find_heading(text: &str, aliases: &[&str]) -> Option<Heading> {
    let all = headings(text);
    aliases
        .iter()
        .map(|alias| normalize_title(alias))
        .filter(|alias| !alias.is_empty())
        .find_map(|alias| {
            all.iter()
                .filter(|heading| heading.title.starts_with(alias.as_str()))
                .min_by_key(|heading| (heading.rank == BOLD_HEADING_RANK, heading.line))
                .cloned()
        })
}

/// Body of the first subsection matching `aliases`, trimmed; `""` when absent.
#[must_use]
pub fn extract_subsection(text: &str, aliases: &[&str]) -> String {
    let Some(heading) = find_heading(text, aliases) else {
        return String::new();
    };

    let body: Vec<&str> = text
        .lines()
        .skip(heading.line + 1)
        .take_while(|line| parse_heading(line).is_none_or(|(rank, _)| rank > heading.rank))
        .collect();

    body.join("\n").trim().to_string()
}

/// Drop every line before the first heading of either dialect. Text without one
/// is returned unchanged.
#[must_use]
pub fn strip_preamble(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if parse_heading(line).is_some() {
            return &text[offset..];
        }
        offset += line.len();
    }
    text
}
