#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned plain-text table. Numeric cells are right-aligned.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let cell = pad(&truncate(value, *width), *width, looks_numeric(value));
                if options.color {
                    colorize(value, cell)
                } else {
                    cell
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Shrink the widest columns until the table fits `max_width`.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(6))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Wrap a padded cell in an ANSI color chosen from its raw value.
fn colorize(value: &str, cell: String) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "pass" | "excellent" | "good" | "yes" | "true" => "32",
        "acceptable" | "warn" | "indeterminate" => "33",
        "needs_improvement" | "poor" | "fail" | "no" | "false" | "critical" => "31",
        _ => return cell,
    };
    format!("\u{1b}[{code}m{cell}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align() {
        let rows = vec![
            vec!["executive_summary".to_string(), "87.5".to_string(), "A-".to_string()],
            vec!["financial_plan".to_string(), "100.0".to_string(), "A+".to_string()],
        ];
        let table = render_table(&["section", "score", "grade"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "section            score  grade");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "executive_summary   87.5  A-");
        assert_eq!(lines[3], "financial_plan     100.0  A+");
    }

    #[test]
    fn wide_cells_are_truncated_to_fit() {
        let rows = vec![vec!["a".repeat(40), "x".to_string()]];
        let options = TableOptions {
            max_width: Some(20),
            ..PLAIN
        };
        let table = render_table(&["name", "v"], &rows, options);
        let row = table.lines().nth(2).expect("data row");
        assert!(row.contains('…'));
        assert!(row.chars().count() <= 20);
    }

    #[test]
    fn color_wraps_known_statuses() {
        let rows = vec![vec!["PASS".to_string(), "other".to_string()]];
        let options = TableOptions {
            color: true,
            ..PLAIN
        };
        let table = render_table(&["status", "note"], &rows, options);
        assert!(table.contains("\u{1b}[32mPASS"));
        assert!(!table.contains("\u{1b}[32mother"));
    }
}
