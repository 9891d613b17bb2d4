use std::fmt::Write as _;

use dpr_core::{SectionType, Severity, Tier};
use dpr_engine::{CheckCatalog, CheckRule};
use serde::Serialize;

use crate::cli::{CatalogArgs, GlobalFlags, OutputFormat};
use crate::output::{self, table};

#[derive(Debug, Serialize)]
struct CatalogEntry {
    section: SectionType,
    id: &'static str,
    tier: Tier,
    severity: Severity,
    name: &'static str,
    oracle: bool,
}

/// Handle `dprv catalog`.
pub fn handle(args: &CatalogArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = CheckCatalog::standard();
    let entries = entries(&catalog, &args.section.section_types());
    output::output(&render(&entries, flags.format, output::table_options())?);
    Ok(())
}

fn entries(catalog: &CheckCatalog, sections: &[SectionType]) -> Vec<CatalogEntry> {
    sections
        .iter()
        .flat_map(|&section| {
            catalog.section(section).map(move |definition| CatalogEntry {
                section,
                id: definition.id,
                tier: definition.tier,
                severity: definition.severity,
                name: definition.name,
                oracle: matches!(definition.rule, CheckRule::Oracle(_)),
            })
        })
        .collect()
}

fn render(
    entries: &[CatalogEntry],
    format: OutputFormat,
    options: table::TableOptions,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|entry| {
                    vec![
                        entry.section.to_string(),
                        entry.id.to_string(),
                        entry.tier.to_string(),
                        entry.severity.to_string(),
                        entry.name.to_string(),
                    ]
                })
                .collect();
            Ok(table::render_table(
                &["section", "id", "tier", "severity", "name"],
                &rows,
                options,
            ))
        }
        OutputFormat::Narrative => {
            let mut out = String::new();
            let mut current = None;
            for entry in entries {
                if current != Some(entry.section) {
                    let _ = writeln!(out, "## {}\n", entry.section.display_name());
                    current = Some(entry.section);
                }
                let oracle = if entry.oracle { " (oracle)" } else { "" };
                let _ = writeln!(
                    out,
                    "- `{}` {} [{}] {}{oracle}",
                    entry.id,
                    entry.tier.label(),
                    entry.severity,
                    entry.name
                );
            }
            Ok(out)
        }
    }
}
