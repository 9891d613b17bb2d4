use dpr_core::ValidationReport;
use schemars::schema_for;

use crate::output;

/// Handle `dprv schema`: the JSON Schema of one section report.
pub fn handle() -> anyhow::Result<()> {
    output::output(&schema_json()?);
    Ok(())
}

fn schema_json() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&schema_for!(ValidationReport))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_describes_report_fields() {
        let schema: serde_json::Value =
            serde_json::from_str(&schema_json().unwrap()).expect("schema is json");
        let properties = &schema["properties"];
        for field in ["overall_score", "grade", "ready_for_submission", "tiers", "issues"] {
            assert!(properties[field].is_object(), "{field}");
        }
    }
}
