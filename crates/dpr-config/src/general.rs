//! Driver defaults.

use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "narrative".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory holding generated section files, used when `--path` is omitted.
    #[serde(default)]
    pub input_dir: String,

    /// Project facts file (TOML or JSON), used when `--facts` is omitted.
    #[serde(default)]
    pub facts_file: String,

    /// Financial metrics file (TOML or JSON), used when `--metrics` is omitted.
    #[serde(default)]
    pub metrics_file: String,

    /// Output format when `--format` is omitted ("json", "narrative", or "table").
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            input_dir: String::new(),
            facts_file: String::new(),
            metrics_file: String::new(),
            default_format: default_format(),
        }
    }
}
