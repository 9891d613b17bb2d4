use clap::{Args, Subcommand, ValueEnum};
use dpr_core::SectionType;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate section files and/or the built-in mock sections.
    Validate(ValidateArgs),
    /// List the registered checks.
    Catalog(CatalogArgs),
    /// Print the JSON Schema of a section report.
    Schema,
}

/// Which section types to process.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SectionArg {
    #[default]
    All,
    ExecutiveSummary,
    FinancialPlan,
    TechnicalFeasibility,
}

impl SectionArg {
    /// Selected section types, in document order.
    #[must_use]
    pub fn section_types(self) -> Vec<SectionType> {
        match self {
            Self::All => SectionType::ALL.to_vec(),
            Self::ExecutiveSummary => vec![SectionType::ExecutiveSummary],
            Self::FinancialPlan => vec![SectionType::FinancialPlan],
            Self::TechnicalFeasibility => vec![SectionType::TechnicalFeasibility],
        }
    }
}

/// Where section text comes from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SourceArg {
    /// Section files under `--path`.
    #[default]
    Real,
    /// Built-in regression fixtures.
    Mock,
    /// Both of the above.
    Both,
}

impl SourceArg {
    #[must_use]
    pub const fn includes_real(self) -> bool {
        matches!(self, Self::Real | Self::Both)
    }

    #[must_use]
    pub const fn includes_mock(self) -> bool {
        matches!(self, Self::Mock | Self::Both)
    }
}

#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Section type to validate.
    #[arg(long, value_enum, default_value_t = SectionArg::All)]
    pub section: SectionArg,

    /// Input source.
    #[arg(long, value_enum, default_value_t = SourceArg::Real)]
    pub source: SourceArg,

    /// Directory holding the section files (defaults to `general.input_dir`).
    #[arg(long)]
    pub path: Option<String>,

    /// Project facts file, TOML or JSON.
    #[arg(long)]
    pub facts: Option<String>,

    /// Financial metrics file, TOML or JSON.
    #[arg(long)]
    pub metrics: Option<String>,

    /// Skip the semantic oracle even when configured.
    #[arg(long)]
    pub no_oracle: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CatalogArgs {
    /// Section type to list.
    #[arg(long, value_enum, default_value_t = SectionArg::All)]
    pub section: SectionArg,
}
