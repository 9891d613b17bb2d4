use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{CatalogArgs, Commands, SectionArg, SourceArg, ValidateArgs};

/// Top-level CLI parser for the `dprv` binary.
#[derive(Debug, Parser)]
#[command(name = "dprv", version, about = "Validate and score generated DPR sections")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, narrative, table (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Global flags, with the configured default format filling in a missing `--format`.
    #[must_use]
    pub fn global_flags(&self, default_format: &str) -> GlobalFlags {
        GlobalFlags {
            format: self
                .format
                .or_else(|| OutputFormat::from_config(default_format))
                .unwrap_or(OutputFormat::Narrative),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
