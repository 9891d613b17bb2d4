pub mod catalog;
pub mod schema;
pub mod validate;

use dpr_config::DprConfig;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &DprConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Validate(args) => validate::handle(&args, config, flags).await,
        Commands::Catalog(args) => catalog::handle(&args, flags),
        Commands::Schema => schema::handle(),
    }
}
