use std::sync::Arc;

use anyhow::{Context, bail};
use dpr_config::DprConfig;
use dpr_engine::{CheckCatalog, HttpOracle, OracleSettings, ValidationRequest, Validator};

use crate::cli::{GlobalFlags, ValidateArgs};
use crate::driver;
use crate::output;

/// Handle `dprv validate`.
///
/// Scores never affect the exit status; only input errors do.
pub async fn handle(
    args: &ValidateArgs,
    config: &DprConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let requests = collect_requests(args, config)?;
    let validator = build_validator(config, args.no_oracle)?;

    tracing::info!(sections = requests.len(), "validating");
    let reports = validator.validate_all(&requests).await;

    let rendered = output::render_validation(&reports, flags.format, output::table_options())?;
    output::output(&rendered);
    Ok(())
}

fn collect_requests(args: &ValidateArgs, config: &DprConfig) -> anyhow::Result<Vec<ValidationRequest>> {
    let sections = args.section.section_types();
    let mut requests = Vec::new();

    if args.source.includes_real() {
        let Some(dir) = driver::pick_path(args.path.as_deref(), &config.general.input_dir) else {
            bail!("--path is required for --source real|both (or set general.input_dir)");
        };
        let facts = driver::load_facts(driver::pick_path(
            args.facts.as_deref(),
            &config.general.facts_file,
        ))?;
        let metrics = driver::load_metrics(driver::pick_path(
            args.metrics.as_deref(),
            &config.general.metrics_file,
        ))?;
        requests.extend(driver::load_sections(dir, &sections, &facts, metrics)?);
    }

    if args.source.includes_mock() {
        requests.extend(driver::mock_sections(&sections));
    }

    Ok(requests)
}

fn build_validator(config: &DprConfig, no_oracle: bool) -> anyhow::Result<Validator> {
    let validator = Validator::new(
        CheckCatalog::standard(),
        config.scoring.clone(),
        config.policy,
    );
    if no_oracle || !config.oracle.is_configured() {
        return Ok(validator);
    }

    let oracle = HttpOracle::new(&config.oracle).context("failed to build oracle client")?;
    tracing::debug!(endpoint = %config.oracle.endpoint, "semantic oracle enabled");
    Ok(validator.with_oracle(Arc::new(oracle), OracleSettings::from_config(&config.oracle)))
}
