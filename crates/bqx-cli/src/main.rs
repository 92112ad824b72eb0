//! bqx - render a templated BigQuery query and export its result to GCS

use anyhow::Result;
use bqx_export::{prepare_job, ExportError, ExportPipeline};
use clap::Parser;
use env_logger::Env;

mod cli;
mod context;

use cli::Cli;
use context::RuntimeContext;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    // Template errors must surface before any warehouse call
    let invocation = context::job_invocation(cli)?;
    let job = prepare_job(&invocation)?;

    let ctx = RuntimeContext::new(cli).await?;
    let pipeline = ExportPipeline::new(ctx.warehouse.as_ref(), &ctx.config);
    log::debug!(
        "running on {} in project {}",
        pipeline.warehouse_type(),
        ctx.config.execution_project
    );

    match pipeline.run(&job).await {
        Ok(outcome) => {
            log::info!(
                "exported {} to {}",
                outcome.staging_table,
                outcome.destination_uri
            );
            Ok(())
        }
        Err(e) => {
            if let ExportError::Extract { table, .. } = &e {
                log::warn!("staging table {} was kept", table);
            }
            log::debug!("pipeline failed after {}", e.failed_after());
            Err(e.into())
        }
    }
}
