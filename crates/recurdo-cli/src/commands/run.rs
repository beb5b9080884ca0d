use anyhow::Result;
use tracing::info;

use crate::commands::build_engine;
use crate::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    info!("Updating all tasks due before {}", engine.cutoff());

    let summary = engine.run_until_converged().await?;
    info!(
        passes = summary.passes,
        "Done: processed {} labeled task(s)", summary.processed
    );
    Ok(())
}
