use anyhow::Result;
use tracing::info;

use ergo_tracker::config::Config;
use ergo_tracker::logging::init_tracing;
use ergo_tracker::pipeline;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);
    init_tracing(&config.logging)?;

    info!("Ergo Tracker ({})", env!("GIT_VERSION"));

    let summary = pipeline::run(&config)?;
    info!(
        assessed = summary.assessed,
        skipped = summary.skipped,
        "done"
    );
    Ok(())
}
