use anyhow::Context;

use shopseed_installer::{build_app, RUNS_VAR};
use shopseed_setup::InstallerConfig;

fn main() -> anyhow::Result<()> {
    shopseed_observability::init();

    let config = InstallerConfig::load().context("failed to load installer configuration")?;
    let runs = match std::env::var(RUNS_VAR) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{RUNS_VAR} must be a non-negative integer, got {raw:?}"))?,
        Err(_) => 1,
    };

    let app = build_app(&config)?;
    let mut summaries = Vec::with_capacity(runs);
    for pass in 1..=runs {
        tracing::info!(pass, "running installer");
        summaries.push(app.install().with_context(|| format!("installer pass {pass} failed"))?);
    }

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
