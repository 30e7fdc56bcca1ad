use std::fs;

use tracing::{debug, info};

use crate::core::{
    DistributionSummary, ModelConfig, WealthPopulation, build_curves, population_distributions,
};
use crate::error::Result;
use crate::render::{inject_dark_mode, render_line_charts, render_violin_plot};

/// Builds both charts for `config` and returns the per-amount population summaries.
pub fn run(config: &ModelConfig) -> Result<Vec<DistributionSummary>> {
    config.validate()?;
    let resolved = serde_json::to_string(config)?;
    debug!(config = %resolved, "Resolved model configuration");

    fs::create_dir_all(&config.output.dir)?;

    let curves = build_curves(config);
    let line_path = config.output.line_chart_path();
    render_line_charts(&line_path, &curves)?;
    inject_dark_mode(&line_path)?;
    info!(path = %line_path.display(), "Saved line charts");

    let population = WealthPopulation::simulate(&config.population)?;
    info!(
        people = population.len(),
        seed = population.seed(),
        "Simulated wealth population"
    );

    let distributions =
        population_distributions(&config.pricing, &population, &config.population.amounts);
    for dist in &distributions {
        let summary = serde_json::to_string(&dist.summary)?;
        info!(%summary, "Population valuation for X={}", dist.label);
    }

    let violin_path = config.output.violin_path();
    render_violin_plot(&violin_path, &distributions)?;
    inject_dark_mode(&violin_path)?;
    info!(path = %violin_path.display(), "Saved violin plot");

    Ok(distributions.into_iter().map(|d| d.summary).collect())
}
