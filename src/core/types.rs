use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Result, TicketError};

/// Constants of the two pricing models.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingParams {
    /// Expected total payout as a multiple of the guaranteed amount.
    pub expected_multiple: f64,
    /// Stake multiple inside the log-utility certainty equivalent, `sqrt(W(W + m·X)) - W`.
    pub utility_stake_multiple: f64,
    /// Reference buyer wealth for the market price approximation.
    pub median_wealth: f64,
    /// Demand erosion as `X` grows relative to `median_wealth`.
    pub elasticity: f64,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            expected_multiple: 50.0,
            utility_stake_multiple: 100.0,
            median_wealth: 100_000.0,
            elasticity: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveGrid {
    pub min_exponent: f64,
    pub max_exponent: f64,
    pub points: usize,
}

impl Default for CurveGrid {
    fn default() -> Self {
        Self {
            min_exponent: 1.0,
            max_exponent: 7.0,
            points: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthLevel {
    pub label: String,
    pub wealth: f64,
}

impl WealthLevel {
    pub fn new(wealth: f64) -> Self {
        Self {
            label: dollar_label(wealth),
            wealth,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedAmount {
    pub label: String,
    pub amount: f64,
}

impl GuaranteedAmount {
    pub fn new(amount: f64) -> Self {
        Self {
            label: dollar_label(amount),
            amount,
        }
    }
}

/// Synthetic buyer population: `ln W ~ Normal(log_mean, log_std)`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationParams {
    pub size: usize,
    pub log_mean: f64,
    pub log_std: f64,
    pub seed: u64,
    pub amounts: Vec<GuaranteedAmount>,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            size: 50_000,
            // ln($60K) ~= 11.0
            log_mean: 11.0,
            log_std: 1.2,
            seed: 42,
            amounts: [100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
                .into_iter()
                .map(GuaranteedAmount::new)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputParams {
    pub dir: PathBuf,
    pub line_chart_file: String,
    pub violin_file: String,
}

impl OutputParams {
    pub fn line_chart_path(&self) -> PathBuf {
        self.dir.join(&self.line_chart_file)
    }

    pub fn violin_path(&self) -> PathBuf {
        self.dir.join(&self.violin_file)
    }
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("img"),
            line_chart_file: "ticket_price_plot.svg".to_string(),
            violin_file: "violin_plot.svg".to_string(),
        }
    }
}

/// Every constant the run depends on. Built once in `main` and passed down by reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub pricing: PricingParams,
    pub grid: CurveGrid,
    pub wealth_levels: Vec<WealthLevel>,
    pub population: PopulationParams,
    pub output: OutputParams,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            pricing: PricingParams::default(),
            grid: CurveGrid::default(),
            wealth_levels: [1e4, 1e5, 1e6, 1e7, 1e8]
                .into_iter()
                .map(WealthLevel::new)
                .collect(),
            population: PopulationParams::default(),
            output: OutputParams::default(),
        }
    }
}

impl PopulationParams {
    /// Checks the parameters the wealth draw depends on.
    pub fn validate_sampling(&self) -> Result<()> {
        if self.size == 0 {
            return Err(TicketError::invalid_config("population.size must be > 0"));
        }
        if !self.log_mean.is_finite() {
            return Err(TicketError::invalid_config(
                "population.log_mean must be finite",
            ));
        }
        ensure_positive(self.log_std, "population.log_std")
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        let pricing = &self.pricing;
        ensure_positive(pricing.expected_multiple, "pricing.expected_multiple")?;
        ensure_positive(pricing.utility_stake_multiple, "pricing.utility_stake_multiple")?;
        ensure_positive(pricing.median_wealth, "pricing.median_wealth")?;
        if !pricing.elasticity.is_finite() || pricing.elasticity < 0.0 {
            return Err(TicketError::invalid_config(
                "pricing.elasticity must be finite and >= 0",
            ));
        }

        let grid = &self.grid;
        if !grid.min_exponent.is_finite() || !grid.max_exponent.is_finite() {
            return Err(TicketError::invalid_config("grid exponents must be finite"));
        }
        if grid.max_exponent <= grid.min_exponent {
            return Err(TicketError::invalid_config(
                "grid.max_exponent must be > grid.min_exponent",
            ));
        }
        if grid.points < 2 {
            return Err(TicketError::invalid_config("grid.points must be >= 2"));
        }

        if self.wealth_levels.is_empty() {
            return Err(TicketError::invalid_config(
                "at least one wealth level is required",
            ));
        }
        for level in &self.wealth_levels {
            ensure_positive(level.wealth, &format!("wealth level {}", level.label))?;
        }

        self.population.validate_sampling()?;
        if self.population.amounts.is_empty() {
            return Err(TicketError::invalid_config(
                "at least one population guaranteed amount is required",
            ));
        }
        for amount in &self.population.amounts {
            ensure_positive(
                amount.amount,
                &format!("population amount {}", amount.label),
            )?;
        }

        if self.output.line_chart_file.is_empty() || self.output.violin_file.is_empty() {
            return Err(TicketError::invalid_config(
                "output file names must not be empty",
            ));
        }

        Ok(())
    }
}

fn ensure_positive(value: f64, name: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TicketError::invalid_config(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}

/// Dollar amount with a K/M/B suffix, e.g. `$10K`, `$2.5M`.
pub fn dollar_label(amount: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    for (scale, suffix) in UNITS {
        if amount >= scale {
            return format!("${}{suffix}", trim_number(amount / scale));
        }
    }
    format!("${}", trim_number(amount))
}

fn trim_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.1}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[derive(Debug, Clone)]
pub struct PriceCurve {
    pub label: String,
    pub wealth: f64,
    pub prices: Vec<f64>,
    pub pct_of_expected: Vec<f64>,
}

/// Series for both line-chart panels, all indexed by `guaranteed`.
#[derive(Debug, Clone)]
pub struct CurveSet {
    pub guaranteed: Vec<f64>,
    pub buyers: Vec<PriceCurve>,
    pub expected_value: Vec<f64>,
    pub floor: Vec<f64>,
    pub market: Vec<f64>,
    pub market_pct_of_expected: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    pub label: String,
    pub guaranteed_amount: f64,
    pub people: usize,
    pub mean_pct: f64,
    pub median_pct: f64,
    pub p10_pct: f64,
    pub p90_pct: f64,
    pub market_pct: f64,
}

#[derive(Debug, Clone)]
pub struct PopulationDistribution {
    pub label: String,
    pub guaranteed_amount: f64,
    /// Clipped percent-of-EV per person, in population order.
    pub pct_of_expected: Vec<f64>,
    pub summary: DistributionSummary,
}
