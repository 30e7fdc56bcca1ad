mod curves;
mod population;
mod pricing;
pub mod stats;
mod types;

pub use curves::{build_curves, curve_grid, logspace};
pub use population::{
    WealthPopulation, population_distributions, summarize_distribution, valuation_distribution,
};
pub use pricing::{
    certainty_equivalent, certainty_equivalents_for_amounts, certainty_equivalents_for_buyers,
    expected_value, market_price, market_prices, pct_of_expected,
};
pub use types::{
    CurveGrid, CurveSet, DistributionSummary, GuaranteedAmount, ModelConfig, OutputParams,
    PopulationDistribution, PopulationParams, PriceCurve, PricingParams, WealthLevel,
    dollar_label,
};
