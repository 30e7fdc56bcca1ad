use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};

use super::pricing::{certainty_equivalents_for_buyers, market_price, pct_of_expected};
use super::stats::{mean, percentile, percentile_of_sorted};
use super::types::{
    DistributionSummary, GuaranteedAmount, PopulationDistribution, PopulationParams,
    PricingParams,
};
use crate::error::{Result, TicketError};

/// Wealth of every simulated buyer, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct WealthPopulation {
    seed: u64,
    wealth: Vec<f64>,
}

impl WealthPopulation {
    /// Draws `params.size` log-normal wealth values from a ChaCha8 stream
    /// seeded with `params.seed`. The same params always yield the same values.
    pub fn simulate(params: &PopulationParams) -> Result<Self> {
        // rand_distr only rejects a non-finite scale, so a negative one must be caught here.
        params.validate_sampling()?;
        let dist = LogNormal::new(params.log_mean, params.log_std).map_err(|e| {
            TicketError::invalid_config(format!("population wealth distribution: {e}"))
        })?;
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let wealth = dist.sample_iter(&mut rng).take(params.size).collect();

        Ok(Self {
            seed: params.seed,
            wealth,
        })
    }

    pub fn from_wealth(seed: u64, wealth: Vec<f64>) -> Self {
        Self { seed, wealth }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn wealth(&self) -> &[f64] {
        &self.wealth
    }

    pub fn len(&self) -> usize {
        self.wealth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wealth.is_empty()
    }
}

/// Each buyer's certainty equivalent for one ticket as percent of its expected
/// value, clipped to [0, 100].
pub fn valuation_distribution(
    pricing: &PricingParams,
    population: &WealthPopulation,
    guaranteed: f64,
) -> Vec<f64> {
    certainty_equivalents_for_buyers(pricing, population.wealth(), guaranteed)
        .into_iter()
        .map(|price| pct_of_expected(pricing, price, guaranteed).clamp(0.0, 100.0))
        .collect()
}

pub fn summarize_distribution(
    pricing: &PricingParams,
    amount: &GuaranteedAmount,
    pct_of_expected_values: &[f64],
) -> DistributionSummary {
    let mut sorted = pct_of_expected_values.to_vec();
    let median_pct = percentile(&mut sorted, 50.0);
    let market = market_price(pricing, amount.amount);

    DistributionSummary {
        label: amount.label.clone(),
        guaranteed_amount: amount.amount,
        people: sorted.len(),
        mean_pct: mean(&sorted),
        median_pct,
        p10_pct: percentile_of_sorted(&sorted, 10.0),
        p90_pct: percentile_of_sorted(&sorted, 90.0),
        market_pct: pct_of_expected(pricing, market, amount.amount),
    }
}

pub fn population_distributions(
    pricing: &PricingParams,
    population: &WealthPopulation,
    amounts: &[GuaranteedAmount],
) -> Vec<PopulationDistribution> {
    amounts
        .iter()
        .map(|amount| {
            let pct_of_expected = valuation_distribution(pricing, population, amount.amount);
            let summary = summarize_distribution(pricing, amount, &pct_of_expected);
            PopulationDistribution {
                label: amount.label.clone(),
                guaranteed_amount: amount.amount,
                pct_of_expected,
                summary,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::median;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};

    fn small_params(seed: u64, size: usize) -> PopulationParams {
        PopulationParams {
            size,
            seed,
            ..PopulationParams::default()
        }
    }

    #[test]
    fn fixed_seed_reruns_are_identical() {
        let params = small_params(42, 2_000);
        let first = WealthPopulation::simulate(&params).expect("population");
        let second = WealthPopulation::simulate(&params).expect("population");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2_000);
        assert_eq!(first.seed(), 42);
    }

    #[test]
    fn different_seeds_give_different_populations() {
        let a = WealthPopulation::simulate(&small_params(1, 100)).expect("population");
        let b = WealthPopulation::simulate(&small_params(2, 100)).expect("population");
        assert_ne!(a.wealth(), b.wealth());
    }

    #[test]
    fn default_population_median_is_near_sixty_thousand() {
        let population =
            WealthPopulation::simulate(&PopulationParams::default()).expect("population");
        assert_eq!(population.len(), 50_000);
        assert!(population.wealth().iter().all(|w| *w > 0.0 && w.is_finite()));

        // exp(11.0) = 59874; the sample median of 50k draws is well within 3%.
        let m = median(population.wealth());
        assert!((m / 11.0f64.exp() - 1.0).abs() < 0.03, "median {m}");
    }

    #[test]
    fn invalid_scale_is_reported_as_config_error() {
        let params = PopulationParams {
            log_std: -1.0,
            ..PopulationParams::default()
        };
        assert!(matches!(
            WealthPopulation::simulate(&params),
            Err(TicketError::InvalidConfig(_))
        ));
    }

    #[test]
    fn simulate_rejects_zero_scale_and_empty_size() {
        let flat = PopulationParams {
            log_std: 0.0,
            ..PopulationParams::default()
        };
        assert!(matches!(
            WealthPopulation::simulate(&flat),
            Err(TicketError::InvalidConfig(_))
        ));
        assert!(matches!(
            WealthPopulation::simulate(&small_params(42, 0)),
            Err(TicketError::InvalidConfig(_))
        ));
    }

    #[test]
    fn oracle_distribution_for_hand_picked_buyers() {
        let pricing = PricingParams::default();
        let population = WealthPopulation::from_wealth(0, vec![100_000.0, 1e12, 10.0]);
        let values = valuation_distribution(&pricing, &population, 1_000.0);

        // 41421.36 / 50000
        assert!((values[0] - 82.842_712).abs() < 1e-4, "{}", values[0]);
        assert!(values[1] > 99.99 && values[1] <= 100.0);
        // A tiny bankroll is pinned to the floor, X / 50X.
        assert!((values[2] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn distributions_follow_amount_order_and_population_length() {
        let pricing = PricingParams::default();
        let params = small_params(7, 500);
        let population = WealthPopulation::simulate(&params).expect("population");
        let distributions = population_distributions(&pricing, &population, &params.amounts);

        assert_eq!(distributions.len(), params.amounts.len());
        for (dist, amount) in distributions.iter().zip(&params.amounts) {
            assert_eq!(dist.label, amount.label);
            assert_eq!(dist.guaranteed_amount, amount.amount);
            assert_eq!(dist.pct_of_expected.len(), 500);
            assert_eq!(dist.summary.people, 500);
        }
    }

    #[test]
    fn larger_tickets_are_discounted_more() {
        let pricing = PricingParams::default();
        let params = small_params(42, 5_000);
        let population = WealthPopulation::simulate(&params).expect("population");
        let distributions = population_distributions(&pricing, &population, &params.amounts);

        for pair in distributions.windows(2) {
            assert!(pair[1].summary.median_pct <= pair[0].summary.median_pct);
            assert!(pair[1].summary.market_pct <= pair[0].summary.market_pct);
        }
    }

    #[test]
    fn summary_orders_percentiles_and_reports_market_share() {
        let pricing = PricingParams::default();
        let amount = GuaranteedAmount::new(10_000.0);
        let summary = summarize_distribution(&pricing, &amount, &[10.0, 20.0, 30.0, 40.0, 50.0]);

        assert_eq!(summary.people, 5);
        assert!((summary.mean_pct - 30.0).abs() < 1e-12);
        assert!((summary.median_pct - 30.0).abs() < 1e-12);
        assert!((summary.p10_pct - 14.0).abs() < 1e-9);
        assert!((summary.p90_pct - 46.0).abs() < 1e-9);
        // 434782.6 / 500000
        assert!((summary.market_pct - 86.956_521_7).abs() < 1e-6);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(24))]

        #[test]
        fn prop_distribution_values_are_clipped_percentages(
            seed in any::<u64>(),
            size in 1usize..400,
            guaranteed_exp in 0.0f64..8.0,
        ) {
            let pricing = PricingParams::default();
            let population = WealthPopulation::simulate(&small_params(seed, size))
                .expect("population");
            let values = valuation_distribution(&pricing, &population, 10f64.powf(guaranteed_exp));

            prop_assert_eq!(values.len(), size);
            for v in values {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }

        #[test]
        fn prop_same_seed_gives_bit_identical_distributions(seed in any::<u64>()) {
            let pricing = PricingParams::default();
            let params = small_params(seed, 64);
            let first = WealthPopulation::simulate(&params).expect("population");
            let second = WealthPopulation::simulate(&params).expect("population");

            for amount in &params.amounts {
                let a = valuation_distribution(&pricing, &first, amount.amount);
                let b = valuation_distribution(&pricing, &second, amount.amount);
                let a_bits: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
                let b_bits: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
                prop_assert_eq!(a_bits, b_bits);
            }
        }
    }
}
