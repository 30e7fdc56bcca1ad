use super::pricing::{
    certainty_equivalents_for_amounts, expected_value, market_prices, pct_of_expected,
};
use super::types::{CurveGrid, CurveSet, ModelConfig, PriceCurve, PricingParams};

/// `points` values spaced evenly in log10 between `10^min_exponent` and
/// `10^max_exponent`, both endpoints included.
pub fn logspace(min_exponent: f64, max_exponent: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![10f64.powf(min_exponent)],
        _ => {
            let step = (max_exponent - min_exponent) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points)
                .map(|i| 10f64.powf(min_exponent + step * i as f64))
                .collect();
            values[points - 1] = 10f64.powf(max_exponent);
            values
        }
    }
}

pub fn curve_grid(grid: &CurveGrid) -> Vec<f64> {
    logspace(grid.min_exponent, grid.max_exponent, grid.points)
}

pub fn build_curves(config: &ModelConfig) -> CurveSet {
    let pricing = &config.pricing;
    let guaranteed = curve_grid(&config.grid);

    let buyers = config
        .wealth_levels
        .iter()
        .map(|level| {
            let prices = certainty_equivalents_for_amounts(pricing, level.wealth, &guaranteed);
            let pct = to_pct_of_expected(pricing, &prices, &guaranteed);
            PriceCurve {
                label: level.label.clone(),
                wealth: level.wealth,
                prices,
                pct_of_expected: pct,
            }
        })
        .collect();

    let ev_line = guaranteed
        .iter()
        .map(|&x| expected_value(pricing, x))
        .collect();
    let market = market_prices(pricing, &guaranteed);
    let market_pct_of_expected = to_pct_of_expected(pricing, &market, &guaranteed);

    CurveSet {
        floor: guaranteed.clone(),
        guaranteed,
        buyers,
        expected_value: ev_line,
        market,
        market_pct_of_expected,
    }
}

fn to_pct_of_expected(
    pricing: &PricingParams,
    prices: &[f64],
    guaranteed: &[f64],
) -> Vec<f64> {
    prices
        .iter()
        .zip(guaranteed)
        .map(|(&price, &x)| pct_of_expected(pricing, price, x))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rel(actual: f64, expected: f64) {
        assert!(
            ((actual - expected) / expected).abs() <= 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn logspace_hits_both_endpoints_and_increases() {
        let values = logspace(1.0, 7.0, 500);
        assert_eq!(values.len(), 500);
        assert_rel(values[0], 10.0);
        assert_rel(values[499], 1e7);
        assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn logspace_has_constant_ratio() {
        let values = logspace(0.0, 3.0, 4);
        assert_rel(values[1], 10.0);
        assert_rel(values[2], 100.0);
        assert_rel(values[3], 1_000.0);
    }

    #[test]
    fn logspace_small_counts() {
        assert!(logspace(1.0, 2.0, 0).is_empty());
        assert_eq!(logspace(2.0, 5.0, 1).len(), 1);
        assert_rel(logspace(2.0, 5.0, 1)[0], 100.0);
    }

    #[test]
    fn build_curves_shapes_match_grid_and_levels() {
        let config = ModelConfig::default();
        let curves = build_curves(&config);
        let n = config.grid.points;

        assert_eq!(curves.guaranteed.len(), n);
        assert_eq!(curves.expected_value.len(), n);
        assert_eq!(curves.floor, curves.guaranteed);
        assert_eq!(curves.market.len(), n);
        assert_eq!(curves.market_pct_of_expected.len(), n);
        assert_eq!(curves.buyers.len(), config.wealth_levels.len());
        for curve in &curves.buyers {
            assert_eq!(curve.prices.len(), n);
            assert_eq!(curve.pct_of_expected.len(), n);
        }
    }

    #[test]
    fn curves_lie_between_floor_and_expected_value() {
        let curves = build_curves(&ModelConfig::default());
        for curve in &curves.buyers {
            for (i, &price) in curve.prices.iter().enumerate() {
                assert!(price >= curves.floor[i]);
                assert!(price <= curves.expected_value[i]);
                let pct = curve.pct_of_expected[i];
                assert!((2.0 - 1e-9..=100.0).contains(&pct), "{pct}");
            }
        }
    }

    #[test]
    fn wealthier_curves_sit_above_poorer_ones() {
        let curves = build_curves(&ModelConfig::default());
        for pair in curves.buyers.windows(2) {
            assert!(pair[1].wealth > pair[0].wealth);
            for (poor, rich) in pair[0].prices.iter().zip(&pair[1].prices) {
                assert!(rich + rich * 1e-12 >= *poor);
            }
        }
    }
}
