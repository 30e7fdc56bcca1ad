use super::types::PricingParams;

pub fn expected_value(params: &PricingParams, guaranteed: f64) -> f64 {
    params.expected_multiple * guaranteed
}

/// Price at which a log-utility buyer with `wealth` is indifferent to holding the
/// ticket, floored at the guaranteed amount.
///
/// `sqrt(W(W + mX)) - W` is evaluated as `mWX / (sqrt(W)·sqrt(W + mX) + W)`, which
/// has no subtractive cancellation for `W >> X` and never forms `W²`.
pub fn certainty_equivalent(params: &PricingParams, wealth: f64, guaranteed: f64) -> f64 {
    let stake = params.utility_stake_multiple * guaranteed;
    let root = wealth.sqrt() * (wealth + stake).sqrt();
    let ce = stake * wealth / (root + wealth);
    ce.max(guaranteed)
}

/// Approximate clearing price for a population of buyers around `median_wealth`.
pub fn market_price(params: &PricingParams, guaranteed: f64) -> f64 {
    let ev = expected_value(params, guaranteed);
    let price = ev / (1.0 + params.elasticity * guaranteed / params.median_wealth);
    price.max(guaranteed)
}

pub fn pct_of_expected(params: &PricingParams, price: f64, guaranteed: f64) -> f64 {
    price / expected_value(params, guaranteed) * 100.0
}

/// Certainty equivalents of one ticket across many buyers.
pub fn certainty_equivalents_for_buyers(
    params: &PricingParams,
    wealth: &[f64],
    guaranteed: f64,
) -> Vec<f64> {
    wealth
        .iter()
        .map(|&w| certainty_equivalent(params, w, guaranteed))
        .collect()
}

/// Certainty equivalents of one buyer across many tickets.
pub fn certainty_equivalents_for_amounts(
    params: &PricingParams,
    wealth: f64,
    guaranteed: &[f64],
) -> Vec<f64> {
    guaranteed
        .iter()
        .map(|&x| certainty_equivalent(params, wealth, x))
        .collect()
}

pub fn market_prices(params: &PricingParams, guaranteed: &[f64]) -> Vec<f64> {
    guaranteed
        .iter()
        .map(|&x| market_price(params, x))
        .collect()
}
