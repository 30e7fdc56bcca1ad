use std::f64::consts::PI;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n as f64 - 1.0)).sqrt()
}

/// Linear-interpolated percentile; sorts `values` in place.
pub fn percentile(values: &mut [f64], p: f64) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    percentile_of_sorted(values, p)
}

pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let w = rank - lower as f64;
        sorted[lower] * (1.0 - w) + sorted[upper] * w
    }
}

pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    percentile(&mut sorted, 50.0)
}

/// Gaussian density estimate sampled on an even grid over the data range.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityProfile {
    pub coords: Vec<f64>,
    pub densities: Vec<f64>,
}

impl DensityProfile {
    pub fn max_density(&self) -> f64 {
        self.densities.iter().copied().fold(0.0, f64::max)
    }
}

/// Scott's rule: `n^(-1/5) * std`.
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.len() as f64).powf(-0.2) * std_dev(values)
}

/// Evaluates a Gaussian KDE at `points` evenly spaced coordinates from the
/// smallest to the largest value. Returns `None` for empty input; a constant
/// input collapses to a single coordinate with unit density.
pub fn kde_profile(values: &[f64], points: usize) -> Option<DensityProfile> {
    let first = *values.first()?;
    let (lo, hi) = values
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let bandwidth = scott_bandwidth(values);
    if hi <= lo || bandwidth <= 0.0 || points < 2 {
        return Some(DensityProfile {
            coords: vec![lo],
            densities: vec![1.0],
        });
    }

    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    let step = (hi - lo) / (points - 1) as f64;
    let coords: Vec<f64> = (0..points).map(|i| lo + step * i as f64).collect();
    let densities = coords
        .iter()
        .map(|&y| {
            let sum: f64 = values
                .iter()
                .map(|&v| {
                    let z = (y - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            sum * norm
        })
        .collect();

    Some(DensityProfile { coords, densities })
}
