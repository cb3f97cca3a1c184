use serde::{Deserialize, Serialize};

/// Descriptive statistics for one value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divides by N, not N-1). The volatility
    /// thresholds in [`ThresholdConfig`] were tuned against this estimator.
    ///
    /// [`ThresholdConfig`]: crate::processing::ThresholdConfig
    pub std: f64,
}

impl SeriesSummary {
    /// Zero-valued summary returned for empty input by convention, so
    /// dashboard callers with filtered-out data never hit a 0/0.
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            std: 0.0,
        }
    }

    /// Format as a multi-line report string.
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:\n  Count: {}\n  Min: {:.3}\n  Max: {:.3}\n  Mean: {:.3}\n  Std Dev: {:.3}\n",
            label, self.count, self.min, self.max, self.mean, self.std
        )
    }
}

/// Compute count, mean, min, max and population standard deviation.
/// Empty input returns the all-zero summary rather than NaN.
pub fn summarize(values: &[f64]) -> SeriesSummary {
    if values.is_empty() {
        return SeriesSummary::empty();
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    SeriesSummary {
        count,
        mean,
        min,
        max,
        std: variance.sqrt(),
    }
}

/// Population variance of a series; 0 for empty input.
pub fn variance(values: &[f64]) -> f64 {
    let s = summarize(values);
    s.std * s.std
}

/// Pearson correlation coefficient via the standard sums formula.
///
/// Fewer than two pairs, or zero variance in either axis, returns 0.0: a
/// flat or near-empty series has no defined correlation and 0 is the
/// conservative default for a dashboard.
pub fn correlate(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len();
    if n < 2 {
        return 0.0;
    }

    let nf = n as f64;
    let sum_x: f64 = pairs.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = pairs.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = pairs.iter().map(|(x, y)| x * y).sum();
    let sum_x2: f64 = pairs.iter().map(|(x, _)| x * x).sum();
    let sum_y2: f64 = pairs.iter().map(|(_, y)| y * y).sum();

    let denominator =
        ((nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (nf * sum_xy - sum_x * sum_y) / denominator
}
