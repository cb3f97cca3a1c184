use serde::{Deserialize, Serialize};

use super::statistics::summarize;
use super::thresholds::ThresholdConfig;

/// One point of a single-indicator time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Qualitative volatility classification of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityPattern {
    Steady,
    Volatile,
    Stable,
}

impl VolatilityPattern {
    pub fn label(&self) -> &'static str {
        match self {
            VolatilityPattern::Steady => "steady",
            VolatilityPattern::Volatile => "volatile",
            VolatilityPattern::Stable => "stable",
        }
    }
}

/// End-to-end trend of a series: direction, percent change and volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    /// Percent change from the first to the last point, not a regression
    /// slope.
    pub change_percent: f64,
    pub pattern: VolatilityPattern,
}

impl TrendSummary {
    fn neutral() -> Self {
        Self {
            direction: TrendDirection::Stable,
            change_percent: 0.0,
            pattern: VolatilityPattern::Stable,
        }
    }
}

/// [`analyze_trend_with`] using the default thresholds.
pub fn analyze_trend(series: &[TrendPoint]) -> Option<TrendSummary> {
    analyze_trend_with(series, &ThresholdConfig::default())
}

/// Classify the end-to-end trend of a year/value series.
///
/// Returns `None` when the first value is exactly zero: percent change has
/// no baseline there, and callers must phrase that case explicitly instead
/// of showing a NaN to users. Empty and single-point series return the
/// neutral stable summary.
pub fn analyze_trend_with(series: &[TrendPoint], cfg: &ThresholdConfig) -> Option<TrendSummary> {
    if series.len() < 2 {
        return Some(TrendSummary::neutral());
    }

    let mut sorted = series.to_vec();
    sorted.sort_by_key(|p| p.year);

    let first = sorted[0].value;
    let last = sorted[sorted.len() - 1].value;
    if first == 0.0 {
        return None;
    }

    let change_percent = (last - first) / first * 100.0;
    let direction = if change_percent.abs() <= cfg.stable_change_pct {
        TrendDirection::Stable
    } else if change_percent > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    // Volatility comes from the raw values, not the percent changes.
    let values: Vec<f64> = sorted.iter().map(|p| p.value).collect();
    let std = summarize(&values).std;
    let pattern = if std > cfg.volatile_std {
        VolatilityPattern::Volatile
    } else if std < cfg.steady_std {
        VolatilityPattern::Stable
    } else {
        VolatilityPattern::Steady
    };

    Some(TrendSummary {
        direction,
        change_percent,
        pattern,
    })
}
