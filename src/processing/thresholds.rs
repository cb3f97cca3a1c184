use serde::{Deserialize, Serialize};

/// Tuned constants for trend, volatility and narrative classification.
///
/// The defaults were calibrated against percentage-scale economic indicators
/// and the population standard deviation used by [`summarize`]. Reusing the
/// engine on differently-scaled data means re-tuning these values here, not
/// editing formula code.
///
/// [`summarize`]: crate::processing::summarize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// |end-to-end change %| at or below this is a stable trend.
    pub stable_change_pct: f64,
    /// Series std above this classifies the pattern as volatile.
    pub volatile_std: f64,
    /// Series std below this classifies the pattern as stable.
    pub steady_std: f64,
    /// |r| above this is a strong correlation.
    pub strong_correlation: f64,
    /// |r| above this (up to strong) is a moderate correlation.
    pub moderate_correlation: f64,
    /// Top-3 share % above this is a highly concentrated distribution.
    pub high_concentration_pct: f64,
    /// Top-3 share % above this (up to high) is moderate concentration.
    pub moderate_concentration_pct: f64,
    /// Largest-segment share % above this triggers the dominance insight.
    pub dominant_share_pct: f64,
    /// Max/min ratio above this triggers the spread insight.
    pub spread_ratio: f64,
    /// Series variance above this triggers the volatility insight.
    pub variance_alert: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            stable_change_pct: 5.0,
            volatile_std: 20.0,
            steady_std: 5.0,
            strong_correlation: 0.7,
            moderate_correlation: 0.3,
            high_concentration_pct: 75.0,
            moderate_concentration_pct: 50.0,
            dominant_share_pct: 50.0,
            spread_ratio: 5.0,
            variance_alert: 1000.0,
        }
    }
}
