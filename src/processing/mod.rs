mod comparison;
mod reshape;
mod statistics;
mod thresholds;
mod trend;

pub use comparison::{compare_indicators, IndicatorComparison, RelationshipStrength};
pub use reshape::{rank_descending, reshape, ReshapeError};
pub use statistics::{correlate, summarize, variance, SeriesSummary};
pub use thresholds::ThresholdConfig;
pub use trend::{
    analyze_trend, analyze_trend_with, TrendDirection, TrendPoint, TrendSummary,
    VolatilityPattern,
};
