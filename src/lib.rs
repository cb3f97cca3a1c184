//! Observation analytics and narrative synthesis for economic-indicator
//! dashboards.
//!
//! The engine is a short pipeline over caller-supplied data: the reshaper
//! turns raw observations into chart-ready tables, the statistics layer
//! computes descriptive summaries, trends and correlations, and the
//! narrative layer renders those numbers as deterministic prose. Every call
//! is pure and synchronous; the engine holds no state between calls and the
//! only I/O lives in [`data`], which feeds the CLI.

pub mod data;
pub mod model;
pub mod narrative;
pub mod processing;

pub use model::{CategorySlice, ChartDataset, ChartType, Indicator, Observation, PairPoint, RawContext, YearRow};
pub use narrative::{build_story, describe_chart, describe_comparison, get_chart_insights, Story};
pub use processing::{
    analyze_trend, compare_indicators, correlate, rank_descending, reshape, summarize,
    SeriesSummary, ThresholdConfig, TrendSummary,
};
