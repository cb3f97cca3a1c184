use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ChartDataset, ChartType, Indicator, Observation};

use super::reshape::reshape;
use super::statistics::{correlate, summarize, SeriesSummary};
use super::thresholds::ThresholdConfig;

/// Qualitative strength of a Pearson correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStrength {
    Strong,
    Moderate,
    Weak,
}

impl RelationshipStrength {
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipStrength::Strong => "strong",
            RelationshipStrength::Moderate => "moderate",
            RelationshipStrength::Weak => "weak",
        }
    }

    pub fn classify(r: f64, cfg: &ThresholdConfig) -> Self {
        if r.abs() > cfg.strong_correlation {
            RelationshipStrength::Strong
        } else if r.abs() > cfg.moderate_correlation {
            RelationshipStrength::Moderate
        } else {
            RelationshipStrength::Weak
        }
    }
}

/// Cross-indicator comparison: per-side statistics plus the relationship
/// between the two series where they overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorComparison {
    pub left: SeriesSummary,
    pub right: SeriesSummary,
    /// Pearson r over the matched (year, country) pairs; 0 when fewer than
    /// two pairs matched.
    pub correlation: f64,
    pub strength: RelationshipStrength,
    /// Number of (year, country) pairs both indicators cover.
    pub matched_points: usize,
}

/// Compare two indicator series over the same observation set.
///
/// Pairing reuses the scatter reshape: observations are matched on the
/// (year, country) key and duplicates averaged, so the comparison sees the
/// same points a scatter chart would plot.
pub fn compare_indicators(
    observations: &[Observation],
    left: &Indicator,
    right: &Indicator,
    cfg: &ThresholdConfig,
) -> IndicatorComparison {
    let left_values: Vec<f64> = observations
        .iter()
        .filter(|o| o.indicator_id == left.id)
        .map(|o| o.value)
        .collect();
    let right_values: Vec<f64> = observations
        .iter()
        .filter(|o| o.indicator_id == right.id)
        .map(|o| o.value)
        .collect();

    let selection = [left.clone(), right.clone()];
    // Validation already happened if the caller reshaped first; a non-finite
    // value here degrades to the empty pairing rather than erroring.
    let pairs: Vec<(f64, f64)> =
        match reshape(observations, &selection, ChartType::Scatter) {
            Ok(ChartDataset::Points(points)) => {
                points.into_iter().map(|p| (p.x, p.y)).collect()
            }
            _ => Vec::new(),
        };

    let correlation = correlate(&pairs);
    debug!(
        left = %left.name,
        right = %right.name,
        matched = pairs.len(),
        correlation,
        "compared indicator series"
    );

    IndicatorComparison {
        left: summarize(&left_values),
        right: summarize(&right_values),
        correlation,
        strength: RelationshipStrength::classify(correlation, cfg),
        matched_points: pairs.len(),
    }
}
