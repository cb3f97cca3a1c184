use crate::model::{ChartDataset, ChartType};
use crate::processing::{rank_descending, variance, ThresholdConfig};

use super::summary::yearly_means;

/// Supplementary bullet insights for a chart. Each insight is emitted only
/// when its numeric condition holds, so the result may well be empty.
pub fn get_chart_insights(
    chart_type: ChartType,
    data: &ChartDataset,
    cfg: &ThresholdConfig,
) -> Vec<String> {
    let mut insights = Vec::new();
    if data.is_empty() {
        return insights;
    }

    match (chart_type, data) {
        (ChartType::Bar, ChartDataset::Categories(slices)) => {
            let ranked = rank_descending(slices);
            if ranked.len() >= 2 {
                let highest = ranked[0].value;
                let lowest = ranked[ranked.len() - 1].value;
                // A zero or negative floor has no meaningful ratio.
                if lowest > 0.0 {
                    let ratio = highest / lowest;
                    if ratio > cfg.spread_ratio {
                        insights.push(format!(
                            "High variation: The highest value is {ratio:.1}x greater than the lowest"
                        ));
                    }
                }
            }
        }
        (ChartType::Pie | ChartType::Radial, ChartDataset::Categories(slices)) => {
            let total: f64 = slices.iter().map(|s| s.value).sum();
            if total > 0.0 {
                let ranked = rank_descending(slices);
                let share = ranked[0].value / total * 100.0;
                if share > cfg.dominant_share_pct {
                    insights.push(format!(
                        "Dominant region: {} accounts for {share:.1}% of the total",
                        ranked[0].name
                    ));
                }
            }
        }
        (ChartType::Line | ChartType::Area, ChartDataset::TimeSeries(rows)) => {
            if rows.len() > 2 {
                let values: Vec<f64> = yearly_means(rows).iter().map(|p| p.value).collect();
                if variance(&values) > cfg.variance_alert {
                    insights.push("High volatility detected in the time series data".to_string());
                }
            }
        }
        _ => {}
    }

    insights
}
