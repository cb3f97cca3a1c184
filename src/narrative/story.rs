//! Deterministic multi-section data stories assembled from the statistics
//! layer. No randomness and no model calls; the same inputs always produce
//! the same text.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::{ChartType, Indicator, Observation, RawContext};
use crate::processing::{
    analyze_trend_with, compare_indicators, reshape, summarize, ThresholdConfig, TrendDirection,
    TrendPoint, VolatilityPattern,
};

use super::insights::get_chart_insights;
use super::summary::{describe_comparison, NO_DATA};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorySection {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub sections: Vec<StorySection>,
}

/// Assemble a report-style story for the selected indicators: an executive
/// summary, one trend section per indicator, a relationship section when two
/// indicators are selected, and the collected insight bullets.
pub fn build_story(
    observations: &[Observation],
    indicators: &[Indicator],
    cfg: &ThresholdConfig,
) -> Story {
    let ctx = RawContext::from_observations(observations);
    let title = story_title(indicators);
    info!(title = %title, indicators = indicators.len(), "building data story");

    let mut sections = vec![StorySection {
        heading: "Executive Summary".to_string(),
        body: executive_summary(observations, indicators, &ctx),
    }];

    for indicator in indicators {
        sections.push(StorySection {
            heading: format!("Trend Analysis: {}", indicator.name),
            body: trend_section(observations, indicator, cfg),
        });
    }

    if indicators.len() >= 2 {
        let cmp = compare_indicators(observations, &indicators[0], &indicators[1], cfg);
        sections.push(StorySection {
            heading: "Relationship".to_string(),
            body: describe_comparison(&cmp, &indicators[0], &indicators[1]),
        });
    }

    sections.push(StorySection {
        heading: "Key Findings".to_string(),
        body: key_findings(observations, indicators, cfg),
    });

    Story { title, sections }
}

fn story_title(indicators: &[Indicator]) -> String {
    match indicators {
        [] => "Data Story".to_string(),
        [only] => format!("{} in Focus", only.name),
        [first, second, ..] => format!(
            "The {}-{} Connection: A Cross-Indicator Analysis",
            first.name, second.name
        ),
    }
}

fn executive_summary(
    observations: &[Observation],
    indicators: &[Indicator],
    ctx: &RawContext,
) -> String {
    if observations.is_empty() || indicators.is_empty() {
        return NO_DATA.to_string();
    }
    let period = match (ctx.years.first(), ctx.years.last()) {
        (Some(first), Some(last)) if first != last => format!("the {first}-{last} period"),
        (Some(only), _) => format!("{only}"),
        _ => "an unspecified period".to_string(),
    };
    format!(
        "This report analyzes {} observations across {} indicators and {} regions, covering {}.",
        observations.len(),
        indicators.len(),
        ctx.countries.len(),
        period
    )
}

fn trend_section(
    observations: &[Observation],
    indicator: &Indicator,
    cfg: &ThresholdConfig,
) -> String {
    let series = indicator_series(observations, indicator);
    if series.is_empty() {
        return NO_DATA.to_string();
    }

    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let stats = summarize(&values);
    let span = format!(
        "Between {} and {}, {} averaged {:.2} {}",
        series[0].year,
        series[series.len() - 1].year,
        indicator.name,
        stats.mean,
        indicator.display_unit()
    );

    match analyze_trend_with(&series, cfg) {
        None => format!(
            "{span}. The series baseline is zero, so percent change is undefined (insufficient baseline data)."
        ),
        Some(trend) => {
            let movement = match trend.direction {
                TrendDirection::Increasing => {
                    format!("rising {:.1}% end to end", trend.change_percent)
                }
                TrendDirection::Decreasing => {
                    format!("falling {:.1}% end to end", trend.change_percent.abs())
                }
                TrendDirection::Stable => "holding stable end to end".to_string(),
            };
            let texture = match trend.pattern {
                VolatilityPattern::Volatile => "The year-to-year values are volatile",
                VolatilityPattern::Steady => "The year-to-year values move steadily",
                VolatilityPattern::Stable => "The year-to-year values barely move",
            };
            format!(
                "{span}, {movement}. {texture} (std dev {:.2}).",
                stats.std
            )
        }
    }
}

/// Per-year mean series for one indicator, ordered by year.
fn indicator_series(observations: &[Observation], indicator: &Indicator) -> Vec<TrendPoint> {
    use std::collections::BTreeMap;
    let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for obs in observations.iter().filter(|o| o.indicator_id == indicator.id) {
        let entry = by_year.entry(obs.year).or_insert((0.0, 0));
        entry.0 += obs.value;
        entry.1 += 1;
    }
    by_year
        .into_iter()
        .map(|(year, (sum, count))| TrendPoint {
            year,
            value: sum / count as f64,
        })
        .collect()
}

fn key_findings(
    observations: &[Observation],
    indicators: &[Indicator],
    cfg: &ThresholdConfig,
) -> String {
    let mut bullets = Vec::new();
    for chart_type in [ChartType::Bar, ChartType::Pie, ChartType::Line] {
        if let Ok(dataset) = reshape(observations, indicators, chart_type) {
            bullets.extend(get_chart_insights(chart_type, &dataset, cfg));
        }
    }

    if bullets.is_empty() {
        "No notable outliers or concentrations were detected in the selected data.".to_string()
    } else {
        bullets
            .iter()
            .map(|b| format!("- {b}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
