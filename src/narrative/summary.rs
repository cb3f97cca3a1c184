use tracing::debug;

use crate::model::{CategorySlice, ChartDataset, ChartType, Indicator, RawContext, YearRow};
use crate::processing::{
    analyze_trend_with, rank_descending, ThresholdConfig, TrendDirection, TrendPoint,
};

use super::phrasing;

/// Fixed fallback for empty data or missing metadata. Narrative generation
/// never errors out of the render path.
pub const NO_DATA: &str = "No data available for analysis.";

/// Produce the one-paragraph description for a chart.
///
/// Bar, pie/radial and line/area each get their own template; every other
/// chart type (scatter included) gets the generic data-point sentence. A
/// dataset whose shape does not match the requested chart type is treated
/// the same as no data.
pub fn describe_chart(
    chart_type: ChartType,
    data: &ChartDataset,
    indicator: &Indicator,
    ctx: &RawContext,
    cfg: &ThresholdConfig,
) -> String {
    if data.is_empty() {
        return NO_DATA.to_string();
    }
    debug!(chart_type = chart_type.label(), points = data.len(), "describing chart");

    match (chart_type, data) {
        (ChartType::Bar, ChartDataset::Categories(slices)) => {
            bar_summary(slices, indicator, ctx)
        }
        (ChartType::Pie | ChartType::Radial, ChartDataset::Categories(slices)) => {
            pie_summary(slices, indicator, cfg)
        }
        (ChartType::Line | ChartType::Area, ChartDataset::TimeSeries(rows)) => {
            line_summary(rows, indicator, ctx, cfg)
        }
        (ChartType::Scatter, ChartDataset::Points(_)) => generic_summary(chart_type, data, indicator),
        _ => NO_DATA.to_string(),
    }
}

fn generic_summary(chart_type: ChartType, data: &ChartDataset, indicator: &Indicator) -> String {
    format!(
        "This {} chart displays {} data points for {}, showing the distribution across different {} metrics.",
        chart_type.label(),
        data.len(),
        indicator.name,
        indicator.category.to_lowercase()
    )
}

fn time_context(years: &[i32]) -> String {
    if years.len() > 1 {
        let min = years.iter().min().unwrap();
        let max = years.iter().max().unwrap();
        format!("from {min} to {max}")
    } else {
        format!("for {}", years.first().copied().unwrap_or(2024))
    }
}

fn bar_summary(slices: &[CategorySlice], indicator: &Indicator, ctx: &RawContext) -> String {
    let ranked = rank_descending(slices);
    let top = &ranked[0];
    let bottom = &ranked[ranked.len() - 1];
    let average = slices.iter().map(|s| s.value).sum::<f64>() / slices.len() as f64;
    let unit = indicator.display_unit();
    let region_word = if slices.len() == 1 { "region" } else { "regions" };

    let mut summary = format!(
        "This bar chart compares {} across {} {} {}. ",
        indicator.name,
        slices.len(),
        region_word,
        time_context(&ctx.years)
    );

    if top.name != bottom.name {
        summary.push_str(&format!(
            "{} shows the highest value at {:.2} {}, while {} has the lowest at {:.2} {}. ",
            top.name, top.value, unit, bottom.name, bottom.value, unit
        ));
    }

    summary.push_str(&format!(
        "The average {} across all regions is {:.2} {}. ",
        indicator.name.to_lowercase(),
        average,
        unit
    ));
    summary.push_str(&phrasing::bar_closing(&indicator.category));
    summary
}

fn pie_summary(slices: &[CategorySlice], indicator: &Indicator, cfg: &ThresholdConfig) -> String {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    let ranked = rank_descending(slices);
    let top = &ranked[0];
    let top_share = top.value / total * 100.0;

    let mut summary = format!(
        "This pie chart shows the distribution of {} across {} regions. ",
        indicator.name,
        slices.len()
    );
    summary.push_str(&format!(
        "{} represents the largest share at {:.1}% of the total ({:.2} {}). ",
        top.name,
        top_share,
        top.value,
        indicator.display_unit()
    ));

    let top_three: f64 = ranked.iter().take(3).map(|s| s.value).sum();
    let top_three_share = top_three / total * 100.0;
    if top_three_share > cfg.high_concentration_pct {
        summary.push_str(&format!(
            "The top three regions account for {top_three_share:.1}% of the total, indicating a highly concentrated distribution. "
        ));
    } else if top_three_share > cfg.moderate_concentration_pct {
        summary.push_str(&format!(
            "The top three regions represent {top_three_share:.1}% of the total, showing moderate concentration. "
        ));
    } else {
        summary.push_str(&format!(
            "The distribution is relatively balanced across regions, with the top three accounting for {top_three_share:.1}% of the total. "
        ));
    }

    summary.push_str(&phrasing::pie_closing(&indicator.category));
    summary
}

fn line_summary(
    rows: &[YearRow],
    indicator: &Indicator,
    ctx: &RawContext,
    cfg: &ThresholdConfig,
) -> String {
    if ctx.years.len() <= 1 {
        let regions = if ctx.countries.is_empty() {
            rows.len()
        } else {
            ctx.countries.len()
        };
        return format!(
            "This line chart displays {} values across {} regions for {}. The data shows regional variations in {} performance.",
            indicator.name,
            regions,
            ctx.years.first().copied().unwrap_or(2024),
            indicator.category.to_lowercase()
        );
    }

    let min_year = ctx.years.iter().min().unwrap();
    let max_year = ctx.years.iter().max().unwrap();
    let mut summary = format!(
        "This line chart tracks {} over time from {} to {}. ",
        indicator.name, min_year, max_year
    );

    let series = yearly_means(rows);
    let Some(trend) = analyze_trend_with(&series, cfg) else {
        summary.push_str(
            "The series starts at zero, leaving insufficient baseline data for a trend comparison.",
        );
        return summary;
    };

    match trend.direction {
        TrendDirection::Stable => {
            summary.push_str("The values have remained relatively stable over the time period. ");
        }
        direction => {
            let verb = if direction == TrendDirection::Increasing {
                "rising"
            } else {
                "falling"
            };
            summary.push_str(&format!(
                "The data shows an overall {} trend, with values {} by approximately {:.1}% over the period. ",
                direction.label(),
                verb,
                trend.change_percent.abs()
            ));
        }
    }

    summary.push_str(&phrasing::line_closing(&indicator.category, trend.direction));
    summary
}

/// One-sentence description of a two-indicator relationship.
pub fn describe_comparison(
    comparison: &crate::processing::IndicatorComparison,
    left: &Indicator,
    right: &Indicator,
) -> String {
    if comparison.matched_points < 2 {
        return format!(
            "Not enough overlapping data points to relate {} and {}.",
            left.name, right.name
        );
    }
    let sign = if comparison.correlation >= 0.0 {
        "positive"
    } else {
        "negative"
    };
    format!(
        "{} and {} show a {} {} correlation (r = {:.2}) across {} matched data points.",
        left.name,
        right.name,
        comparison.strength.label(),
        sign,
        comparison.correlation,
        comparison.matched_points
    )
}

/// Collapse time-series rows to one mean value per year, the single series
/// the trend and insight checks run on.
pub(crate) fn yearly_means(rows: &[YearRow]) -> Vec<TrendPoint> {
    rows.iter()
        .filter(|row| !row.values.is_empty())
        .map(|row| TrendPoint {
            year: row.year,
            value: row.values.values().sum::<f64>() / row.values.len() as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn economic() -> Indicator {
        Indicator::new("gdp", "GDP Growth", "%", "Economic")
    }

    fn slices(values: &[(&str, f64)]) -> Vec<CategorySlice> {
        values
            .iter()
            .map(|&(name, value)| CategorySlice { name: name.into(), value, count: 1 })
            .collect()
    }

    fn rows(points: &[(i32, f64)]) -> Vec<YearRow> {
        points
            .iter()
            .map(|&(year, value)| YearRow {
                year,
                values: BTreeMap::from([("GDP Growth".to_string(), value)]),
            })
            .collect()
    }

    #[test]
    fn empty_data_gives_exact_fallback() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::Categories(Vec::new());
        let s = describe_chart(ChartType::Bar, &data, &economic(), &RawContext::default(), &cfg);
        assert_eq!(s, "No data available for analysis.");
    }

    #[test]
    fn shape_mismatch_is_treated_as_no_data() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::TimeSeries(rows(&[(2020, 1.0)]));
        let s = describe_chart(ChartType::Bar, &data, &economic(), &RawContext::default(), &cfg);
        assert_eq!(s, NO_DATA);
    }

    #[test]
    fn bar_names_top_and_bottom() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::Categories(slices(&[("Bavaria", 4.0), ("Saxony", 1.0)]));
        let ctx = RawContext { years: vec![2020, 2024], countries: vec![] };
        let s = describe_chart(ChartType::Bar, &data, &economic(), &ctx, &cfg);
        assert!(s.contains("from 2020 to 2024"));
        assert!(s.contains("Bavaria shows the highest value at 4.00 %"));
        assert!(s.contains("Saxony has the lowest at 1.00 %"));
        assert!(s.contains("The average gdp growth across all regions is 2.50 %"));
        assert!(s.contains("economic indicator"));
    }

    #[test]
    fn bar_single_region_skips_the_spread_sentence() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::Categories(slices(&[("Bavaria", 4.0)]));
        let ctx = RawContext { years: vec![2024], countries: vec![] };
        let s = describe_chart(ChartType::Bar, &data, &economic(), &ctx, &cfg);
        assert!(s.contains("across 1 region for 2024"));
        assert!(!s.contains("highest value"));
    }

    #[test]
    fn pie_concentration_classes() {
        let cfg = ThresholdConfig::default();
        let ctx = RawContext::default();

        let concentrated =
            ChartDataset::Categories(slices(&[("A", 80.0), ("B", 10.0), ("C", 6.0), ("D", 4.0)]));
        let s = describe_chart(ChartType::Pie, &concentrated, &economic(), &ctx, &cfg);
        assert!(s.contains("A represents the largest share at 80.0%"));
        assert!(s.contains("highly concentrated"));

        // Top three are 75.0% exactly: not past the high boundary, past 50.
        let moderate = ChartDataset::Categories(slices(&[
            ("A", 30.0),
            ("B", 25.0),
            ("C", 20.0),
            ("D", 15.0),
            ("E", 10.0),
        ]));
        let s = describe_chart(ChartType::Pie, &moderate, &economic(), &ctx, &cfg);
        assert!(s.contains("moderate concentration"));

        let balanced = ChartDataset::Categories(slices(&[
            ("A", 10.0),
            ("B", 10.0),
            ("C", 10.0),
            ("D", 10.0),
            ("E", 10.0),
            ("F", 10.0),
            ("G", 10.0),
        ]));
        let s = describe_chart(ChartType::Pie, &balanced, &economic(), &ctx, &cfg);
        assert!(s.contains("relatively balanced"));
    }

    #[test]
    fn radial_uses_the_pie_template() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::Categories(slices(&[("A", 10.0), ("B", 5.0)]));
        let s = describe_chart(ChartType::Radial, &data, &economic(), &RawContext::default(), &cfg);
        assert!(s.starts_with("This pie chart shows the distribution"));
    }

    #[test]
    fn line_single_year_has_no_trend_language() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::TimeSeries(rows(&[(2024, 3.0)]));
        let ctx = RawContext { years: vec![2024], countries: vec!["DE".into(), "FR".into()] };
        let s = describe_chart(ChartType::Line, &data, &economic(), &ctx, &cfg);
        assert!(s.contains("across 2 regions for 2024"));
        assert!(!s.contains("trend"));
    }

    #[test]
    fn line_reports_direction_and_change() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::TimeSeries(rows(&[(2020, 100.0), (2024, 150.0)]));
        let ctx = RawContext { years: vec![2020, 2024], countries: vec![] };
        let s = describe_chart(ChartType::Line, &data, &economic(), &ctx, &cfg);
        assert!(s.contains("from 2020 to 2024"));
        assert!(s.contains("overall increasing trend"));
        assert!(s.contains("rising by approximately 50.0%"));
        assert!(s.contains("positive economic development"));
    }

    #[test]
    fn line_zero_baseline_phrases_insufficient_data() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::TimeSeries(rows(&[(2020, 0.0), (2024, 10.0)]));
        let ctx = RawContext { years: vec![2020, 2024], countries: vec![] };
        let s = describe_chart(ChartType::Line, &data, &economic(), &ctx, &cfg);
        assert!(s.contains("insufficient baseline data"));
        assert!(!s.contains("NaN") && !s.contains('%'));
    }

    #[test]
    fn comparison_sentence_names_strength_and_sign() {
        use crate::processing::{IndicatorComparison, RelationshipStrength, SeriesSummary};
        let cmp = IndicatorComparison {
            left: SeriesSummary::empty(),
            right: SeriesSummary::empty(),
            correlation: -0.82,
            strength: RelationshipStrength::Strong,
            matched_points: 12,
        };
        let s = describe_comparison(&cmp, &economic(), &Indicator::new("u", "Unemployment", "%", "Social"));
        assert!(s.contains("strong negative correlation (r = -0.82)"));
        assert!(s.contains("12 matched data points"));

        let sparse = IndicatorComparison { matched_points: 1, ..cmp };
        let s = describe_comparison(&sparse, &economic(), &Indicator::new("u", "Unemployment", "%", "Social"));
        assert!(s.starts_with("Not enough overlapping data points"));
    }

    #[test]
    fn scatter_gets_the_generic_sentence() {
        let cfg = ThresholdConfig::default();
        let data = ChartDataset::Points(vec![crate::model::PairPoint {
            x: 1.0,
            y: 2.0,
            year: 2024,
            country: "DE".into(),
        }]);
        let s = describe_chart(ChartType::Scatter, &data, &economic(), &RawContext::default(), &cfg);
        assert_eq!(
            s,
            "This scatter chart displays 1 data points for GDP Growth, showing the distribution across different economic metrics."
        );
    }
}
