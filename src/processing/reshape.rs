use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::debug;

use crate::model::{CategorySlice, ChartDataset, ChartType, Indicator, Observation, PairPoint, YearRow};

/// Structural input problems that indicate a broken caller rather than
/// sparse data. Sparse data (empty inputs, missing matches) never errors.
#[derive(Debug, Error, PartialEq)]
pub enum ReshapeError {
    #[error("observation '{id}' has a non-finite value; refusing to aggregate it")]
    NonFiniteValue { id: String },
}

/// Convert raw observations into the tabular shape a chart type needs.
///
/// Observations referencing indicators absent from `indicators` are ignored:
/// the caller's filter selection defines the working set. The input slices
/// are never mutated.
pub fn reshape(
    observations: &[Observation],
    indicators: &[Indicator],
    chart_type: ChartType,
) -> Result<ChartDataset, ReshapeError> {
    validate(observations)?;
    debug!(
        chart_type = chart_type.label(),
        observations = observations.len(),
        indicators = indicators.len(),
        "reshaping observations"
    );

    let dataset = match chart_type {
        ChartType::Line | ChartType::Area => reshape_time_series(observations, indicators),
        ChartType::Bar => reshape_categories(observations, indicators),
        ChartType::Pie | ChartType::Radial => reshape_indicator_means(observations, indicators),
        ChartType::Scatter => reshape_pairs(observations, indicators),
    };
    Ok(dataset)
}

fn validate(observations: &[Observation]) -> Result<(), ReshapeError> {
    for obs in observations {
        if !obs.value.is_finite() {
            return Err(ReshapeError::NonFiniteValue { id: obs.id.clone() });
        }
    }
    Ok(())
}

fn indicator_index<'a>(indicators: &'a [Indicator]) -> HashMap<&'a str, &'a Indicator> {
    indicators.iter().map(|i| (i.id.as_str(), i)).collect()
}

/// Line/area: one row per year, indicator values keyed by name. A later
/// observation for the same year and indicator overwrites the earlier one;
/// callers that need averaging pre-aggregate.
fn reshape_time_series(observations: &[Observation], indicators: &[Indicator]) -> ChartDataset {
    let by_id = indicator_index(indicators);
    let mut years: BTreeMap<i32, BTreeMap<String, f64>> = BTreeMap::new();

    for obs in observations {
        let Some(indicator) = by_id.get(obs.indicator_id.as_str()) else {
            continue;
        };
        years
            .entry(obs.year)
            .or_default()
            .insert(indicator.name.clone(), obs.value);
    }

    let rows = years
        .into_iter()
        .map(|(year, values)| YearRow { year, values })
        .collect();
    ChartDataset::TimeSeries(rows)
}

/// Bar: group by country, falling back to the indicator category when the
/// observation has no region. Slice values are means, in first-encountered
/// group order.
fn reshape_categories(observations: &[Observation], indicators: &[Indicator]) -> ChartDataset {
    let by_id = indicator_index(indicators);
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();

    for obs in observations {
        let Some(indicator) = by_id.get(obs.indicator_id.as_str()) else {
            continue;
        };
        let key = match &obs.country {
            Some(country) if !country.is_empty() => country.clone(),
            _ => indicator.category.clone(),
        };
        match sums.get_mut(&key) {
            Some((sum, count)) => {
                *sum += obs.value;
                *count += 1;
            }
            None => {
                order.push(key.clone());
                sums.insert(key, (obs.value, 1));
            }
        }
    }

    let slices = order
        .into_iter()
        .map(|name| {
            let (sum, count) = sums[&name];
            CategorySlice {
                value: sum / count as f64,
                count,
                name,
            }
        })
        .collect();
    ChartDataset::Categories(slices)
}

/// Pie/radial: one slice per indicator holding the mean of absolute values.
/// Sign is discarded deliberately (a pie cannot show negative shares) and
/// zero-mean slices are dropped to avoid zero-area segments.
fn reshape_indicator_means(observations: &[Observation], indicators: &[Indicator]) -> ChartDataset {
    let mut slices = Vec::new();
    for indicator in indicators {
        let values: Vec<f64> = observations
            .iter()
            .filter(|o| o.indicator_id == indicator.id)
            .map(|o| o.value.abs())
            .collect();
        if values.is_empty() {
            continue;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        if mean == 0.0 {
            continue;
        }
        slices.push(CategorySlice {
            name: indicator.name.clone(),
            value: mean,
            count: values.len(),
        });
    }
    ChartDataset::Categories(slices)
}

/// Scatter: pair the first two indicators on the (year, country) key.
/// Fewer than two indicators is a defined empty state, not an error.
/// Duplicate observations for the same key are averaged; unmatched
/// observations are dropped without emitting partial points.
fn reshape_pairs(observations: &[Observation], indicators: &[Indicator]) -> ChartDataset {
    if indicators.len() < 2 {
        return ChartDataset::Points(Vec::new());
    }
    let (x_ind, y_ind) = (&indicators[0], &indicators[1]);

    let x_side = keyed_means(observations, &x_ind.id);
    let y_side = keyed_means(observations, &y_ind.id);

    // BTreeMap iteration keeps the output ordered by (year, country).
    let points: Vec<PairPoint> = x_side
        .into_iter()
        .filter_map(|((year, country), x)| {
            y_side
                .get(&(year, country.clone()))
                .map(|&y| PairPoint { x, y, year, country })
        })
        .collect();
    ChartDataset::Points(points)
}

fn keyed_means(observations: &[Observation], indicator_id: &str) -> BTreeMap<(i32, String), f64> {
    let mut sums: BTreeMap<(i32, String), (f64, usize)> = BTreeMap::new();
    for obs in observations.iter().filter(|o| o.indicator_id == indicator_id) {
        let key = (obs.year, obs.country.clone().unwrap_or_default());
        let entry = sums.entry(key).or_insert((0.0, 0));
        entry.0 += obs.value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

/// Stable sort by value descending: higher values first, ties keep their
/// first-encountered order. For "ranked" bar displays.
pub fn rank_descending(slices: &[CategorySlice]) -> Vec<CategorySlice> {
    let mut ranked = slices.to_vec();
    ranked.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators() -> Vec<Indicator> {
        vec![
            Indicator::new("gdp", "GDP Growth", "%", "Economic"),
            Indicator::new("unemp", "Unemployment", "%", "Social"),
        ]
    }

    #[test]
    fn bar_groups_by_country_and_averages() {
        let obs = vec![
            Observation::new("1", "gdp", Some("A"), 2024, 10.0),
            Observation::new("2", "gdp", Some("A"), 2024, 20.0),
            Observation::new("3", "gdp", Some("B"), 2024, 5.0),
        ];
        let ChartDataset::Categories(slices) =
            reshape(&obs, &indicators(), ChartType::Bar).unwrap()
        else {
            panic!("expected categories");
        };
        assert_eq!(
            slices,
            vec![
                CategorySlice { name: "A".into(), value: 15.0, count: 2 },
                CategorySlice { name: "B".into(), value: 5.0, count: 1 },
            ]
        );
    }

    #[test]
    fn bar_falls_back_to_category_without_country() {
        let obs = vec![
            Observation::new("1", "gdp", None, 2024, 3.0),
            Observation::new("2", "unemp", Some("A"), 2024, 6.0),
        ];
        let ChartDataset::Categories(slices) =
            reshape(&obs, &indicators(), ChartType::Bar).unwrap()
        else {
            panic!("expected categories");
        };
        assert_eq!(slices[0].name, "Economic");
        assert_eq!(slices[1].name, "A");
    }

    #[test]
    fn line_sorted_by_year_with_later_duplicate_winning() {
        let obs = vec![
            Observation::new("1", "gdp", Some("A"), 2022, 2.0),
            Observation::new("2", "gdp", Some("A"), 2020, 1.0),
            Observation::new("3", "gdp", Some("A"), 2020, 1.5),
        ];
        let ChartDataset::TimeSeries(rows) =
            reshape(&obs, &indicators(), ChartType::Line).unwrap()
        else {
            panic!("expected time series");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2020);
        assert_eq!(rows[0].values["GDP Growth"], 1.5);
        assert_eq!(rows[1].year, 2022);
    }

    #[test]
    fn pie_uses_absolute_means_and_drops_zero_slices() {
        let inds = vec![
            Indicator::new("a", "A", "", "Economic"),
            Indicator::new("b", "B", "", "Economic"),
            Indicator::new("c", "C", "", "Economic"),
        ];
        let obs = vec![
            Observation::new("1", "a", None, 2024, -4.0),
            Observation::new("2", "a", None, 2024, 2.0),
            Observation::new("3", "b", None, 2024, 0.0),
        ];
        let ChartDataset::Categories(slices) = reshape(&obs, &inds, ChartType::Pie).unwrap()
        else {
            panic!("expected categories");
        };
        // "b" has a zero mean and "c" has no data; only "a" survives.
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].name, "A");
        assert_eq!(slices[0].value, 3.0);
        assert!(slices.iter().all(|s| s.value != 0.0));
    }

    #[test]
    fn scatter_needs_two_indicators() {
        let inds = vec![Indicator::new("a", "A", "", "Economic")];
        let obs = vec![Observation::new("1", "a", Some("X"), 2024, 1.0)];
        let ChartDataset::Points(points) = reshape(&obs, &inds, ChartType::Scatter).unwrap()
        else {
            panic!("expected points");
        };
        assert!(points.is_empty());
    }

    #[test]
    fn scatter_pairs_on_year_and_country() {
        let obs = vec![
            Observation::new("1", "gdp", Some("A"), 2020, 1.0),
            Observation::new("2", "unemp", Some("A"), 2020, 7.0),
            Observation::new("3", "gdp", Some("B"), 2020, 2.0),
            // no unemployment for B in 2020: dropped
            Observation::new("4", "unemp", Some("A"), 2021, 6.0),
            // no gdp for A in 2021: dropped
        ];
        let ChartDataset::Points(points) =
            reshape(&obs, &indicators(), ChartType::Scatter).unwrap()
        else {
            panic!("expected points");
        };
        assert_eq!(
            points,
            vec![PairPoint { x: 1.0, y: 7.0, year: 2020, country: "A".into() }]
        );
    }

    #[test]
    fn scatter_averages_duplicate_keys() {
        let obs = vec![
            Observation::new("1", "gdp", Some("A"), 2020, 1.0),
            Observation::new("2", "gdp", Some("A"), 2020, 3.0),
            Observation::new("3", "unemp", Some("A"), 2020, 8.0),
        ];
        let ChartDataset::Points(points) =
            reshape(&obs, &indicators(), ChartType::Scatter).unwrap()
        else {
            panic!("expected points");
        };
        assert_eq!(points[0].x, 2.0);
        assert_eq!(points[0].y, 8.0);
    }

    #[test]
    fn non_finite_value_fails_fast() {
        let obs = vec![Observation::new("bad", "gdp", Some("A"), 2024, f64::NAN)];
        let err = reshape(&obs, &indicators(), ChartType::Bar).unwrap_err();
        assert_eq!(err, ReshapeError::NonFiniteValue { id: "bad".into() });
    }

    #[test]
    fn unknown_indicator_is_ignored_not_an_error() {
        let obs = vec![Observation::new("1", "nope", Some("A"), 2024, 1.0)];
        let dataset = reshape(&obs, &indicators(), ChartType::Bar).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn rank_descending_is_stable_on_ties() {
        let slices = vec![
            CategorySlice { name: "low".into(), value: 1.0, count: 1 },
            CategorySlice { name: "tie-first".into(), value: 5.0, count: 1 },
            CategorySlice { name: "tie-second".into(), value: 5.0, count: 1 },
        ];
        let ranked = rank_descending(&slices);
        assert_eq!(ranked[0].name, "tie-first");
        assert_eq!(ranked[1].name, "tie-second");
        assert_eq!(ranked[2].name, "low");
    }
}
