use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chart families the reshaper can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Scatter,
    Area,
    Radial,
}

impl ChartType {
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
            ChartType::Area => "area",
            ChartType::Radial => "radial",
        }
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(ChartType::Line),
            "bar" => Ok(ChartType::Bar),
            "pie" => Ok(ChartType::Pie),
            "scatter" => Ok(ChartType::Scatter),
            "area" => Ok(ChartType::Area),
            "radial" => Ok(ChartType::Radial),
            other => Err(format!(
                "Unknown chart type '{other}' (expected line, bar, pie, scatter, area or radial)"
            )),
        }
    }
}

/// One row of a time-series dataset: every indicator value seen in a year,
/// keyed by indicator name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRow {
    pub year: i32,
    pub values: BTreeMap<String, f64>,
}

/// One slice of a category aggregate. `value` is always the arithmetic mean
/// of the `count` observations folded into it, never a raw sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    pub count: usize,
}

/// One matched point in a two-indicator pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairPoint {
    pub x: f64,
    pub y: f64,
    pub year: i32,
    pub country: String,
}

/// Chart-ready output of the reshaper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartDataset {
    TimeSeries(Vec<YearRow>),
    Categories(Vec<CategorySlice>),
    Points(Vec<PairPoint>),
}

impl ChartDataset {
    pub fn is_empty(&self) -> bool {
        match self {
            ChartDataset::TimeSeries(rows) => rows.is_empty(),
            ChartDataset::Categories(slices) => slices.is_empty(),
            ChartDataset::Points(points) => points.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChartDataset::TimeSeries(rows) => rows.len(),
            ChartDataset::Categories(slices) => slices.len(),
            ChartDataset::Points(points) => points.len(),
        }
    }
}

/// Filter context the narrative layer uses for time ranges and region counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContext {
    pub years: Vec<i32>,
    pub countries: Vec<String>,
}

impl RawContext {
    /// Derive the context from the observations feeding a chart.
    pub fn from_observations(observations: &[super::Observation]) -> Self {
        let mut years: Vec<i32> = observations.iter().map(|o| o.year).collect();
        years.sort_unstable();
        years.dedup();

        let mut countries: Vec<String> = observations
            .iter()
            .filter_map(|o| o.country.clone())
            .collect();
        countries.sort();
        countries.dedup();

        Self { years, countries }
    }
}
