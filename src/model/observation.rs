use serde::{Deserialize, Serialize};

/// One measured data point: an indicator value for one country and year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub id: String,
    #[serde(rename = "indicatorId", alias = "indicator_id")]
    pub indicator_id: String,
    /// Region label. Absent for non-regional series; grouping falls back to
    /// the indicator category.
    #[serde(default)]
    pub country: Option<String>,
    pub year: i32,
    pub value: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Observation {
    pub fn new(id: &str, indicator_id: &str, country: Option<&str>, year: i32, value: f64) -> Self {
        Self {
            id: id.to_string(),
            indicator_id: indicator_id.to_string(),
            country: country.map(|c| c.to_string()),
            year,
            value,
            notes: None,
        }
    }
}

/// Metadata describing a measured quantity, e.g. "GDP Growth" in percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub id: String,
    pub name: String,
    /// May be empty; narrative falls back to a generic "units".
    #[serde(default)]
    pub unit: String,
    /// Drives category-conditioned narrative phrasing.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Indicator {
    pub fn new(id: &str, name: &str, unit: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            category: category.to_string(),
            tags: Vec::new(),
        }
    }

    /// Unit for display, with the generic fallback for empty metadata.
    pub fn display_unit(&self) -> &str {
        if self.unit.is_empty() {
            "units"
        } else {
            &self.unit
        }
    }
}
