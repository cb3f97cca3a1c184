use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::model::{Indicator, Observation};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("unsupported file format: .{0} (expected .json or .csv)")]
    UnsupportedFormat(String),
    #[error("no observations found in {0}")]
    Empty(String),
}

/// A fully loaded input set: indicator metadata plus observation records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub indicators: Vec<Indicator>,
    pub observations: Vec<Observation>,
}

/// One denormalized CSV row: observation fields with the indicator metadata
/// inlined, the shape backend exports use.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(default)]
    id: Option<String>,
    indicator_id: String,
    #[serde(default)]
    indicator_name: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    country: Option<String>,
    year: i32,
    value: f64,
    #[serde(default)]
    notes: Option<String>,
}

/// Load a dataset from a JSON document or a denormalized CSV export.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let dataset = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    if dataset.observations.is_empty() {
        return Err(LoadError::Empty(path.display().to_string()));
    }
    info!(
        path = %path.display(),
        indicators = dataset.indicators.len(),
        observations = dataset.observations.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut dataset: Dataset =
        serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.display().to_string(),
            source,
        })?;
    for indicator in &mut dataset.indicators {
        indicator.name = clean_indicator_name(&indicator.name);
    }
    Ok(dataset)
}

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|source| LoadError::Csv {
            path: path.display().to_string(),
            source,
        })?;

    let mut indicators: Vec<Indicator> = Vec::new();
    let mut observations = Vec::new();

    for (idx, result) in reader.deserialize::<CsvRecord>().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.display().to_string(),
            source,
        })?;

        if !indicators.iter().any(|i| i.id == record.indicator_id) {
            let raw_name = record
                .indicator_name
                .clone()
                .unwrap_or_else(|| record.indicator_id.clone());
            indicators.push(Indicator::new(
                &record.indicator_id,
                &clean_indicator_name(&raw_name),
                record.unit.as_deref().unwrap_or(""),
                record.category.as_deref().unwrap_or(""),
            ));
        }

        observations.push(Observation {
            id: record.id.unwrap_or_else(|| format!("row-{}", idx + 1)),
            indicator_id: record.indicator_id,
            country: record.country.filter(|c| !c.is_empty()),
            year: record.year,
            value: record.value,
            notes: record.notes,
        });
    }

    Ok(Dataset {
        indicators,
        observations,
    })
}

static NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+_").expect("static regex"));
static TRAILING_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+$").expect("static regex"));
static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Normalize raw backend indicator names for display: drop numeric prefixes
/// and trailing counters, turn underscores into spaces, title-case words.
pub fn clean_indicator_name(name: &str) -> String {
    let stripped = NUMERIC_PREFIX.replace(name, "");
    let spaced = stripped.replace('_', " ");
    let trimmed = TRAILING_COUNTER.replace(&spaced, "");
    let collapsed = MULTI_SPACE.replace_all(trimmed.trim(), " ");

    collapsed
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_name_examples() {
        assert_eq!(clean_indicator_name("03_gdp_growth_2"), "Gdp Growth");
        assert_eq!(clean_indicator_name("unemployment_rate"), "Unemployment Rate");
        assert_eq!(clean_indicator_name("  co2   emissions "), "Co2 Emissions");
        assert_eq!(clean_indicator_name("GDP Growth"), "GDP Growth");
    }

    #[test]
    fn csv_roundtrip_builds_indicators_and_observations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obs.csv");
        std::fs::write(
            &path,
            "id,indicator_id,indicator_name,unit,category,country,year,value\n\
             o1,gdp,01_gdp_growth,%,Economic,DE,2020,1.1\n\
             o2,gdp,01_gdp_growth,%,Economic,DE,2021,1.9\n\
             ,unemp,unemployment_rate,%,Social,,2020,5.4\n",
        )
        .unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.indicators.len(), 2);
        assert_eq!(dataset.indicators[0].name, "Gdp Growth");
        assert_eq!(dataset.indicators[1].name, "Unemployment Rate");
        assert_eq!(dataset.observations.len(), 3);
        // Blank id and country fall back to a row id and None.
        assert_eq!(dataset.observations[2].id, "row-3");
        assert_eq!(dataset.observations[2].country, None);
    }

    #[test]
    fn json_dataset_loads_and_cleans_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{
                "indicators": [{"id": "gdp", "name": "02_gdp_growth", "unit": "%", "category": "Economic"}],
                "observations": [{"id": "o1", "indicatorId": "gdp", "country": "DE", "year": 2020, "value": 1.5}]
            }"#,
        )
        .unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.indicators[0].name, "Gdp Growth");
        assert_eq!(dataset.observations[0].indicator_id, "gdp");
    }

    #[test]
    fn unsupported_extension_errors() {
        let err = load_dataset(Path::new("data.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn empty_dataset_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"indicators": [], "observations": []}"#).unwrap();
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, LoadError::Empty(_)));
    }
}
