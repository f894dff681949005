use crate::model::{Dataset, MonthIndex, Observation};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;

/// The source document, as published (`month` is one-based).
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    #[serde(rename = "baseTemperature")]
    pub base_temperature: f64,
    #[serde(rename = "monthlyVariance")]
    pub monthly_variance: Vec<RawObservation>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawObservation {
    pub year: i32,
    pub month: i64,
    pub variance: f64,
}

pub fn parse_document(text: &str) -> Result<Dataset> {
    let raw: RawDocument = serde_json::from_str(text)?;
    normalize(raw)
}

/// Validates a raw document and converts every month to a zero-based index.
pub fn normalize(raw: RawDocument) -> Result<Dataset> {
    if !raw.base_temperature.is_finite() {
        return Err(Error::invalid_document("baseTemperature must be a finite number"));
    }
    if raw.monthly_variance.is_empty() {
        return Err(Error::invalid_document("monthlyVariance is empty"));
    }

    let mut observations = Vec::with_capacity(raw.monthly_variance.len());
    let mut seen: HashSet<(i32, MonthIndex)> = HashSet::with_capacity(raw.monthly_variance.len());
    let mut duplicates = 0usize;

    for (idx, rec) in raw.monthly_variance.iter().enumerate() {
        let Some(month) = MonthIndex::from_one_based(rec.month) else {
            return Err(Error::invalid_document(format!(
                "monthlyVariance[{idx}]: month {} is outside 1..=12",
                rec.month
            )));
        };
        if !rec.variance.is_finite() {
            return Err(Error::invalid_document(format!(
                "monthlyVariance[{idx}]: variance must be a finite number"
            )));
        }
        if !seen.insert((rec.year, month)) {
            duplicates += 1;
        }
        observations.push(Observation {
            year: rec.year,
            month,
            variance: rec.variance,
        });
    }

    if duplicates > 0 {
        tracing::warn!(duplicates, "dataset repeats (year, month) pairs; cells will overlap");
    }
    tracing::debug!(
        observations = observations.len(),
        base_temperature = raw.base_temperature,
        "normalized temperature document"
    );

    Ok(Dataset::new(raw.base_temperature, observations))
}
