#![forbid(unsafe_code)]

//! Headless data layer for `heatgrid`: the temperature-variance document, its normalized
//! [`Dataset`], render configuration and the sources a document can be loaded from.

pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod month;
pub mod source;

pub use config::{HeatmapConfig, Margin, Offset};
pub use document::{RawDocument, RawObservation, normalize, parse_document};
pub use error::{Error, Result};
pub use model::{Dataset, MonthIndex, Observation};
pub use source::{DataSource, FileSource, StaticSource};

#[cfg(feature = "http")]
pub use source::HttpSource;

/// Reads and normalizes one document (executor-free).
pub fn load_dataset_sync(source: &dyn DataSource) -> Result<Dataset> {
    let text = source.read_text()?;
    tracing::debug!(source = %source.describe(), bytes = text.len(), "loaded document");
    parse_document(&text)
}

/// Loads one document. The returned future resolves exactly once and holds no shared state.
pub async fn load_dataset(source: &dyn DataSource) -> Result<Dataset> {
    load_dataset_sync(source)
}

/// The HTTP source described by `config.source_url`.
#[cfg(feature = "http")]
pub fn source_for_config(config: &HeatmapConfig) -> HttpSource {
    HttpSource::new(config.source_url.clone())
}

#[cfg(test)]
mod tests;
