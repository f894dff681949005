use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Cool to warm.
pub const DEFAULT_PALETTE: [&str; 4] = ["#4575b4", "#74add1", "#fdae61", "#d73027"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 60.0,
            right: 20.0,
            bottom: 80.0,
            left: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Static render configuration.
///
/// `width`/`height` are the outer canvas size; the plot area is what remains after the margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeatmapConfig {
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
    pub source_url: String,
    pub band_padding: f64,
    pub palette: Vec<String>,
    pub year_tick_interval: i32,
    pub legend_width: f64,
    pub legend_height: f64,
    pub legend_ticks: usize,
    pub tooltip_offset: Offset,
    pub title: Option<String>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            width: 1000.0,
            height: 500.0,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            band_padding: 0.01,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            year_tick_interval: 10,
            legend_width: 300.0,
            legend_height: 20.0,
            legend_ticks: 5,
            tooltip_offset: Offset { x: 5.0, y: -28.0 },
            title: None,
        }
    }
}

impl HeatmapConfig {
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value_with_overrides(&value)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Deep-merges `overrides` over the defaults and validates the result.
    pub fn from_value_with_overrides(overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(Self::default())?;
        deep_merge_value(&mut base, overrides);
        let cfg: Self = serde_json::from_value(base)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Applies further overrides on top of an existing config.
    pub fn merged(&self, overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        deep_merge_value(&mut base, overrides);
        let cfg: Self = serde_json::from_value(base)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.plot_width() > 0.0 && self.plot_height() > 0.0) {
            return Err(Error::invalid_config(format!(
                "plot area must be positive (got {}x{})",
                self.plot_width(),
                self.plot_height()
            )));
        }
        if self.palette.is_empty() {
            return Err(Error::invalid_config("palette must contain at least one color"));
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(Error::invalid_config("bandPadding must be in [0, 1)"));
        }
        if self.year_tick_interval <= 0 {
            return Err(Error::invalid_config("yearTickInterval must be positive"));
        }
        if !(self.legend_width > 0.0 && self.legend_height > 0.0) {
            return Err(Error::invalid_config(
                "legendWidth and legendHeight must be positive",
            ));
        }
        Ok(())
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// Builds a one-key override object from a dotted path (`"margin.top"`).
pub fn override_at(dotted_path: &str, value: Value) -> Value {
    let mut root = Map::new();
    let mut segments = dotted_path.split('.').collect::<Vec<_>>();
    let Some(last) = segments.pop() else {
        return Value::Object(root);
    };
    let mut leaf = Map::new();
    leaf.insert(last.to_string(), value);
    let mut cur = Value::Object(leaf);
    while let Some(seg) = segments.pop() {
        let mut m = Map::new();
        m.insert(seg.to_string(), cur);
        cur = Value::Object(m);
    }
    if let Value::Object(m) = cur {
        root = m;
    }
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_plot_area_is_890_by_360() {
        let cfg = HeatmapConfig::default();
        assert_eq!(cfg.plot_width(), 890.0);
        assert_eq!(cfg.plot_height(), 360.0);
        assert_eq!(cfg.palette.len(), 4);
        cfg.validate().unwrap();
    }

    #[test]
    fn overrides_merge_nested_keys() {
        let cfg = HeatmapConfig::from_value_with_overrides(&json!({
            "margin": { "top": 10 },
            "title": "Monthly Global Land-Surface Temperature"
        }))
        .unwrap();
        assert_eq!(cfg.margin.top, 10.0);
        assert_eq!(cfg.margin.left, 90.0);
        assert_eq!(
            cfg.title.as_deref(),
            Some("Monthly Global Land-Surface Temperature")
        );
    }

    #[test]
    fn override_at_builds_nested_object() {
        assert_eq!(
            override_at("tooltipOffset.x", json!(12)),
            json!({ "tooltipOffset": { "x": 12 } })
        );
    }

    #[test]
    fn rejects_margins_that_swallow_the_plot() {
        let err = HeatmapConfig::from_value_with_overrides(&json!({ "width": 100 }))
            .unwrap_err()
            .to_string();
        assert!(err.contains("plot area must be positive"), "{err}");
    }

    #[test]
    fn rejects_empty_palette() {
        let err = HeatmapConfig::default()
            .merged(&json!({ "palette": [] }))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
