use crate::tooltip::TooltipContent;
use heatgrid_core::{Margin, MonthIndex, Offset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisTick {
    /// Offset along the axis, already centered on the band for band scales.
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisLayout {
    pub id: Option<String>,
    pub orient: AxisOrient,
    /// Group translation relative to its parent.
    pub translate: (f64, f64),
    /// Scale range the domain line spans.
    pub range: (f64, f64),
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatCell {
    pub year: i32,
    pub month: MonthIndex,
    /// `baseTemperature + variance`; the single value behind fill, attribute and tooltip.
    pub temperature: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendSwatch {
    pub low: f64,
    pub high: f64,
    pub x: f64,
    pub width: f64,
    pub fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendLayout {
    pub translate: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub swatches: Vec<LegendSwatch>,
    pub axis: AxisLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleLayout {
    pub title: String,
    pub description: String,
    pub x: f64,
    pub title_y: f64,
    pub description_y: f64,
}

/// Everything the SVG emitter draws, in canvas units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub plot_width: f64,
    pub plot_height: f64,
    pub base_temperature: f64,
    pub temperature_extent: (f64, f64),
    pub thresholds: Vec<f64>,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
    pub cells: Vec<HeatCell>,
    pub legend: LegendLayout,
    pub title: Option<TitleLayout>,
    pub tooltip_offset: Offset,
}

impl HeatmapLayout {
    pub fn cell(&self, year: i32, month: MonthIndex) -> Option<&HeatCell> {
        self.cells
            .iter()
            .find(|c| c.year == year && c.month == month)
    }

    /// Center of a cell in canvas (root SVG) coordinates.
    pub fn cell_center(&self, cell: &HeatCell) -> (f64, f64) {
        (
            self.margin.left + cell.x + cell.width / 2.0,
            self.margin.top + cell.y + cell.height / 2.0,
        )
    }
}
