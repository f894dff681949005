use crate::model::{
    AxisLayout, AxisOrient, AxisTick, HeatCell, HeatmapLayout, LegendLayout, LegendSwatch,
    TitleLayout,
};
use crate::scale::{BandScale, LinearScale, QuantizeScale};
use crate::tooltip::TooltipContent;
use crate::{Error, Result};
use heatgrid_core::{Dataset, HeatmapConfig, MonthIndex};

/// Half-pixel shift d3-axis applies at a device pixel ratio of 1.
pub const CRISP_OFFSET: f64 = 0.5;

const TITLE_Y: f64 = 24.0;
const DESCRIPTION_Y: f64 = 46.0;

/// Tick offset for a band: the band center, as d3-axis computes it.
fn band_center<T: Clone + Eq + std::hash::Hash>(scale: &BandScale<T>, value: &T) -> Option<f64> {
    let inset = (scale.bandwidth() - CRISP_OFFSET * 2.0).max(0.0) / 2.0;
    Some(scale.position(value)? + inset)
}

pub fn layout_heatmap(dataset: &Dataset, config: &HeatmapConfig) -> Result<HeatmapLayout> {
    config.validate()?;
    let temperature_extent = dataset.temperature_extent().ok_or(Error::EmptyDataset)?;

    let plot_width = config.plot_width();
    let plot_height = config.plot_height();

    let years = dataset.years();
    let x = BandScale::new(years, (0.0, plot_width), config.band_padding);
    let y = BandScale::new(
        MonthIndex::all().collect(),
        (0.0, plot_height),
        config.band_padding,
    );
    let color = QuantizeScale::new(temperature_extent, config.palette.clone());
    let legend_scale = LinearScale::new(temperature_extent, (0.0, config.legend_width));

    tracing::debug!(
        years = x.domain().len(),
        min = temperature_extent.0,
        max = temperature_extent.1,
        buckets = color.len(),
        "built heatmap scales"
    );

    let x_axis = AxisLayout {
        id: Some("x-axis".to_string()),
        orient: AxisOrient::Bottom,
        translate: (0.0, plot_height),
        range: x.range(),
        ticks: x
            .domain()
            .iter()
            .filter(|year| year.rem_euclid(config.year_tick_interval) == 0)
            .filter_map(|year| {
                Some(AxisTick {
                    position: band_center(&x, year)?,
                    label: year.to_string(),
                })
            })
            .collect(),
    };

    let y_axis = AxisLayout {
        id: Some("y-axis".to_string()),
        orient: AxisOrient::Left,
        translate: (0.0, 0.0),
        range: y.range(),
        ticks: y
            .domain()
            .iter()
            .filter_map(|month| {
                Some(AxisTick {
                    position: band_center(&y, month)?,
                    label: month.name().to_string(),
                })
            })
            .collect(),
    };

    let mut cells = Vec::with_capacity(dataset.len());
    for obs in &dataset.observations {
        let temperature = dataset.temperature(obs);
        let (Some(cx), Some(cy)) = (x.position(&obs.year), y.position(&obs.month)) else {
            continue;
        };
        let Some(fill) = color.apply(temperature) else {
            continue;
        };
        cells.push(HeatCell {
            year: obs.year,
            month: obs.month,
            temperature,
            x: cx,
            y: cy,
            width: x.bandwidth(),
            height: y.bandwidth(),
            fill: fill.clone(),
            tooltip: TooltipContent::new(obs.year, obs.month, temperature),
        });
    }
    if cells.len() != dataset.len() {
        tracing::warn!(
            dropped = dataset.len() - cells.len(),
            "observations without a color bucket were not drawn"
        );
    }

    let swatches = (0..color.len())
        .filter_map(|i| {
            let (low, high) = color.invert_extent(i)?;
            let x0 = legend_scale.apply(low);
            Some(LegendSwatch {
                low,
                high,
                x: x0,
                width: legend_scale.apply(high) - x0,
                fill: color.apply(low)?.clone(),
            })
        })
        .collect();

    let tick_format = legend_scale.tick_format(config.legend_ticks);
    let legend = LegendLayout {
        translate: (
            (plot_width - config.legend_width) / 2.0,
            plot_height + config.margin.bottom / 2.0,
        ),
        width: config.legend_width,
        height: config.legend_height,
        swatches,
        axis: AxisLayout {
            id: None,
            orient: AxisOrient::Bottom,
            translate: (0.0, config.legend_height),
            range: legend_scale.range(),
            ticks: legend_scale
                .ticks(config.legend_ticks)
                .into_iter()
                .map(|t| AxisTick {
                    position: legend_scale.apply(t),
                    label: tick_format(t),
                })
                .collect(),
        },
    };

    let title = config.title.as_ref().map(|title| {
        let description = match dataset.year_extent() {
            Some((first, last)) => format!(
                "{first} - {last}: base temperature {}\u{2103}",
                ryu_js::Buffer::new().format(dataset.base_temperature)
            ),
            None => String::new(),
        };
        TitleLayout {
            title: title.clone(),
            description,
            x: config.width / 2.0,
            title_y: TITLE_Y,
            description_y: DESCRIPTION_Y,
        }
    });

    Ok(HeatmapLayout {
        width: config.width,
        height: config.height,
        margin: config.margin,
        plot_width,
        plot_height,
        base_temperature: dataset.base_temperature,
        temperature_extent,
        thresholds: color.thresholds().to_vec(),
        x_axis,
        y_axis,
        cells,
        legend,
        title,
        tooltip_offset: config.tooltip_offset,
    })
}
