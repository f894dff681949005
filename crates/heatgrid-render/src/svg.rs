use crate::model::HeatmapLayout;
use crate::text::DeterministicTextMeasurer;
use crate::tooltip::TooltipState;
use crate::{Error, Result};
use heatgrid_core::MonthIndex;

mod axis;
mod node;
mod script;
mod util;

use node::{Tree, node};
pub(crate) use util::escape_xml;
use util::{fmt, js_number, translate};

pub const DEFAULT_SVG_ID: &str = "heatmap";

/// A cell to render with its tooltip already showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTarget {
    pub year: i32,
    pub month: MonthIndex,
}

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; also scopes the stylesheet and the hover script.
    pub svg_id: Option<String>,
    /// Embed the `<script>` that drives the hover tooltip.
    pub include_script: bool,
    /// Render a static snapshot with the tooltip shown over this cell.
    pub hover: Option<HoverTarget>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            svg_id: None,
            include_script: true,
            hover: None,
        }
    }
}

impl SvgRenderOptions {
    /// Options for rasterizers, which ignore scripts.
    pub fn static_output() -> Self {
        Self {
            include_script: false,
            ..Self::default()
        }
    }
}

/// Converts an arbitrary string into a conservative SVG `id` token.
///
/// - trims whitespace
/// - replaces unsupported characters with `-`
/// - ensures the id starts with an ASCII letter by prefixing `h-` when needed
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_SVG_ID.to_string();
    }

    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }

    let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_ok {
        out.insert_str(0, "h-");
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "h" {
        return DEFAULT_SVG_ID.to_string();
    }
    out.to_string()
}

pub fn render_heatmap_svg(layout: &HeatmapLayout, options: &SvgRenderOptions) -> Result<String> {
    let svg_id = sanitize_svg_id(options.svg_id.as_deref().unwrap_or(DEFAULT_SVG_ID));

    let mut tooltip = TooltipState::default();
    if let Some(target) = options.hover {
        let Some(cell) = layout.cell(target.year, target.month) else {
            return Err(Error::HoverTargetNotFound {
                year: target.year,
                month: target.month.get(),
            });
        };
        tooltip.on_pointer_enter(
            &cell.tooltip,
            layout.cell_center(cell),
            layout.tooltip_offset,
        );
    }

    let mut tree = Tree::new(
        node("svg")
            .attr("id", svg_id.as_str())
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", fmt(layout.width))
            .attr("height", fmt(layout.height))
            .attr(
                "viewBox",
                format!("0 0 {} {}", fmt(layout.width), fmt(layout.height)),
            ),
    );
    tree.push_child(
        Tree::ROOT,
        node("style").text(&script::heatmap_css(&svg_id)),
    );

    if let Some(title) = &layout.title {
        tree.push_child(
            Tree::ROOT,
            node("text")
                .attr("id", "title")
                .attr("x", fmt(title.x))
                .attr("y", fmt(title.title_y))
                .attr("text-anchor", "middle")
                .text(&title.title),
        );
        tree.push_child(
            Tree::ROOT,
            node("text")
                .attr("id", "description")
                .attr("x", fmt(title.x))
                .attr("y", fmt(title.description_y))
                .attr("text-anchor", "middle")
                .text(&title.description),
        );
    }

    let plot = tree.push_child(
        Tree::ROOT,
        node("g").attr("transform", translate(layout.margin.left, layout.margin.top)),
    );

    axis::push_axis(&mut tree, plot, &layout.x_axis);
    axis::push_axis(&mut tree, plot, &layout.y_axis);

    for cell in &layout.cells {
        tree.push_child(
            plot,
            node("rect")
                .attr("class", "cell")
                .attr("data-month", cell.month.get().to_string())
                .attr("data-year", cell.year.to_string())
                .attr("data-temp", js_number(cell.temperature))
                .attr("data-tooltip", cell.tooltip.html())
                .attr("x", fmt(cell.x))
                .attr("y", fmt(cell.y))
                .attr("width", fmt(cell.width))
                .attr("height", fmt(cell.height))
                .attr("style", format!("fill: {};", cell.fill)),
        );
    }

    let legend = tree.push_child(
        plot,
        node("g")
            .attr("id", "legend")
            .attr(
                "transform",
                translate(layout.legend.translate.0, layout.legend.translate.1),
            ),
    );
    axis::push_axis(&mut tree, legend, &layout.legend.axis);
    for swatch in &layout.legend.swatches {
        tree.push_child(
            legend,
            node("rect")
                .attr("x", fmt(swatch.x))
                .attr("y", "0")
                .attr("width", fmt(swatch.width))
                .attr("height", fmt(layout.legend.height))
                .attr("fill", swatch.fill.as_str()),
        );
    }

    push_tooltip(&mut tree, &tooltip);

    if options.include_script {
        tree.push_child(
            Tree::ROOT,
            node("script")
                .attr("type", "application/ecmascript")
                .cdata(&script::hover_script(&svg_id, layout.tooltip_offset)),
        );
    }

    tracing::debug!(cells = layout.cells.len(), hover = tooltip.is_visible(), "rendered heatmap svg");
    Ok(tree.render())
}

fn push_tooltip(tree: &mut Tree, state: &TooltipState) {
    let mut g = node("g").attr("id", "tooltip").attr("pointer-events", "none");
    let TooltipState::Visible { x, y, html, year } = state else {
        g = g.attr("visibility", "hidden");
        let gid = tree.push_child(Tree::ROOT, g);
        tree.push_child(gid, node("rect").attr("rx", "3").attr("width", "0").attr("height", "0"));
        tree.push_child(gid, node("text"));
        return;
    };

    let lines = html.split(crate::tooltip::LINE_BREAK).collect::<Vec<_>>();
    let metrics = DeterministicTextMeasurer::default().measure_lines(&lines, script::TOOLTIP_FONT_SIZE);

    g = g
        .attr("visibility", "visible")
        .attr("data-year", year.to_string())
        .attr("transform", translate(*x, *y));
    let gid = tree.push_child(Tree::ROOT, g);
    tree.push_child(
        gid,
        node("rect")
            .attr("rx", "3")
            .attr("width", fmt(metrics.width + 2.0 * script::TOOLTIP_PADDING))
            .attr("height", fmt(metrics.height + 2.0 * script::TOOLTIP_PADDING)),
    );
    let text = tree.push_child(gid, node("text"));
    for line in lines {
        tree.push_child(
            text,
            node("tspan")
                .attr("x", fmt(script::TOOLTIP_PADDING))
                .attr("dy", "1.2em")
                .text(line),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_svg_id_keeps_safe_tokens() {
        assert_eq!(sanitize_svg_id("heatmap"), "heatmap");
        assert_eq!(sanitize_svg_id("  my chart  "), "my-chart");
        assert_eq!(sanitize_svg_id("1753"), "h-1753");
        assert_eq!(sanitize_svg_id("\"><script>"), "h-script");
        assert_eq!(sanitize_svg_id(""), DEFAULT_SVG_ID);
    }
}
