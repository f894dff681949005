// d3-axis compatible markup for bottom and left axes.

use super::node::{Tree, node};
use super::util::{fmt, translate};
use crate::layout::CRISP_OFFSET;
use crate::model::{AxisLayout, AxisOrient};

const TICK_SIZE_INNER: f64 = 6.0;
const TICK_SIZE_OUTER: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

pub(super) fn push_axis(tree: &mut Tree, parent: usize, axis: &AxisLayout) -> usize {
    let k = match axis.orient {
        AxisOrient::Bottom => 1.0,
        AxisOrient::Left => -1.0,
    };
    let spacing = TICK_SIZE_INNER.max(0.0) + TICK_PADDING;
    let range0 = axis.range.0 + CRISP_OFFSET;
    let range1 = axis.range.1 + CRISP_OFFSET;
    let outer = fmt(k * TICK_SIZE_OUTER);

    let mut g = node("g");
    if let Some(id) = axis.id.as_deref() {
        g = g.attr("id", id);
    }
    let anchor = match axis.orient {
        AxisOrient::Bottom => "middle",
        AxisOrient::Left => "end",
    };
    g = g
        .attr("transform", translate(axis.translate.0, axis.translate.1))
        .attr("fill", "none")
        .attr("font-size", "10")
        .attr("font-family", "sans-serif")
        .attr("text-anchor", anchor);
    let gid = tree.push_child(parent, g);

    let d = match axis.orient {
        AxisOrient::Bottom => format!(
            "M{},{outer}V{}H{}V{outer}",
            fmt(range0),
            fmt(CRISP_OFFSET),
            fmt(range1)
        ),
        AxisOrient::Left => format!(
            "M{outer},{}H{}V{}H{outer}",
            fmt(range0),
            fmt(CRISP_OFFSET),
            fmt(range1)
        ),
    };
    tree.push_child(
        gid,
        node("path")
            .attr("class", "domain")
            .attr("stroke", "currentColor")
            .attr("d", d),
    );

    for tick in &axis.ticks {
        let at = tick.position + CRISP_OFFSET;
        let (transform, line, text) = match axis.orient {
            AxisOrient::Bottom => (
                translate(at, 0.0),
                node("line")
                    .attr("stroke", "currentColor")
                    .attr("y2", fmt(k * TICK_SIZE_INNER)),
                node("text")
                    .attr("fill", "currentColor")
                    .attr("y", fmt(k * spacing))
                    .attr("dy", "0.71em"),
            ),
            AxisOrient::Left => (
                translate(0.0, at),
                node("line")
                    .attr("stroke", "currentColor")
                    .attr("x2", fmt(k * TICK_SIZE_INNER)),
                node("text")
                    .attr("fill", "currentColor")
                    .attr("x", fmt(k * spacing))
                    .attr("dy", "0.32em"),
            ),
        };
        let tid = tree.push_child(
            gid,
            node("g")
                .attr("class", "tick")
                .attr("opacity", "1")
                .attr("transform", transform),
        );
        tree.push_child(tid, line);
        tree.push_child(tid, text.text(&tick.label));
    }

    gid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AxisTick;

    #[test]
    fn left_axis_matches_d3_markup() {
        let axis = AxisLayout {
            id: Some("y-axis".to_string()),
            orient: AxisOrient::Left,
            translate: (0.0, 0.0),
            range: (0.0, 360.0),
            ticks: vec![AxisTick {
                position: 10.0,
                label: "January".to_string(),
            }],
        };
        let mut tree = Tree::new(node("g"));
        push_axis(&mut tree, Tree::ROOT, &axis);
        assert_eq!(
            tree.render(),
            concat!(
                r#"<g><g id="y-axis" transform="translate(0,0)" fill="none" font-size="10" font-family="sans-serif" text-anchor="end">"#,
                r#"<path class="domain" stroke="currentColor" d="M-6,0.5H0.5V360.5H-6"/>"#,
                r#"<g class="tick" opacity="1" transform="translate(0,10.5)"><line stroke="currentColor" x2="-6"/><text fill="currentColor" x="-9" dy="0.32em">January</text></g>"#,
                r#"</g></g>"#
            )
        );
    }
}
