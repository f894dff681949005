// Inline stylesheet and hover behavior embedded in the interactive SVG.

use heatgrid_core::Offset;

pub(super) const TOOLTIP_FONT_SIZE: f64 = 12.0;
pub(super) const TOOLTIP_PADDING: f64 = 6.0;

pub(super) fn heatmap_css(svg_id: &str) -> String {
    format!(
        "#{id} .cell:hover{{stroke:#000;stroke-width:1px;}}\
#{id} #tooltip rect{{fill:rgba(0,0,0,0.8);}}\
#{id} #tooltip text{{fill:#fff;font-size:{fs}px;font-family:sans-serif;}}\
#{id} #title{{font-size:20px;font-family:sans-serif;}}\
#{id} #description{{font-size:14px;font-family:sans-serif;}}",
        id = svg_id,
        fs = TOOLTIP_FONT_SIZE,
    )
}

const HOVER_SCRIPT: &str = r##"(function () {
  var NS = "http://www.w3.org/2000/svg";
  var svg = document.getElementById("__SVG_ID__");
  if (!svg) { return; }
  var tip = svg.querySelector("#tooltip");
  var box = tip.querySelector("rect");
  var text = tip.querySelector("text");
  function local(evt) {
    var ctm = svg.getScreenCTM();
    if (!ctm) { return { x: evt.clientX, y: evt.clientY }; }
    var pt = svg.createSVGPoint();
    pt.x = evt.clientX;
    pt.y = evt.clientY;
    return pt.matrixTransform(ctm.inverse());
  }
  function show(evt) {
    var cell = evt.target;
    while (text.firstChild) { text.removeChild(text.firstChild); }
    cell.getAttribute("data-tooltip").split("__BREAK__").forEach(function (line) {
      var span = document.createElementNS(NS, "tspan");
      span.setAttribute("x", "__PAD__");
      span.setAttribute("dy", "1.2em");
      span.textContent = line;
      text.appendChild(span);
    });
    var bb = text.getBBox();
    box.setAttribute("width", bb.width + 2 * __PAD__);
    box.setAttribute("height", bb.height + 2 * __PAD__);
    var p = local(evt);
    tip.setAttribute("transform", "translate(" + (p.x + __OFFSET_X__) + "," + (p.y + __OFFSET_Y__) + ")");
    tip.setAttribute("data-year", cell.getAttribute("data-year"));
    tip.setAttribute("visibility", "visible");
  }
  function hide() {
    tip.setAttribute("visibility", "hidden");
  }
  Array.prototype.forEach.call(svg.querySelectorAll(".cell"), function (cell) {
    cell.addEventListener("mouseover", show);
    cell.addEventListener("mouseout", hide);
  });
})();"##;

pub(super) fn hover_script(svg_id: &str, offset: Offset) -> String {
    HOVER_SCRIPT
        .replace("__SVG_ID__", svg_id)
        .replace("__BREAK__", crate::tooltip::LINE_BREAK)
        .replace("__PAD__", &super::util::fmt(TOOLTIP_PADDING))
        .replace("__OFFSET_X__", &super::util::fmt(offset.x))
        .replace("__OFFSET_Y__", &super::util::fmt(offset.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_carries_configured_offsets() {
        let js = hover_script("heatmap", Offset { x: 5.0, y: -28.0 });
        assert!(js.contains(r#"getElementById("heatmap")"#));
        assert!(js.contains("(p.x + 5)"));
        assert!(js.contains("(p.y + -28)"));
        assert!(js.contains(r#"split("<br>")"#));
        assert!(!js.contains("__"));
        assert!(!js.contains("]]>"));
    }
}
