// Number and text formatting shared by the SVG emitters.

pub(crate) fn fmt(v: f64) -> String {
    // Round-trippable decimal form (like JS `Number#toString()`), without `-0` or tiny float
    // noise from layout arithmetic.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

/// Exact JS `Number#toString()` output, for data attributes.
pub(crate) fn js_number(v: f64) -> String {
    ryu_js::Buffer::new().format(v).to_string()
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", fmt(x), fmt(y))
}
