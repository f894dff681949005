use crate::svg::escape_xml;

/// Wraps a rendered SVG in a minimal standalone page.
pub fn render_html_page(svg: &str, title: Option<&str>) -> String {
    let title = escape_xml(title.unwrap_or("Global Temperature Heat Map"));
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
<style>body{{margin:0;padding:16px;font-family:sans-serif;}}</style>\n</head>\n\
<body>\n<main>\n{svg}\n</main>\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_embeds_svg_and_escapes_title() {
        let page = render_html_page("<svg id=\"heatmap\"/>", Some("Temps <1900>"));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Temps &lt;1900&gt;</title>"));
        assert!(page.contains("<main>\n<svg id=\"heatmap\"/>\n</main>"));
    }
}
