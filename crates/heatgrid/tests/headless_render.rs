#![cfg(feature = "render")]

use heatgrid::render::{HeadlessError, HeadlessRenderer, HoverTarget, SvgRenderOptions};
use heatgrid::{HeatmapConfig, MonthIndex, StaticSource};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture_source() -> StaticSource {
    let path = workspace_root()
        .join("fixtures")
        .join("temperature")
        .join("global-temperature-sample.json");
    let text = std::fs::read_to_string(&path).expect("fixture");
    StaticSource::new(path.display().to_string(), text)
}

#[test]
fn async_and_sync_renders_agree() {
    let source = fixture_source();
    let renderer = HeadlessRenderer::new();
    let sync = renderer.render_svg_sync(&source).expect("sync render");
    let asynchronous = futures::executor::block_on(renderer.render_svg(&source)).expect("async");
    assert_eq!(sync, asynchronous);
}

#[test]
fn custom_svg_id_scopes_stylesheet_and_script() {
    let renderer = HeadlessRenderer::new().with_svg_id("temps 2024");
    let svg = renderer.render_svg_sync(&fixture_source()).expect("render");
    let doc = roxmltree::Document::parse(&svg).expect("well-formed svg");
    assert_eq!(doc.root_element().attribute("id"), Some("temps-2024"));
    assert!(svg.contains("#temps-2024 .cell:hover"));
    assert!(svg.contains(r#"getElementById("temps-2024")"#));
}

#[test]
fn html_page_uses_configured_title() {
    let config = HeatmapConfig {
        title: Some("Monthly Global Land-Surface Temperature".to_string()),
        ..Default::default()
    };
    let renderer = HeadlessRenderer::new().with_config(config);
    let page = renderer.render_html_sync(&fixture_source()).expect("html");
    assert!(page.contains("<title>Monthly Global Land-Surface Temperature</title>"));
    assert!(page.contains(r#"<text id="description""#));
    assert!(page.contains("1753 - 1781: base temperature 8.66\u{2103}"));
}

#[test]
fn malformed_document_surfaces_load_error() {
    let source = StaticSource::new("inline", r#"{"baseTemperature": 8.66}"#);
    let err = HeadlessRenderer::new().render_svg_sync(&source).unwrap_err();
    assert!(matches!(err, HeadlessError::Load(heatgrid::Error::Json(_))));
}

#[test]
fn invalid_config_is_rejected_before_drawing() {
    let config = HeatmapConfig {
        palette: Vec::new(),
        ..Default::default()
    };
    let err = HeadlessRenderer::new()
        .with_config(config)
        .layout_sync(&fixture_source())
        .unwrap_err();
    assert!(matches!(err, HeadlessError::Render(_)));
    assert!(err.to_string().contains("palette"), "{err}");
}

#[test]
fn hover_snapshot_without_script() {
    let svg = HeadlessRenderer::new()
        .render_svg_sync_with(
            &fixture_source(),
            &SvgRenderOptions {
                hover: Some(HoverTarget {
                    year: 1780,
                    month: MonthIndex::from_zero_based(6).unwrap(),
                }),
                ..SvgRenderOptions::static_output()
            },
        )
        .expect("render");
    assert!(!svg.contains("<script"));
    assert!(svg.contains("Month: July"));
}

#[cfg(feature = "raster")]
#[test]
fn png_render_has_canvas_size() {
    use heatgrid::render::raster::RasterOptions;

    let bytes = HeadlessRenderer::new()
        .render_png_sync(&fixture_source(), &RasterOptions::default())
        .expect("png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    // IHDR width/height, big-endian.
    assert_eq!(&bytes[16..20], &1000u32.to_be_bytes());
    assert_eq!(&bytes[20..24], &500u32.to_be_bytes());
}
