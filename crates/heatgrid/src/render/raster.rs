#![forbid(unsafe_code)]

use crate::render::{HeadlessError, SvgRenderOptions};
use heatgrid_core::{DataSource, HeatmapConfig};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color: {0}")]
    Background(String),
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

// Rasterizers never run the hover script.
fn static_svg(
    source: &dyn DataSource,
    config: &HeatmapConfig,
    svg_options: &SvgRenderOptions,
) -> Result<String> {
    let svg_options = SvgRenderOptions {
        include_script: false,
        ..svg_options.clone()
    };
    Ok(super::render_svg_sync(source, config, &svg_options)?)
}

pub fn render_png_sync(
    source: &dyn DataSource,
    config: &HeatmapConfig,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    svg_to_png(&static_svg(source, config, svg_options)?, raster)
}

pub fn render_jpeg_sync(
    source: &dyn DataSource,
    config: &HeatmapConfig,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    svg_to_jpeg(&static_svg(source, config, svg_options)?, raster)
}

pub fn render_pdf_sync(
    source: &dyn DataSource,
    config: &HeatmapConfig,
    svg_options: &SvgRenderOptions,
) -> Result<Vec<u8>> {
    svg_to_pdf(&static_svg(source, config, svg_options)?)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let background = options
        .background
        .as_deref()
        .map(parse_background)
        .transpose()?;
    let pixmap = svg_to_pixmap(svg, options.scale, background)?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

/// JPEG has no alpha channel, so the background defaults to white and must be opaque.
pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let background = parse_background(options.background.as_deref().unwrap_or("white"))?;
    if !background.is_opaque() {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(background))?;
    let rgb = pixmap
        .pixels()
        .iter()
        .flat_map(|px| [px.red(), px.green(), px.blue()])
        .collect::<Vec<u8>>();

    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality)
        .encode(
            &rgb,
            pixmap.width(),
            pixmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

/// Vector output; the PDF page is the SVG canvas.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = FALLBACK_FONT.to_string();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

// Axis labels ask for `sans-serif`.
const FALLBACK_FONT: &str = "Arial";

fn svg_to_pixmap(
    svg: &str,
    scale: f32,
    background: Option<tiny_skia::Color>,
) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = FALLBACK_FONT.to_string();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // The heat map root always sets width/height, so the tree size is the canvas.
    let size = tree.size();
    let (width_px, height_px) = (
        (size.width() * scale).ceil().max(1.0) as u32,
        (size.height() * scale).ceil().max(1.0) as u32,
    );
    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// `transparent`, `white`, `black`, `#rgb`, `#rrggbb` or `#rrggbbaa`.
fn parse_background(text: &str) -> Result<tiny_skia::Color> {
    let invalid = || RasterError::Background(text.to_string());
    let s = text.trim().to_ascii_lowercase();
    let rgba: u32 = match s.as_str() {
        "transparent" => 0x0000_0000,
        "white" => 0xffff_ffff,
        "black" => 0x0000_00ff,
        _ => {
            let hex = s.strip_prefix('#').ok_or_else(invalid)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let v = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
            match hex.len() {
                3 => {
                    let [_, _, hi, lo] = v.to_be_bytes();
                    let (r, g, b) = (u32::from(hi & 0xf), u32::from(lo >> 4), u32::from(lo & 0xf));
                    (r * 0x11) << 24 | (g * 0x11) << 16 | (b * 0x11) << 8 | 0xff
                }
                6 => v << 8 | 0xff,
                8 => v,
                _ => return Err(invalid()),
            }
        }
    };
    let [r, g, b, a] = rgba.to_be_bytes();
    Ok(tiny_skia::Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" style="fill: #4575b4;"/></svg>"##;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let bytes = svg_to_png(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn svg_to_jpeg_rejects_translucent_background() {
        let opts = RasterOptions {
            background: Some("transparent".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            svg_to_jpeg(SQUARE, &opts),
            Err(RasterError::JpegOpaqueBackgroundRequired)
        ));
    }

    #[test]
    fn svg_to_jpeg_produces_jpeg_signature() {
        let bytes = svg_to_jpeg(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(&[0xff, 0xd8]));
    }

    #[test]
    fn svg_to_pdf_produces_pdf_signature() {
        let bytes = svg_to_pdf(SQUARE).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn png_at_scale_two_doubles_the_canvas() {
        let opts = RasterOptions {
            scale: 2.0,
            ..Default::default()
        };
        let bytes = svg_to_png(SQUARE, &opts).unwrap();
        // IHDR width/height, big-endian.
        assert_eq!(&bytes[16..20], &20u32.to_be_bytes());
        assert_eq!(&bytes[20..24], &20u32.to_be_bytes());
    }

    #[test]
    fn background_accepts_names_and_hex_forms() {
        let rgba = |s: &str| {
            let c = parse_background(s).unwrap().to_color_u8();
            [c.red(), c.green(), c.blue(), c.alpha()]
        };
        assert_eq!(rgba("#d73027"), [0xd7, 0x30, 0x27, 0xff]);
        assert_eq!(rgba("#FFF"), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(rgba("#4575b480"), [0x45, 0x75, 0xb4, 0x80]);
        assert_eq!(rgba(" white "), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(rgba("transparent")[3], 0);
    }

    #[test]
    fn background_rejects_unknown_colors() {
        for bad in ["red", "#zzz", "#12345", "4575b4", "#+12"] {
            assert!(
                matches!(parse_background(bad), Err(RasterError::Background(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn png_rejects_invalid_background() {
        let opts = RasterOptions {
            background: Some("not-a-color".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            svg_to_png(SQUARE, &opts),
            Err(RasterError::Background(_))
        ));
    }
}
