#![forbid(unsafe_code)]

//! `heatgrid` renders the global monthly temperature-variance heat map headlessly.
//!
//! # Features
//!
//! - `http` (default): fetch the source document over HTTP (`HttpSource`)
//! - `render`: enable layout + SVG/HTML rendering (`heatgrid::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use heatgrid_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use heatgrid_render::html::render_html_page;
    pub use heatgrid_render::Error as RenderError;
    pub use heatgrid_render::layout_heatmap;
    pub use heatgrid_render::model::HeatmapLayout;
    pub use heatgrid_render::svg::{HoverTarget, SvgRenderOptions, sanitize_svg_id};
    pub use heatgrid_render::tooltip::{TooltipContent, TooltipState};

    use heatgrid_core::{DataSource, Dataset, HeatmapConfig};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Load(#[from] heatgrid_core::Error),
        #[error(transparent)]
        Render(#[from] RenderError),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    pub fn render_dataset_svg(
        dataset: &Dataset,
        config: &HeatmapConfig,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_heatmap(dataset, config)?;
        Ok(heatgrid_render::svg::render_heatmap_svg(
            &layout,
            svg_options,
        )?)
    }

    /// Synchronous layout helper (executor-free).
    pub fn layout_sync(source: &dyn DataSource, config: &HeatmapConfig) -> Result<HeatmapLayout> {
        let dataset = heatgrid_core::load_dataset_sync(source)?;
        Ok(layout_heatmap(&dataset, config)?)
    }

    pub async fn layout(source: &dyn DataSource, config: &HeatmapConfig) -> Result<HeatmapLayout> {
        let dataset = heatgrid_core::load_dataset(source).await?;
        Ok(layout_heatmap(&dataset, config)?)
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(
        source: &dyn DataSource,
        config: &HeatmapConfig,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let dataset = heatgrid_core::load_dataset_sync(source)?;
        render_dataset_svg(&dataset, config, svg_options)
    }

    /// Loads the document once, then renders in the same continuation.
    pub async fn render_svg(
        source: &dyn DataSource,
        config: &HeatmapConfig,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let dataset = heatgrid_core::load_dataset(source).await?;
        render_dataset_svg(&dataset, config, svg_options)
    }

    /// Bundles a config and SVG options so UI integrations pass one value per call.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub config: HeatmapConfig,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: HeatmapConfig) -> Self {
            self.config = config;
            self
        }

        pub fn with_svg_id(mut self, svg_id: &str) -> Self {
            self.svg.svg_id = Some(sanitize_svg_id(svg_id));
            self
        }

        pub fn layout_sync(&self, source: &dyn DataSource) -> Result<HeatmapLayout> {
            layout_sync(source, &self.config)
        }

        pub fn render_svg_sync(&self, source: &dyn DataSource) -> Result<String> {
            render_svg_sync(source, &self.config, &self.svg)
        }

        pub fn render_svg_sync_with(
            &self,
            source: &dyn DataSource,
            svg: &SvgRenderOptions,
        ) -> Result<String> {
            render_svg_sync(source, &self.config, svg)
        }

        pub async fn render_svg(&self, source: &dyn DataSource) -> Result<String> {
            render_svg(source, &self.config, &self.svg).await
        }

        /// Renders the interactive SVG wrapped in a standalone HTML page.
        pub fn render_html_sync(&self, source: &dyn DataSource) -> Result<String> {
            let svg = self.render_svg_sync(source)?;
            Ok(render_html_page(&svg, self.config.title.as_deref()))
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            source: &dyn DataSource,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_png_sync(source, &self.config, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            source: &dyn DataSource,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_jpeg_sync(source, &self.config, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, source: &dyn DataSource) -> raster::Result<Vec<u8>> {
            raster::render_pdf_sync(source, &self.config, &self.svg)
        }
    }
}
