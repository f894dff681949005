#![forbid(unsafe_code)]

pub mod html;
pub mod layout;
pub mod model;
pub mod scale;
pub mod svg;
pub mod text;
pub mod ticks;
pub mod tooltip;

pub use layout::layout_heatmap;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot lay out an empty dataset")]
    EmptyDataset,
    #[error("no cell for hover target {year}-{month}")]
    HoverTargetNotFound { year: i32, month: u8 },
    #[error(transparent)]
    Core(#[from] heatgrid_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
