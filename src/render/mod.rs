//! Slide rasterization and export pipeline.
//!
//! Turns render-stage slides into fixed 1920x1080 PNG rasters and packages
//! them into a downloadable archive. The preview-only token colorizer also
//! lives here, since its eligibility rule is part of render semantics.

pub mod colorize;
pub mod export;
pub mod fonts;
pub mod raster;

pub use colorize::{colorize, ColorSource, RandomColorSource, TextFragment};
pub use export::{export_archive, ExportProgress};
pub use fonts::FontStore;
pub use raster::SlideRenderer;
