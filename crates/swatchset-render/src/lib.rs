//! Swatchset Render Library
//!
//! Lays out palette segments as equal bands and rasterizes them to PNG.
//! Drawing goes through the [`Surface`] trait; [`RasterSurface`] is the
//! CPU implementation used for exports.

mod export;
mod font;
mod layout;
mod raster;
mod renderer;

pub use export::{ExportArtifact, Exporter, draw_bands, export_file_name};
pub use font::{FaceChoice, FontData, SYSTEM_FONT_CANDIDATES};
pub use layout::{
    CODE_FONT_SIZE, ExportOptions, Orientation, TEXT_LINE_OFFSET, TITLE_FONT_SIZE, TextPlacement,
    band_rects, pixel_span,
};
pub use raster::{RasterSurface, encode_png};
pub use renderer::{RenderResult, RendererError, Surface, TextStyle, rgb_to_color};
