//! Drawing surface abstraction.

use kurbo::{Point, Rect};
use peniko::Color;
use swatchset_core::Rgb;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Nothing to export")]
    NothingToExport,
    #[error("Invalid export options: {0}")]
    InvalidOptions(String),
    #[error("No font available for drawing titles")]
    FontUnavailable,
    #[error("Font error: {0}")]
    Font(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// How a line of text should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

/// Trait for 2D drawing targets.
///
/// The export pipeline only needs rectangle fills, centered text and PNG
/// output; implementations decide how to rasterize them.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill `rect` with an opaque color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw one line of text centered horizontally and vertically on `center`.
    fn draw_centered_text(
        &mut self,
        text: &str,
        center: Point,
        style: TextStyle,
        color: Color,
    ) -> RenderResult<()>;

    /// Encode the surface contents as PNG.
    fn encode_png(&self) -> RenderResult<Vec<u8>>;
}

/// Convert a parsed hex color to a paint color.
pub fn rgb_to_color(rgb: Rgb) -> Color {
    Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)
}
