//! Export options and band geometry.

use crate::renderer::{RenderResult, RendererError};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Font size of the segment title, in pixels.
pub const TITLE_FONT_SIZE: f32 = 16.0;
/// Font size of the color code, in pixels.
pub const CODE_FONT_SIZE: f32 = 12.0;
/// Vertical distance of each text line from the band center.
pub const TEXT_LINE_OFFSET: f64 = 10.0;

/// Direction in which bands are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Bands are columns, left to right.
    #[default]
    Horizontal,
    /// Bands are rows, top to bottom.
    Vertical,
}

impl Orientation {
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Per-export configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub orientation: Orientation,
    /// Draw title and color code in each band.
    pub show_titles: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            orientation: Orientation::Horizontal,
            show_titles: true,
        }
    }
}

impl ExportOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_titles(mut self, show_titles: bool) -> Self {
        self.show_titles = show_titles;
        self
    }

    /// Both dimensions must be non-zero.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RendererError::InvalidOptions(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Split the canvas into `count` equal bands along the export orientation.
///
/// Boundaries are real-valued; band `i` ends exactly where band `i + 1`
/// starts, and the last band ends exactly at the canvas edge.
pub fn band_rects(count: usize, options: &ExportOptions) -> Vec<Rect> {
    let width = f64::from(options.width);
    let height = f64::from(options.height);
    let n = count as f64;
    let edge = |total: f64, k: usize| total * k as f64 / n;

    (0..count)
        .map(|i| match options.orientation {
            Orientation::Horizontal => Rect::new(edge(width, i), 0.0, edge(width, i + 1), height),
            Orientation::Vertical => Rect::new(0.0, edge(height, i), width, edge(height, i + 1)),
        })
        .collect()
}

/// Anchor points of the two text lines drawn inside a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    /// Center of the title line.
    pub title: Point,
    /// Center of the color-code line.
    pub code: Point,
}

impl TextPlacement {
    /// Title above the band center, color code below.
    pub fn for_band(band: Rect) -> Self {
        let center = band.center();
        Self {
            title: Point::new(center.x, center.y - TEXT_LINE_OFFSET),
            code: Point::new(center.x, center.y + TEXT_LINE_OFFSET),
        }
    }
}

/// Convert a real-valued span to whole pixels `[start, end)`, clamped to `limit`.
///
/// Adjacent spans that share a boundary value never overlap or leave a gap.
pub fn pixel_span(start: f64, end: f64, limit: u32) -> (u32, u32) {
    let clamp = |v: f64| v.round().clamp(0.0, f64::from(limit)) as u32;
    (clamp(start), clamp(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_bands() {
        let options = ExportOptions::new(300, 100);
        let bands = band_rects(2, &options);
        assert_eq!(bands, vec![Rect::new(0.0, 0.0, 150.0, 100.0), Rect::new(150.0, 0.0, 300.0, 100.0)]);
    }

    #[test]
    fn test_vertical_bands() {
        let options = ExportOptions::new(200, 90).with_orientation(Orientation::Vertical);
        let bands = band_rects(3, &options);
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[1], Rect::new(0.0, 30.0, 200.0, 60.0));
    }

    #[test]
    fn test_fractional_bands_tile_the_canvas() {
        let options = ExportOptions::new(100, 10);
        let bands = band_rects(7, &options);
        assert_eq!(bands[0].x0, 0.0);
        assert_eq!(bands[6].x1, 100.0);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].x1, pair[1].x0);
        }

        // Whole-pixel spans cover every column exactly once
        let mut covered = 0;
        let mut last_end = 0;
        for band in &bands {
            let (start, end) = pixel_span(band.x0, band.x1, options.width);
            assert_eq!(start, last_end);
            covered += end - start;
            last_end = end;
        }
        assert_eq!(covered, 100);
    }

    #[test]
    fn test_more_bands_than_pixels() {
        let options = ExportOptions::new(3, 3);
        let bands = band_rects(5, &options);
        let total: u32 = bands
            .iter()
            .map(|b| {
                let (s, e) = pixel_span(b.x0, b.x1, 3);
                e - s
            })
            .sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_text_placement() {
        let placement = TextPlacement::for_band(Rect::new(0.0, 0.0, 150.0, 100.0));
        assert_eq!(placement.title, Point::new(75.0, 40.0));
        assert_eq!(placement.code, Point::new(75.0, 60.0));
    }

    #[test]
    fn test_validate() {
        assert!(ExportOptions::new(1, 1).validate().is_ok());
        assert!(matches!(
            ExportOptions::new(0, 10).validate(),
            Err(RendererError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_options_json() {
        let json = serde_json::to_value(ExportOptions::default()).unwrap();
        assert_eq!(json["orientation"], "horizontal");
        assert_eq!(json["showTitles"], true);
    }
}
