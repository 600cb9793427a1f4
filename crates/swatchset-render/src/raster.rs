//! CPU raster surface backed by an RGBA image buffer.

use crate::font::FontData;
use crate::layout::pixel_span;
use crate::renderer::{RenderResult, RendererError, Surface, TextStyle};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as PixelRect;
use kurbo::{Point, Rect};
use peniko::Color;
use swash::scale::{Render, ScaleContext, Source};
use swash::shape::ShapeContext;
use swash::zeno::{Format, Vector};

const BOLD_WEIGHT: f32 = 700.0;
const REGULAR_WEIGHT: f32 = 400.0;
/// Outline growth per pixel of font size when a bold face has to be synthesized.
const EMBOLDEN_PER_PX: f32 = 0.05;

/// A shaped glyph, positioned relative to the start of the line.
struct PlacedGlyph {
    id: swash::GlyphId,
    x: f32,
    offset: Vector,
}

/// Raster surface that starts out opaque white.
pub struct RasterSurface<'a> {
    image: RgbaImage,
    font: Option<&'a FontData>,
    scale_context: ScaleContext,
    shape_context: ShapeContext,
}

impl<'a> RasterSurface<'a> {
    /// Create a white surface. Text drawing requires `font`.
    pub fn new(width: u32, height: u32, font: Option<&'a FontData>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            font,
            scale_context: ScaleContext::new(),
            shape_context: ShapeContext::new(),
        }
    }

    /// RGBA value at a pixel, if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Surface for RasterSurface<'_> {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (width, height) = self.image.dimensions();
        let (x0, x1) = pixel_span(rect.x0, rect.x1, width);
        let (y0, y1) = pixel_span(rect.y0, rect.y1, height);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let rgba = color.to_rgba8();
        draw_filled_rect_mut(
            &mut self.image,
            PixelRect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0),
            Rgba([rgba.r, rgba.g, rgba.b, rgba.a]),
        );
    }

    fn draw_centered_text(
        &mut self,
        text: &str,
        center: Point,
        style: TextStyle,
        color: Color,
    ) -> RenderResult<()> {
        let face = self.font.ok_or(RendererError::FontUnavailable)?.face(style.bold);
        let font = face.font;
        let weight = if style.bold { BOLD_WEIGHT } else { REGULAR_WEIGHT };
        let weight_axis = [("wght", weight)];
        let variations: &[(&str, f32)] = if face.variable_weight { &weight_axis } else { &[] };
        let embolden = if face.synthesize_bold { style.size * EMBOLDEN_PER_PX } else { 0.0 };

        // Shape once, keeping pen positions so the line can be centered
        let mut glyphs = Vec::new();
        let mut pen_x = 0.0f32;
        let mut shaper = self
            .shape_context
            .builder(font)
            .size(style.size)
            .variations(variations)
            .build();
        shaper.add_str(text);
        shaper.shape_with(|cluster| {
            for glyph in cluster.glyphs {
                glyphs.push(PlacedGlyph {
                    id: glyph.id,
                    x: pen_x,
                    offset: Vector::new(glyph.x, glyph.y),
                });
                pen_x += glyph.advance;
            }
        });

        let metrics = font.metrics(&[]).scale(style.size);
        let origin_x = center.x as f32 - pen_x / 2.0;
        let baseline = center.y as f32 + (metrics.ascent - metrics.descent) / 2.0;

        let rgba = color.to_rgba8();
        let paint = [rgba.r, rgba.g, rgba.b];
        let mut scaler = self
            .scale_context
            .builder(font)
            .size(style.size)
            .variations(variations)
            .build();

        for glyph in &glyphs {
            let Some(rendered) = Render::new(&[Source::Outline])
                .format(Format::Alpha)
                .offset(glyph.offset)
                .embolden(embolden)
                .render(&mut scaler, glyph.id)
            else {
                continue;
            };

            let placement = rendered.placement;
            let left = (origin_x + glyph.x) as i32 + placement.left;
            let top = baseline as i32 - placement.top;
            for py in 0..placement.height {
                for px in 0..placement.width {
                    let coverage = rendered.data[(py * placement.width + px) as usize];
                    if coverage > 0 {
                        blend(&mut self.image, left + px as i32, top + py as i32, paint, coverage);
                    }
                }
            }
        }
        Ok(())
    }

    fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let (width, height) = self.image.dimensions();
        encode_png(self.image.as_raw(), width, height)
    }
}

/// Alpha-blend `paint` over the pixel at (`x`, `y`), ignoring out-of-bounds positions.
fn blend(image: &mut RgbaImage, x: i32, y: i32, paint: [u8; 3], coverage: u8) {
    if x < 0 || y < 0 {
        return;
    }
    let Some(pixel) = image.get_pixel_mut_checked(x as u32, y as u32) else {
        return;
    };
    let alpha = f32::from(coverage) / 255.0;
    for (dst, src) in pixel.0.iter_mut().zip(paint) {
        *dst = (f32::from(src) * alpha + f32::from(*dst) * (1.0 - alpha)).round() as u8;
    }
    pixel.0[3] = 255;
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    let mut encoder = png::Encoder::new(&mut png_data, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| RendererError::Encode(format!("Failed to write PNG header: {}", e)))?;
    writer
        .write_image_data(rgba_data)
        .map_err(|e| RendererError::Encode(format!("Failed to write PNG data: {}", e)))?;
    writer
        .finish()
        .map_err(|e| RendererError::Encode(format!("Failed to finish PNG: {}", e)))?;

    Ok(png_data)
}
