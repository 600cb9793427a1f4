//! Export pipeline: segments + options → PNG artifact.

use crate::font::FontData;
use crate::layout::{CODE_FONT_SIZE, ExportOptions, TITLE_FONT_SIZE, TextPlacement, band_rects};
use crate::raster::RasterSurface;
use crate::renderer::{RenderResult, RendererError, Surface, TextStyle, rgb_to_color};
use swatchset_core::storage::Storage;
use swatchset_core::{ColorSegment, Notice, PaletteStore, contrast_text_color, parse_hex_rgb};

/// File name used when a set name has no usable characters.
const FALLBACK_FILE_STEM: &str = "palette";

/// A rendered export, ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, `<slug>.png`.
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

/// Derive the artifact name from a set name: lower-cased, whitespace runs
/// collapsed to single hyphens, `.png` appended.
pub fn export_file_name(set_name: &str) -> String {
    let stem = set_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    if stem.is_empty() {
        format!("{}.png", FALLBACK_FILE_STEM)
    } else {
        format!("{}.png", stem)
    }
}

/// Draw `segments` as equal bands onto `surface`.
///
/// Band geometry comes from `options` (size and orientation), which should
/// match the surface size; `options` also decides whether titles are drawn.
pub fn draw_bands<S: Surface + ?Sized>(
    surface: &mut S,
    segments: &[&ColorSegment],
    options: &ExportOptions,
) -> RenderResult<()> {
    if segments.is_empty() {
        return Err(RendererError::NothingToExport);
    }

    for (segment, band) in segments.iter().zip(band_rects(segments.len(), options)) {
        surface.fill_rect(band, rgb_to_color(parse_hex_rgb(&segment.color)));

        if options.show_titles {
            let text_color = rgb_to_color(parse_hex_rgb(contrast_text_color(&segment.color)));
            let placement = TextPlacement::for_band(band);
            surface.draw_centered_text(
                &segment.title,
                placement.title,
                TextStyle::bold(TITLE_FONT_SIZE),
                text_color,
            )?;
            surface.draw_centered_text(
                &segment.color,
                placement.code,
                TextStyle::regular(CODE_FONT_SIZE),
                text_color,
            )?;
        }
    }
    Ok(())
}

/// Renders segment lists to PNG images.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    font: Option<FontData>,
}

impl Exporter {
    /// Create an exporter. Without a font, only title-less exports succeed.
    pub fn new(font: Option<FontData>) -> Self {
        Self { font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render `segments` into a PNG of exactly `options.width × options.height`.
    pub fn render_png(&self, segments: &[&ColorSegment], options: &ExportOptions) -> RenderResult<Vec<u8>> {
        if segments.is_empty() {
            return Err(RendererError::NothingToExport);
        }
        options.validate()?;
        if options.show_titles && self.font.is_none() {
            return Err(RendererError::FontUnavailable);
        }

        let mut surface = RasterSurface::new(options.width, options.height, self.font.as_ref());
        draw_bands(&mut surface, segments, options)?;
        surface.encode_png()
    }

    /// Render `segments` and name the artifact after `set_name`.
    pub fn export(
        &self,
        set_name: &str,
        segments: &[&ColorSegment],
        options: &ExportOptions,
    ) -> RenderResult<ExportArtifact> {
        let png = self.render_png(segments, options)?;
        let artifact = ExportArtifact {
            file_name: export_file_name(set_name),
            width: options.width,
            height: options.height,
            png,
        };
        log::info!(
            "Rendered {} segment(s) to {} ({}x{}, {} bytes)",
            segments.len(),
            artifact.file_name,
            artifact.width,
            artifact.height,
            artifact.png.len()
        );
        Ok(artifact)
    }

    /// Export the store's active set, honoring its selection.
    ///
    /// An empty export is reported through the store's notifier. Success is
    /// not: the caller sends [`Notice::ExportSucceeded`] once the artifact
    /// has actually been delivered.
    pub fn export_active_set<S: Storage>(
        &self,
        store: &PaletteStore<S>,
        options: &ExportOptions,
    ) -> RenderResult<ExportArtifact> {
        let segments = store.export_segments();
        log::debug!("{}", store.export_summary());

        let result = self.export(&store.active_set().name, &segments, options);
        if matches!(result, Err(RendererError::NothingToExport)) {
            store.notify(Notice::NothingToExport);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Orientation;
    use kurbo::{Point, Rect};
    use peniko::Color;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use swatchset_core::{Notifier, SegmentDraft};
    use swatchset_core::storage::MemoryStorage;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill(Rect, [u8; 4]),
        Text(String, Point, TextStyle, [u8; 4]),
    }

    /// Surface that records draw calls instead of rasterizing.
    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (0, 0)
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(Op::Fill(rect, rgba(color)));
        }

        fn draw_centered_text(
            &mut self,
            text: &str,
            center: Point,
            style: TextStyle,
            color: Color,
        ) -> RenderResult<()> {
            self.ops.push(Op::Text(text.to_string(), center, style, rgba(color)));
            Ok(())
        }

        fn encode_png(&self) -> RenderResult<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn rgba(color: Color) -> [u8; 4] {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    fn segment(color: &str, title: &str) -> ColorSegment {
        ColorSegment::from_draft(SegmentDraft::new(color, title))
    }

    fn decode(png_bytes: &[u8]) -> (u32, u32, Vec<u8>) {
        let decoder = png::Decoder::new(png_bytes);
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info.width, info.height, buf)
    }

    fn pixel_at(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name("DEFAULT"), "default.png");
        assert_eq!(export_file_name("My  Warm\tTones"), "my-warm-tones.png");
        assert_eq!(export_file_name("   "), "palette.png");
    }

    #[test]
    fn test_draw_bands_records_fills_and_text() {
        let red = segment("#ff0000", "Red");
        let white = segment("#ffffff", "White");
        let options = ExportOptions::new(200, 100);
        let mut surface = RecordingSurface::default();

        draw_bands(&mut surface, &[&red, &white], &options).unwrap();

        let bold = TextStyle::bold(TITLE_FONT_SIZE);
        let regular = TextStyle::regular(CODE_FONT_SIZE);
        assert_eq!(
            surface.ops,
            vec![
                Op::Fill(Rect::new(0.0, 0.0, 100.0, 100.0), [255, 0, 0, 255]),
                Op::Text("Red".to_string(), Point::new(50.0, 40.0), bold, [255, 255, 255, 255]),
                Op::Text("#ff0000".to_string(), Point::new(50.0, 60.0), regular, [255, 255, 255, 255]),
                Op::Fill(Rect::new(100.0, 0.0, 200.0, 100.0), [255, 255, 255, 255]),
                Op::Text("White".to_string(), Point::new(150.0, 40.0), bold, [0, 0, 0, 255]),
                Op::Text("#ffffff".to_string(), Point::new(150.0, 60.0), regular, [0, 0, 0, 255]),
            ]
        );
    }

    #[test]
    fn test_draw_bands_without_titles() {
        let a = segment("#000000", "A");
        let options = ExportOptions::new(10, 10).with_titles(false);
        let mut surface = RecordingSurface::default();
        draw_bands(&mut surface, &[&a], &options).unwrap();
        assert_eq!(surface.ops.len(), 1);
    }

    #[test]
    fn test_empty_segments_fail() {
        let exporter = Exporter::new(None);
        let options = ExportOptions::new(10, 10).with_titles(false);
        assert!(matches!(
            exporter.render_png(&[], &options),
            Err(RendererError::NothingToExport)
        ));
    }

    #[test]
    fn test_titles_need_a_font() {
        let exporter = Exporter::new(None);
        let a = segment("#000000", "A");
        assert!(matches!(
            exporter.render_png(&[&a], &ExportOptions::new(10, 10)),
            Err(RendererError::FontUnavailable)
        ));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let exporter = Exporter::new(None);
        let a = segment("#000000", "A");
        let options = ExportOptions::new(0, 10).with_titles(false);
        assert!(matches!(
            exporter.render_png(&[&a], &options),
            Err(RendererError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_vertical_export_pixels() {
        let exporter = Exporter::new(None);
        let top = segment("#102030", "Top");
        let bottom = segment("#405060", "Bottom");
        let options = ExportOptions::new(4, 10)
            .with_orientation(Orientation::Vertical)
            .with_titles(false);

        let png_bytes = exporter.render_png(&[&top, &bottom], &options).unwrap();
        let (width, height, pixels) = decode(&png_bytes);
        assert_eq!((width, height), (4, 10));
        assert_eq!(pixel_at(&pixels, width, 0, 4), [0x10, 0x20, 0x30, 255]);
        assert_eq!(pixel_at(&pixels, width, 3, 5), [0x40, 0x50, 0x60, 255]);
    }

    #[test]
    fn test_export_selected_segments_from_store() {
        let mut store = PaletteStore::new(Arc::new(MemoryStorage::new()));
        let red = store.add_segment(SegmentDraft::new("#ff0000", "Red")).unwrap();
        store.add_segment(SegmentDraft::new("#00ff00", "Green")).unwrap();
        let blue = store.add_segment(SegmentDraft::new("#0000ff", "Blue")).unwrap();
        store.toggle_selection_mode();
        store.toggle_segment_selection(&blue);
        store.toggle_segment_selection(&red);

        let options = ExportOptions::new(300, 100).with_titles(false);
        let artifact = Exporter::new(None).export_active_set(&store, &options).unwrap();
        assert_eq!(artifact.file_name, "default.png");

        let (width, height, pixels) = decode(&artifact.png);
        assert_eq!((width, height), (300, 100));
        // Two 150px bands: red then blue, green excluded
        for y in [0, 50, 99] {
            assert_eq!(pixel_at(&pixels, width, 0, y), [255, 0, 0, 255]);
            assert_eq!(pixel_at(&pixels, width, 149, y), [255, 0, 0, 255]);
            assert_eq!(pixel_at(&pixels, width, 150, y), [0, 0, 255, 255]);
            assert_eq!(pixel_at(&pixels, width, 299, y), [0, 0, 255, 255]);
        }
        assert!(pixels.chunks(4).all(|p| p != [0, 255, 0, 255]));
    }

    #[test]
    fn test_export_empty_active_set() {
        let store = PaletteStore::new(Arc::new(MemoryStorage::new()));
        let options = ExportOptions::new(10, 10).with_titles(false);
        assert!(matches!(
            Exporter::new(None).export_active_set(&store, &options),
            Err(RendererError::NothingToExport)
        ));
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier(Rc<RefCell<Vec<Notice>>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.0.borrow_mut().push(notice.clone());
        }
    }

    #[test]
    fn test_export_leaves_success_notice_to_caller() {
        let notices = RecordingNotifier::default();
        let mut store = PaletteStore::new(Arc::new(MemoryStorage::new())).with_notifier(notices.clone());
        let options = ExportOptions::new(10, 10).with_titles(false);

        assert!(Exporter::new(None).export_active_set(&store, &options).is_err());
        assert_eq!(*notices.0.borrow(), vec![Notice::NothingToExport]);

        store.add_segment(SegmentDraft::new("#ff0000", "Red")).unwrap();
        Exporter::new(None).export_active_set(&store, &options).unwrap();
        assert_eq!(notices.0.borrow().len(), 1);
    }

    #[test]
    fn test_titled_export_with_system_font() {
        let Some(font) = FontData::discover(None, None) else {
            eprintln!("no system font found, skipping");
            return;
        };
        let dark = segment("#000000", "Dark");
        let light = segment("#ffffff", "Pale");
        let options = ExportOptions::new(200, 100);

        let mut surface = RasterSurface::new(200, 100, Some(&font));
        draw_bands(&mut surface, &[&dark, &light], &options).unwrap();

        // Rows holding contrast-colored ink in each band
        let ink_rows = |x_range: std::ops::Range<u32>, is_ink: fn([u8; 4]) -> bool| -> Vec<u32> {
            (0..100)
                .filter(|&y| x_range.clone().any(|x| surface.pixel(x, y).is_some_and(is_ink)))
                .collect()
        };
        let dark_rows = ink_rows(0..100, |p| p[0] > 127);
        let light_rows = ink_rows(100..200, |p| p[0] < 128);

        for rows in [&dark_rows, &light_rows] {
            assert!(!rows.is_empty());
            // Title above the band center, color code below, nothing on the center line
            assert!(rows.iter().any(|&y| y < 50));
            assert!(rows.iter().any(|&y| y > 50));
            assert!(!rows.contains(&50));
            // Title ink is centered near y = 40, code ink near y = 60
            let title_max = rows.iter().copied().filter(|&y| y < 50).max().unwrap();
            let code_min = rows.iter().copied().filter(|&y| y > 50).min().unwrap();
            assert!(title_max > 30 && title_max < 50, "title ink ends at {}", title_max);
            assert!(code_min > 50 && code_min < 60, "code ink starts at {}", code_min);
        }

        // Band backgrounds stay intact away from the text
        assert_eq!(surface.pixel(2, 2), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(197, 97), Some([255, 255, 255, 255]));
    }
}
