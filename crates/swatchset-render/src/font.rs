//! Font loading for title rendering.

use crate::renderer::{RenderResult, RendererError};
use std::fs;
use std::path::Path;
use swash::{CacheKey, FontRef};

/// Regular/bold face pairs tried, in order, when no font path is configured.
pub const SYSTEM_FONT_CANDIDATES: &[(&str, &str)] = &[
    // Linux
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    ("/usr/share/fonts/TTF/DejaVuSans.ttf", "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf"),
    ("/usr/share/fonts/dejavu/DejaVuSans.ttf", "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf"),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    ),
    // macOS
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
    ("/Library/Fonts/Arial.ttf", "/Library/Fonts/Arial Bold.ttf"),
    // Windows
    ("C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\arialbd.ttf"),
];

/// One parsed font file.
#[derive(Clone)]
struct Face {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
}

impl Face {
    fn from_bytes(data: Vec<u8>) -> RenderResult<Self> {
        let font = FontRef::from_index(&data, 0)
            .ok_or_else(|| RendererError::Font("not a supported font file".to_string()))?;
        let (offset, key) = (font.offset, font.key);
        Ok(Self { data, offset, key })
    }

    fn from_path(path: &Path) -> RenderResult<Self> {
        let data = fs::read(path)
            .map_err(|e| RendererError::Font(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_bytes(data)
    }

    fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }
}

/// The face chosen for one text style.
#[derive(Clone, Copy)]
pub struct FaceChoice<'a> {
    pub font: FontRef<'a>,
    /// The face has a `wght` axis; weight is applied as a variation.
    pub variable_weight: bool,
    /// Bold was requested but no bold face exists; outlines must be emboldened.
    pub synthesize_bold: bool,
}

/// Regular face plus an optional bold face, validated at load time.
#[derive(Clone)]
pub struct FontData {
    regular: Face,
    bold: Option<Face>,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("regular_len", &self.regular.data.len())
            .field("has_bold", &self.bold.is_some())
            .finish()
    }
}

impl FontData {
    /// Parse the first face of a font file as the regular face.
    pub fn from_bytes(data: Vec<u8>) -> RenderResult<Self> {
        Ok(Self {
            regular: Face::from_bytes(data)?,
            bold: None,
        })
    }

    /// Read and parse a font file as the regular face.
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        Ok(Self {
            regular: Face::from_path(path)?,
            bold: None,
        })
    }

    /// Add a dedicated bold face.
    pub fn with_bold_bytes(mut self, data: Vec<u8>) -> RenderResult<Self> {
        self.bold = Some(Face::from_bytes(data)?);
        Ok(self)
    }

    /// Add a dedicated bold face read from `path`.
    pub fn with_bold_path(mut self, path: &Path) -> RenderResult<Self> {
        self.bold = Some(Face::from_path(path)?);
        Ok(self)
    }

    pub fn has_bold_face(&self) -> bool {
        self.bold.is_some()
    }

    /// Load the configured faces if given, otherwise the first usable system pair.
    ///
    /// A configured font that fails to load is logged and skipped. A missing
    /// or broken bold face leaves bold to be synthesized.
    pub fn discover(regular: Option<&Path>, bold: Option<&Path>) -> Option<Self> {
        if let Some(path) = regular {
            match Self::from_path(path) {
                Ok(font) => return Some(font.attach_bold(bold)),
                Err(e) => log::warn!("Configured font unusable: {}", e),
            }
        }
        SYSTEM_FONT_CANDIDATES.iter().find_map(|(regular, bold)| {
            let path = Path::new(regular);
            if !path.exists() {
                return None;
            }
            Self::from_path(path)
                .inspect(|_| log::debug!("Using font {}", path.display()))
                .ok()
                .map(|font| font.attach_bold(Some(Path::new(bold))))
        })
    }

    fn attach_bold(self, path: Option<&Path>) -> Self {
        let Some(path) = path.filter(|p| p.exists()) else {
            return self;
        };
        match Face::from_path(path) {
            Ok(face) => Self {
                bold: Some(face),
                ..self
            },
            Err(e) => {
                log::warn!("Bold font unusable, synthesizing bold: {}", e);
                self
            }
        }
    }

    /// Pick the face for a regular or bold line of text.
    pub fn face(&self, bold: bool) -> FaceChoice<'_> {
        let dedicated = if bold { self.bold.as_ref() } else { None };
        let font = dedicated.unwrap_or(&self.regular).font_ref();
        let variable_weight = has_weight_axis(font);
        FaceChoice {
            font,
            variable_weight,
            synthesize_bold: bold && dedicated.is_none() && !variable_weight,
        }
    }
}

fn has_weight_axis(font: FontRef<'_>) -> bool {
    let wght = swash::tag_from_bytes(b"wght");
    font.variations().any(|axis| axis.tag() == wght)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            FontData::from_bytes(b"definitely not a font".to_vec()),
            Err(RendererError::Font(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = FontData::from_path(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(result, Err(RendererError::Font(_))));
    }

    #[test]
    fn test_candidates_pair_regular_with_bold() {
        for (regular, bold) in SYSTEM_FONT_CANDIDATES {
            assert_ne!(regular, bold);
        }
    }

    #[test]
    fn test_discovered_faces() {
        let Some(font) = FontData::discover(None, None) else {
            eprintln!("no system font found, skipping");
            return;
        };

        let regular = font.face(false);
        assert!(!regular.synthesize_bold);

        let bold = font.face(true);
        if font.has_bold_face() {
            assert!(!std::ptr::eq(bold.font.data.as_ptr(), regular.font.data.as_ptr()));
            assert!(!bold.synthesize_bold);
        } else {
            assert!(bold.synthesize_bold || bold.variable_weight);
        }
    }

    #[test]
    fn test_regular_only_synthesizes_bold() {
        let Some(path) = SYSTEM_FONT_CANDIDATES
            .iter()
            .map(|(regular, _)| Path::new(*regular))
            .find(|path| path.exists())
        else {
            eprintln!("no system font found, skipping");
            return;
        };

        let font = FontData::from_path(path).unwrap();
        assert!(!font.has_bold_face());
        let bold = font.face(true);
        assert_eq!(bold.synthesize_bold, !bold.variable_weight);
    }
}
