//! Palette data model: segments and the sets that own them.

use crate::ids::generate_id;
use serde::{Deserialize, Serialize};

/// Identifier of the set created when nothing has been persisted yet.
pub const DEFAULT_SET_ID: &str = "default";

/// Display name of the default set.
pub const DEFAULT_SET_NAME: &str = "DEFAULT";

/// Color offered for new segments.
pub const DEFAULT_SEGMENT_COLOR: &str = "#6E56CF";

/// A single color + label entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSegment {
    /// Unique identifier, fixed at creation.
    pub id: String,
    /// Hex color, `#RRGGBB`.
    pub color: String,
    /// Human-readable label.
    pub title: String,
}

impl ColorSegment {
    /// Materialize a draft with a freshly generated id.
    pub fn from_draft(draft: SegmentDraft) -> Self {
        Self {
            id: generate_id(),
            color: draft.color,
            title: draft.title,
        }
    }

    /// Apply the fields present in `update`.
    pub fn apply(&mut self, update: SegmentUpdate) {
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
    }
}

/// A segment that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentDraft {
    pub color: String,
    pub title: String,
}

impl SegmentDraft {
    pub fn new(color: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            title: title.into(),
        }
    }

    /// Both color and title must be non-empty.
    pub fn is_complete(&self) -> bool {
        !self.color.is_empty() && !self.title.is_empty()
    }
}

/// Partial update for an existing segment. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SegmentUpdate {
    /// Update only the color.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            title: None,
        }
    }

    /// Update only the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            color: None,
            title: Some(title.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.title.is_none()
    }
}

/// A named, ordered collection of segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSet {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Segments in display and export order.
    pub segments: Vec<ColorSegment>,
}

impl SegmentSet {
    /// Create an empty set with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            segments: Vec::new(),
        }
    }

    /// The set used when no persisted state is available.
    pub fn default_set() -> Self {
        Self {
            id: DEFAULT_SET_ID.to_string(),
            name: DEFAULT_SET_NAME.to_string(),
            segments: Vec::new(),
        }
    }

    /// Get a segment by id.
    pub fn segment(&self, id: &str) -> Option<&ColorSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Position of a segment in the set.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// Remove a segment by id.
    pub fn remove_segment(&mut self, id: &str) -> Option<ColorSegment> {
        let index = self.position(id)?;
        Some(self.segments.remove(index))
    }

    /// Move the segment at `from` to `to`, shifting everything in between.
    /// Returns false if either index is out of range.
    pub fn move_segment(&mut self, from: usize, to: usize) -> bool {
        let len = self.segments.len();
        if from >= len || to >= len {
            return false;
        }
        let segment = self.segments.remove(from);
        self.segments.insert(to, segment);
        true
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
