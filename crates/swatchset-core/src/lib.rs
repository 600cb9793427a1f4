//! Swatchset Core Library
//!
//! Platform-agnostic palette model, state store and persistence for the
//! Swatchset color-palette editor.

pub mod color;
pub mod ids;
pub mod model;
pub mod notice;
pub mod selection;
pub mod storage;
pub mod store;

pub use color::{Rgb, contrast_text_color, parse_hex_rgb};
pub use ids::generate_id;
pub use model::{ColorSegment, SegmentDraft, SegmentSet, SegmentUpdate, DEFAULT_SEGMENT_COLOR, DEFAULT_SET_ID};
pub use notice::{LogNotifier, Notice, Notifier};
pub use selection::SelectionState;
pub use store::{ACTIVE_SET_KEY, PaletteError, PaletteStore, SETS_KEY};
