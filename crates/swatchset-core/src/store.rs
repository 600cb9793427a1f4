//! Palette store: the single source of truth for sets, segments and selection.
//!
//! Every mutation goes through [`PaletteStore`]. Mutations that touch sets or
//! segments write the full state back to storage before returning; write
//! failures are logged and otherwise ignored, so the in-memory state stays
//! authoritative.

use crate::model::{ColorSegment, SegmentDraft, SegmentSet, SegmentUpdate, DEFAULT_SET_ID};
use crate::notice::{LogNotifier, Notice, Notifier};
use crate::selection::SelectionState;
use crate::storage::{Storage, StorageError, StorageResult};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

/// Storage key holding the JSON array of sets.
pub const SETS_KEY: &str = "colorPaletteSets";

/// Storage key holding the JSON string id of the active set.
pub const ACTIVE_SET_KEY: &str = "colorPaletteActiveSetId";

/// Palette operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("Cannot delete the last remaining set")]
    LastSet,
    #[error("Set not found: {0}")]
    SetNotFound(String),
}

/// Owns the palette state and applies every operation on it.
pub struct PaletteStore<S: Storage> {
    /// All sets, in creation order. Never empty.
    sets: Vec<SegmentSet>,
    /// Always names a member of `sets`.
    active_set_id: String,
    /// Ephemeral selection over the active set.
    selection: SelectionState,
    /// Persistence backend.
    storage: Arc<S>,
    /// Receives user-facing notices.
    notifier: Box<dyn Notifier>,
}

impl<S: Storage> PaletteStore<S> {
    /// Create a store, restoring state from `storage`.
    ///
    /// Missing or malformed entries fall back to a single default set.
    pub fn new(storage: Arc<S>) -> Self {
        let (sets, active_set_id) = load_state(storage.as_ref());
        log::debug!("Palette store loaded {} set(s), active {}", sets.len(), active_set_id);
        Self {
            sets,
            active_set_id,
            selection: SelectionState::new(),
            storage,
            notifier: Box::new(LogNotifier),
        }
    }

    /// Replace the notifier.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Forward a notice to the notifier.
    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(&notice);
    }

    /// All sets in order.
    pub fn sets(&self) -> &[SegmentSet] {
        &self.sets
    }

    /// Id of the active set.
    pub fn active_set_id(&self) -> &str {
        &self.active_set_id
    }

    /// The active set.
    pub fn active_set(&self) -> &SegmentSet {
        self.sets
            .iter()
            .find(|set| set.id == self.active_set_id)
            .unwrap_or(&self.sets[0])
    }

    /// Get a set by id.
    pub fn set(&self, id: &str) -> Option<&SegmentSet> {
        self.sets.iter().find(|set| set.id == id)
    }

    /// Get a segment of the active set by id.
    pub fn segment(&self, id: &str) -> Option<&ColorSegment> {
        self.active_set().segment(id)
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Whether selection mode is on.
    pub fn selection_mode(&self) -> bool {
        self.selection.is_active()
    }

    /// The storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    fn active_set_mut(&mut self) -> Option<&mut SegmentSet> {
        let id = &self.active_set_id;
        self.sets.iter_mut().find(|set| &set.id == id)
    }

    // --- Sets ---

    /// Append a new empty set and make it active.
    /// Returns the new set's id, or `None` if `name` is blank.
    pub fn create_set(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let set = SegmentSet::new(name);
        let id = set.id.clone();
        self.sets.push(set);
        self.switch_active(id.clone());
        self.persist();

        self.notify(Notice::SetCreated { name: name.to_string() });
        Some(id)
    }

    /// Rename a set. Returns false if `name` is blank or the set is unknown.
    pub fn update_set_name(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(set) = self.sets.iter_mut().find(|set| set.id == id) else {
            return false;
        };

        set.name = name.to_string();
        self.persist();

        self.notify(Notice::SetRenamed { name: name.to_string() });
        true
    }

    /// Delete a set.
    ///
    /// Refuses to delete the last remaining set. When the active set is
    /// deleted, the set before it becomes active (or the new first set).
    pub fn delete_set(&mut self, id: &str) -> Result<SegmentSet, PaletteError> {
        if self.sets.len() <= 1 {
            self.notify(Notice::CannotDeleteLastSet);
            return Err(PaletteError::LastSet);
        }
        let index = self
            .sets
            .iter()
            .position(|set| set.id == id)
            .ok_or_else(|| PaletteError::SetNotFound(id.to_string()))?;

        let removed = self.sets.remove(index);
        if removed.id == self.active_set_id {
            let next = index.saturating_sub(1);
            let next_id = self.sets[next].id.clone();
            self.switch_active(next_id);
        }
        self.persist();

        self.notify(Notice::SetDeleted);
        Ok(removed)
    }

    /// Make `id` the active set. Unknown ids are ignored.
    pub fn set_active_set(&mut self, id: &str) -> bool {
        if !self.sets.iter().any(|set| set.id == id) {
            return false;
        }
        if self.active_set_id != id {
            self.switch_active(id.to_string());
            self.persist();
        }
        true
    }

    /// Point at another set. Selection belongs to the previous set, so it is dropped.
    fn switch_active(&mut self, id: String) {
        if self.active_set_id != id {
            self.selection.clear();
        }
        self.active_set_id = id;
    }

    // --- Segments ---

    /// Append a segment to the active set.
    /// Returns the new segment's id, or `None` if color or title is empty.
    pub fn add_segment(&mut self, draft: SegmentDraft) -> Option<String> {
        if !draft.is_complete() {
            return None;
        }

        let segment = ColorSegment::from_draft(draft);
        let id = segment.id.clone();
        let set = self.active_set_mut()?;
        set.segments.push(segment);
        self.persist();
        Some(id)
    }

    /// Merge `update` into a segment of the active set.
    pub fn update_segment(&mut self, id: &str, update: SegmentUpdate) -> bool {
        let Some(segment) = self
            .active_set_mut()
            .and_then(|set| set.segments.iter_mut().find(|s| s.id == id))
        else {
            return false;
        };

        segment.apply(update);
        self.persist();
        true
    }

    /// Remove a segment from the active set and from the selection.
    pub fn delete_segment(&mut self, id: &str) -> bool {
        self.selection.remove(id);
        let removed = self
            .active_set_mut()
            .and_then(|set| set.remove_segment(id))
            .is_some();
        if removed {
            self.persist();
        }
        removed
    }

    /// Move the segment at `old_index` to `new_index` in the active set.
    /// Out-of-range indices leave the set untouched and return false.
    pub fn reorder_segments(&mut self, old_index: usize, new_index: usize) -> bool {
        let Some(set) = self.active_set_mut() else {
            return false;
        };
        if !set.move_segment(old_index, new_index) {
            log::debug!("Ignoring reorder {} -> {} on {} segment(s)", old_index, new_index, set.len());
            return false;
        }
        if old_index != new_index {
            self.persist();
        }
        true
    }

    // --- Selection ---

    /// Enter or leave selection mode. Leaving clears the selection.
    pub fn toggle_selection_mode(&mut self) {
        self.selection.toggle_mode();
    }

    /// Toggle one segment of the active set. Ids outside the active set are ignored.
    pub fn toggle_segment_selection(&mut self, id: &str) -> bool {
        if self.active_set().segment(id).is_none() {
            return false;
        }
        self.selection.toggle(id);
        true
    }

    /// Select every segment of the active set.
    pub fn select_all(&mut self) {
        let ids: Vec<String> = self.active_set().segments.iter().map(|s| s.id.clone()).collect();
        self.selection.replace_with(ids);
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Delete every selected segment, then clear the selection.
    /// Returns the number of segments removed.
    pub fn delete_selected(&mut self) -> usize {
        let selection = std::mem::take(&mut self.selection);
        let mut removed = 0;
        if let Some(set) = self.active_set_mut() {
            let before = set.len();
            set.segments.retain(|s| !selection.contains(&s.id));
            removed = before - set.len();
        }
        self.selection = selection;
        self.selection.clear();

        if removed > 0 {
            self.persist();
        }
        removed
    }

    // --- Export ---

    /// Segments to export: the selected ones if anything is selected,
    /// otherwise the whole active set. Always in active-set order.
    pub fn export_segments(&self) -> Vec<&ColorSegment> {
        let segments = &self.active_set().segments;
        if self.selection.is_empty() {
            segments.iter().collect()
        } else {
            segments.iter().filter(|s| self.selection.contains(&s.id)).collect()
        }
    }

    /// One-line description of what an export would contain.
    pub fn export_summary(&self) -> String {
        if self.selection.is_empty() {
            format!("Exporting all {} segments", self.active_set().len())
        } else {
            format!("Exporting {} selected segments", self.selection.len())
        }
    }

    // --- Persistence ---

    /// Serialized `(key, value)` pairs for the current state.
    pub fn persisted_entries(&self) -> StorageResult<[(&'static str, String); 2]> {
        let sets = serde_json::to_string(&self.sets)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let active = serde_json::to_string(&self.active_set_id)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok([(SETS_KEY, sets), (ACTIVE_SET_KEY, active)])
    }

    /// Write the current state to storage. Failures are logged, never returned.
    fn persist(&self) {
        let entries = match self.persisted_entries() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to serialize palette state: {}", e);
                return;
            }
        };
        for (key, value) in entries {
            if let Err(e) = self.storage.set(key, &value) {
                log::warn!("Failed to persist {}: {}", key, e);
            }
        }
    }
}

/// Read the persisted state, repairing anything that would break invariants.
fn load_state<S: Storage + ?Sized>(storage: &S) -> (Vec<SegmentSet>, String) {
    let sets = match read_json::<Vec<SegmentSet>, S>(storage, SETS_KEY) {
        Some(sets) if !sets.is_empty() => sets,
        Some(_) => {
            log::warn!("Persisted set list is empty, using the default set");
            vec![SegmentSet::default_set()]
        }
        None => vec![SegmentSet::default_set()],
    };

    let active = read_json::<String, S>(storage, ACTIVE_SET_KEY)
        .unwrap_or_else(|| DEFAULT_SET_ID.to_string());
    let active = if sets.iter().any(|set| set.id == active) {
        active
    } else {
        log::warn!("Active set {} does not exist, using {}", active, sets[0].id);
        sets[0].id.clone()
    };

    (sets, active)
}

fn read_json<T: DeserializeOwned, S: Storage + ?Sized>(storage: &S, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(raw) => raw,
        Err(StorageError::NotFound(_)) => {
            log::debug!("No persisted value for {}", key);
            return None;
        }
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", key, e);
            None
        }
    }
}
