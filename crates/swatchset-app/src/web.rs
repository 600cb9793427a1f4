//! WebAssembly entry point and JS bindings.
//!
//! A page drives the palette through [`WebPalette`]; state lives in
//! `window.localStorage` and exports are downloaded as PNG files.

use std::sync::Arc;
use swatchset_core::storage::LocalStorage;
use swatchset_core::{Notice, Notifier, PaletteStore, SegmentDraft, SegmentUpdate};
use swatchset_render::{ExportArtifact, ExportOptions, Exporter, FontData, Orientation};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Initialize logging and panic reporting.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("Starting Swatchset (WASM)");
    Ok(())
}

/// Forwards notices to a JS callback `(title, message, destructive)`.
struct JsNotifier(js_sys::Function);

impl Notifier for JsNotifier {
    fn notify(&self, notice: &Notice) {
        let title = notice.title().map(JsValue::from_str).unwrap_or(JsValue::NULL);
        let message = JsValue::from_str(&notice.to_string());
        let destructive = JsValue::from_bool(notice.is_destructive());
        if let Err(e) = self.0.call3(&JsValue::NULL, &title, &message, &destructive) {
            log::warn!("Notice callback failed: {:?}", e);
        }
    }
}

/// Palette store backed by `localStorage`, plus the PNG exporter.
#[wasm_bindgen]
pub struct WebPalette {
    store: PaletteStore<LocalStorage>,
    exporter: Exporter,
}

#[wasm_bindgen]
impl WebPalette {
    /// Load persisted state. `on_notice` receives user-facing notices.
    #[wasm_bindgen(constructor)]
    pub fn new(on_notice: Option<js_sys::Function>) -> WebPalette {
        let store = PaletteStore::new(Arc::new(LocalStorage::new()));
        let store = match on_notice {
            Some(callback) => store.with_notifier(JsNotifier(callback)),
            None => store,
        };
        WebPalette {
            store,
            exporter: Exporter::default(),
        }
    }

    /// All sets as the JSON array persisted under `colorPaletteSets`.
    pub fn sets_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.store.sets()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn active_set_id(&self) -> String {
        self.store.active_set_id().to_string()
    }

    pub fn selection_mode(&self) -> bool {
        self.store.selection_mode()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.store.selection().ids().to_vec()
    }

    pub fn create_set(&mut self, name: &str) -> Option<String> {
        self.store.create_set(name)
    }

    pub fn rename_set(&mut self, id: &str, name: &str) -> bool {
        self.store.update_set_name(id, name)
    }

    /// Refusals are reported through the notice callback.
    pub fn delete_set(&mut self, id: &str) -> bool {
        self.store.delete_set(id).is_ok()
    }

    pub fn set_active_set(&mut self, id: &str) -> bool {
        self.store.set_active_set(id)
    }

    pub fn add_segment(&mut self, color: String, title: String) -> Option<String> {
        self.store.add_segment(SegmentDraft::new(color, title))
    }

    pub fn update_segment(&mut self, id: &str, color: Option<String>, title: Option<String>) -> bool {
        self.store.update_segment(id, SegmentUpdate { color, title })
    }

    pub fn delete_segment(&mut self, id: &str) -> bool {
        self.store.delete_segment(id)
    }

    pub fn reorder_segments(&mut self, old_index: usize, new_index: usize) -> bool {
        self.store.reorder_segments(old_index, new_index)
    }

    pub fn toggle_selection_mode(&mut self) {
        self.store.toggle_selection_mode();
    }

    pub fn toggle_segment_selection(&mut self, id: &str) -> bool {
        self.store.toggle_segment_selection(id)
    }

    pub fn select_all(&mut self) {
        self.store.select_all();
    }

    pub fn deselect_all(&mut self) {
        self.store.deselect_all();
    }

    pub fn delete_selected(&mut self) -> usize {
        self.store.delete_selected()
    }

    /// Install the font used for titles. The page fetches the font files.
    pub fn set_font(&mut self, regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<(), JsValue> {
        let to_js = |e: swatchset_render::RendererError| JsValue::from_str(&e.to_string());
        let mut font = FontData::from_bytes(regular).map_err(to_js)?;
        if let Some(bold) = bold {
            font = font.with_bold_bytes(bold).map_err(to_js)?;
        }
        self.exporter = Exporter::new(Some(font));
        Ok(())
    }

    /// Render the active set (or its selection) and download it.
    pub fn export(&self, width: u32, height: u32, vertical: bool, show_titles: bool) -> Result<(), JsValue> {
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let options = ExportOptions::new(width, height)
            .with_orientation(orientation)
            .with_titles(show_titles);

        let artifact = self
            .exporter
            .export_active_set(&self.store, &options)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        download_artifact(&artifact)?;
        self.store.notify(Notice::ExportSucceeded {
            file_name: artifact.file_name,
        });
        Ok(())
    }
}

/// Trigger a browser download of the exported PNG.
pub fn download_artifact(artifact: &ExportArtifact) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let uint8_array = js_sys::Uint8Array::from(artifact.png.as_slice());
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&uint8_array);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(&artifact.file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).ok();
    log::info!("Downloaded {} ({} bytes)", artifact.file_name, artifact.png.len());
    Ok(())
}
