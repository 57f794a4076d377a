//! Browser host for the sticky-notes widget.
//!
//! # Responsibility
//! - Bind a `NoteBoard` to `#notesContainer`, `#addNoteBtn` and
//!   `localStorage`.
//! - Translate DOM events into board commands.
//!
//! # Invariants
//! - Stored notes are replayed exactly once, at start.
//! - No board error escapes as a panic; failures are logged to the console.

mod app;
mod console_log;
mod dom_surface;
mod local_storage;
mod math_random;
mod routing;

pub use dom_surface::DomSurface;
pub use local_storage::LocalStorageStore;
pub use math_random::MathRandom;
pub use routing::{handle_card_event, CardEvent};

use wasm_bindgen::prelude::*;

/// Module entry point, run by the wasm-bindgen glue once the module loads.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    app::mount(&document)
}

/// Core crate version, for diagnostics from the page.
#[wasm_bindgen(js_name = coreVersion)]
pub fn core_version() -> String {
    stickynotes_core::core_version().to_owned()
}
