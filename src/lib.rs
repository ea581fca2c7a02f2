//! Solfège and Transposition WASM Module
//!
//! Reads MusicXML scores, labels their notes with solfège syllables
//! (fixed-do or movable-do) and transposes them between keys.

pub mod api;
pub mod converters;
pub mod errors;
pub mod models;
pub mod solfege;
pub mod transposition;

// Re-export commonly used types
pub use converters::{parse_musicxml, write_musicxml};
pub use errors::{Result, ScoreError};
pub use models::*;
pub use solfege::{SolfegeAnnotation, SolfegeMode, SolfegeSettings, SyllableStyle};
pub use transposition::{calculate_semitones, key_to_fifths, transpose};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only when a logger is already installed
    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).ok();

    log::info!("Solfège WASM module initialized");
}
