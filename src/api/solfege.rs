//! Solfège operations for the WASM API

use crate::api::helpers::{deserialize_or_default, js_error, to_json};
use crate::converters::musicxml::parse_musicxml;
use crate::solfege::{self, SolfegeMode, SolfegeSettings};
use crate::wasm_info;
use wasm_bindgen::prelude::*;

/// Syllable for one note
///
/// # Parameters
/// - `note_name`: pitch name with or without octave, e.g. "F#4" or "F#"
/// - `key`: tonic name, used when `movable` is set
///
/// # Returns
/// The syllable, or an empty string when the name is unreadable or its
/// spelling has no syllable
#[wasm_bindgen(js_name = getSolfege)]
pub fn get_solfege(note_name: &str, key: &str, movable: bool) -> String {
    let mode = if movable {
        SolfegeMode::Movable
    } else {
        SolfegeMode::Fixed
    };
    solfege::resolve_name(note_name, key, mode)
}

/// Annotate every pitched note of a document
///
/// # Parameters
/// - `settings`: `{ key, mode: "fixed" | "movable", style: "korean" | "latin" }`,
///   any field may be left out; `undefined` uses the defaults
///
/// # Returns
/// JSON array of `{ measureNumber, noteIndex, pitchName, syllable, step, octave }`
#[wasm_bindgen(js_name = extractSolfege)]
pub fn extract_solfege(xml: &str, settings: JsValue) -> Result<String, JsValue> {
    let settings: SolfegeSettings = deserialize_or_default(settings, "Invalid solfège settings")?;
    wasm_info!(
        "extractSolfege called: key={}, mode={:?}, style={:?}",
        settings.key,
        settings.mode,
        settings.style
    );

    let score = parse_musicxml(xml).map_err(|e| js_error("MusicXML parse error", e))?;
    let annotations = settings.annotate(&score);

    wasm_info!("  {} annotation(s)", annotations.len());
    to_json(&annotations, "Annotation serialization error")
}

/// Tonics with a movable-do table
#[wasm_bindgen(js_name = getSupportedKeys)]
pub fn get_supported_keys() -> js_sys::Array {
    solfege::supported_keys()
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}
