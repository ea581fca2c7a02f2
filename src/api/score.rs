//! Document operations for the WASM API
//!
//! - Parsing: MusicXML text to score JSON
//! - Transposition: MusicXML text from one key to another
//! - Export: score JSON back to MusicXML

use crate::api::helpers::{js_error, to_json};
use crate::converters::musicxml::{parse_musicxml, write_musicxml};
use crate::models::key;
use crate::models::score::Score;
use crate::transposition;
use crate::wasm_info;
use wasm_bindgen::prelude::*;

/// Parse MusicXML into the score model
///
/// # Returns
/// JSON string of the score (title, composer, parts → measures → notes)
#[wasm_bindgen(js_name = parseMusicXML)]
pub fn parse_musicxml_json(xml: &str) -> Result<String, JsValue> {
    wasm_info!("parseMusicXML called: {} bytes", xml.len());

    let score = parse_musicxml(xml).map_err(|e| js_error("MusicXML parse error", e))?;

    wasm_info!(
        "  Parsed {} part(s), {} note(s)",
        score.parts.len(),
        score.note_count()
    );
    to_json(&score, "Score serialization error")
}

/// Transpose a MusicXML document
///
/// # Parameters
/// - `from_key`, `to_key`: tonic names such as "C", "F#", "Bb"
///
/// # Returns
/// The transposed MusicXML text. Elements other than pitches and key
/// signatures are left as they were.
#[wasm_bindgen(js_name = transposeMusicXML)]
pub fn transpose_musicxml(xml: &str, from_key: &str, to_key: &str) -> Result<String, JsValue> {
    wasm_info!("transposeMusicXML called: {} → {}", from_key, to_key);

    let transposed = transposition::transpose(xml, from_key, to_key)
        .map_err(|e| js_error("Transposition error", e))?;

    wasm_info!("  Transposed document: {} bytes", transposed.len());
    Ok(transposed)
}

/// Signed semitone distance between two keys, in -11..=11
#[wasm_bindgen(js_name = calculateSemitones)]
pub fn calculate_semitones(from_key: &str, to_key: &str) -> Result<i32, JsValue> {
    transposition::calculate_semitones(from_key, to_key)
        .map_err(|e| js_error("Interval error", e))
}

/// Fifths count of a major key name (0 for unknown names)
#[wasm_bindgen(js_name = keyToFifths)]
pub fn key_to_fifths(key_name: &str) -> i32 {
    key::key_to_fifths(key_name)
}

/// Key of a document, read from its first key signature
///
/// # Returns
/// Tonic name such as "D" or, for minor signatures, "B"
#[wasm_bindgen(js_name = detectKey)]
pub fn detect_key(xml: &str) -> Result<String, JsValue> {
    let score = parse_musicxml(xml).map_err(|e| js_error("MusicXML parse error", e))?;
    let signature = score.key_signature();

    let tonic = signature.tonic_name().unwrap_or("C");
    wasm_info!(
        "detectKey: {} fifths, {} → {}",
        signature.fifths,
        signature.mode,
        tonic
    );
    Ok(tonic.to_string())
}

/// Write a score back out as MusicXML
///
/// # Parameters
/// - `score_json`: a score in the shape `parseMusicXML` returns
#[wasm_bindgen(js_name = exportMusicXML)]
pub fn export_musicxml(score_json: &str) -> Result<String, JsValue> {
    wasm_info!("exportMusicXML called: {} bytes of JSON", score_json.len());

    let score: Score =
        serde_json::from_str(score_json).map_err(|e| js_error("Invalid score JSON", e))?;
    let musicxml = write_musicxml(&score).map_err(|e| js_error("MusicXML export error", e))?;

    wasm_info!("  MusicXML generated: {} bytes", musicxml.len());
    Ok(musicxml)
}
