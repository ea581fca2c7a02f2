//! JavaScript-facing API
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error conversion shared by every call
//! - `score`: parsing, transposition, key detection and export
//! - `solfege`: syllable lookup and document annotation
//!
//! Results that are not plain strings or numbers cross the boundary as
//! JSON strings. Errors are logged and returned as `JsValue` strings.

pub mod helpers;
pub mod score;
pub mod solfege;

pub use score::{
    calculate_semitones, detect_key, export_musicxml, key_to_fifths, parse_musicxml_json,
    transpose_musicxml,
};
pub use solfege::{extract_solfege, get_solfege, get_supported_keys};
