//! Key-to-key transposition
//!
//! - [`interval`]: semitone and letter distance between two keys
//! - [`engine`]: transposition of single pitches and score models
//! - [`document`]: in-place transposition of MusicXML text

pub mod document;
pub mod engine;
pub mod interval;

pub use document::transpose;
pub use engine::{transpose_pitch, transpose_score};
pub use interval::{calculate_semitones, Interval};

pub use crate::models::key::key_to_fifths;
