//! Data models for scores, pitches and keys

pub mod key;
pub mod pitch;
pub mod score;

pub use key::{fifths_to_key, key_to_fifths, KeySignature, Mode};
pub use pitch::{Pitch, PitchClass, SpellingPolicy, Step};
pub use score::{Attributes, Clef, Measure, Note, Part, Score, TimeSignature};
