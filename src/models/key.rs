//! Keys: tonic names and key signatures
//!
//! A key reaches this crate in two shapes. Callers name a tonic ("D", "Bb",
//! "F#"); documents carry a signature as a signed fifths count plus a mode.
//! This module maps between the two.

use crate::errors::{Result, ScoreError};
use crate::models::pitch::{Pitch, PitchClass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Octave at which tonics are compared when measuring intervals
pub const REFERENCE_OCTAVE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient: anything other than "minor" reads as major.
impl FromStr for Mode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("minor") {
            Ok(Mode::Minor)
        } else {
            Ok(Mode::Major)
        }
    }
}

/// Key signature as encoded in `<key>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeySignature {
    pub fifths: i32,
    pub mode: Mode,
}

impl KeySignature {
    pub fn new(fifths: i32, mode: Mode) -> Self {
        KeySignature { fifths, mode }
    }

    /// Tonic name of this signature, e.g. `{2, major}` → "D", `{0, minor}` → "A"
    pub fn tonic_name(&self) -> Option<&'static str> {
        fifths_to_key(self.fifths, self.mode)
    }
}

/// Major keys indexed by `fifths + 7`
const MAJOR_KEYS: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];

/// Minor keys indexed by `fifths + 7`
const MINOR_KEYS: [&str; 15] = [
    "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#",
];

/// Tonics with no signature of their own, mapped to the enharmonic one
fn normalize_for_signature(name: &str) -> &str {
    match name {
        "A#" => "Bb",
        "D#" => "Eb",
        "G#" => "Ab",
        other => other,
    }
}

/// Fifths count of a major key name. Unknown names give 0.
pub fn key_to_fifths(name: &str) -> i32 {
    let normalized = normalize_for_signature(name.trim());
    MAJOR_KEYS
        .iter()
        .position(|key| *key == normalized)
        .map(|index| index as i32 - 7)
        .unwrap_or_else(|| {
            log::debug!("No key signature for '{}', using 0 fifths", name);
            0
        })
}

/// Tonic name for a fifths count, `None` outside -7..=7
pub fn fifths_to_key(fifths: i32, mode: Mode) -> Option<&'static str> {
    if !(-7..=7).contains(&fifths) {
        return None;
    }
    let table = match mode {
        Mode::Major => &MAJOR_KEYS,
        Mode::Minor => &MINOR_KEYS,
    };
    Some(table[(fifths + 7) as usize])
}

/// Tonic pitch class of a key name, `InvalidKey` when unreadable
pub fn parse_tonic(name: &str) -> Result<PitchClass> {
    name.trim()
        .parse::<PitchClass>()
        .map_err(|_| ScoreError::InvalidKey(name.to_string()))
}

/// Tonic of a key name placed at the reference octave
pub fn tonic_pitch(name: &str) -> Result<Pitch> {
    Ok(Pitch::from_class(parse_tonic(name)?, REFERENCE_OCTAVE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitch::Step;

    #[test]
    fn test_key_to_fifths() {
        assert_eq!(key_to_fifths("C"), 0);
        assert_eq!(key_to_fifths("F#"), 6);
        assert_eq!(key_to_fifths("C#"), 7);
        assert_eq!(key_to_fifths("Cb"), -7);
        assert_eq!(key_to_fifths("Bb"), -2);
    }

    #[test]
    fn test_key_to_fifths_normalizes_enharmonics() {
        assert_eq!(key_to_fifths("D#"), key_to_fifths("Eb"));
        assert_eq!(key_to_fifths("D#"), -3);
        assert_eq!(key_to_fifths("G#"), -4);
        assert_eq!(key_to_fifths("A#"), -2);
    }

    #[test]
    fn test_unknown_key_falls_back_to_zero() {
        assert_eq!(key_to_fifths("H"), 0);
        assert_eq!(key_to_fifths("E#"), 0);
        assert_eq!(key_to_fifths(""), 0);
    }

    #[test]
    fn test_fifths_to_key_both_directions() {
        for name in MAJOR_KEYS {
            assert_eq!(fifths_to_key(key_to_fifths(name), Mode::Major), Some(name));
        }
        assert_eq!(fifths_to_key(0, Mode::Minor), Some("A"));
        assert_eq!(fifths_to_key(-3, Mode::Minor), Some("C"));
        assert_eq!(fifths_to_key(8, Mode::Major), None);
    }

    #[test]
    fn test_parse_tonic() {
        assert_eq!(parse_tonic("Eb").unwrap(), PitchClass::new(Step::E, -1));
        assert_eq!(parse_tonic("X"), Err(ScoreError::InvalidKey("X".to_string())));
        assert_eq!(tonic_pitch("A").unwrap().chromatic_index(), 57);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("minor".parse::<Mode>().unwrap(), Mode::Minor);
        assert_eq!("major".parse::<Mode>().unwrap(), Mode::Major);
        assert_eq!("dorian".parse::<Mode>().unwrap(), Mode::Major);
        assert_eq!(KeySignature::new(2, Mode::Major).tonic_name(), Some("D"));
    }
}
