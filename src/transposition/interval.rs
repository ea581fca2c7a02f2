//! Intervals between keys
//!
//! An interval carries both a semitone shift and a letter shift. The
//! semitones fix the sounding pitch; the letters keep each note on the
//! scale degree it had in the old key (E in C becomes F#, not Gb, in D).

use crate::errors::Result;
use crate::models::key::{parse_tonic, tonic_pitch};
use crate::models::pitch::{Pitch, SpellingPolicy};
use serde::Serialize;

/// Largest shift a key change produces, in either direction
pub const MAX_SEMITONES: i32 = 11;

/// Fold a semitone difference into -11..=11
pub fn normalize_semitones(mut semitones: i32) -> i32 {
    while semitones > MAX_SEMITONES {
        semitones -= 12;
    }
    while semitones < -MAX_SEMITONES {
        semitones += 12;
    }
    semitones
}

/// Signed semitone distance between two tonics placed at the same octave
pub fn calculate_semitones(from_key: &str, to_key: &str) -> Result<i32> {
    let from = tonic_pitch(from_key)?;
    let to = tonic_pitch(to_key)?;
    Ok(normalize_semitones(to.chromatic_index() - from.chromatic_index()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    /// -11..=11
    pub semitones: i32,
    /// Letter distance, 0..=6
    pub letters: i32,
}

impl Interval {
    pub fn between(from_key: &str, to_key: &str) -> Result<Interval> {
        let semitones = calculate_semitones(from_key, to_key)?;
        let from = parse_tonic(from_key)?;
        let to = parse_tonic(to_key)?;

        Ok(Interval {
            semitones,
            letters: (to.step.index() - from.step.index()).rem_euclid(7),
        })
    }

    /// Shift a pitch: exact in semitones, letter moved by `letters`
    pub fn apply(&self, pitch: &Pitch) -> Pitch {
        let letter = pitch.step.shifted(self.letters);
        Pitch::from_chromatic_index(
            pitch.chromatic_index() + self.semitones,
            SpellingPolicy::Letter(letter),
        )
    }

    pub fn inverse(&self) -> Interval {
        Interval {
            semitones: -self.semitones,
            letters: (-self.letters).rem_euclid(7),
        }
    }
}
