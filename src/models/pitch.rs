//! Spelled pitch model
//!
//! A pitch is a letter step, a signed alteration and an octave. `F#4` and
//! `Gb4` share a chromatic index but are different pitches, so every
//! conversion back from an index takes a [`SpellingPolicy`].

use crate::errors::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Letter name of a pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    pub const ALL: [Step; 7] = [Step::C, Step::D, Step::E, Step::F, Step::G, Step::A, Step::B];

    /// Position in the letter cycle (C = 0 .. B = 6)
    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn from_index(index: i32) -> Step {
        Self::ALL[index.rem_euclid(7) as usize]
    }

    /// Semitones above C of the natural step
    pub fn semitone(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    /// Case-insensitive letter lookup
    pub fn from_char(c: char) -> Option<Step> {
        match c.to_ascii_uppercase() {
            'C' => Some(Step::C),
            'D' => Some(Step::D),
            'E' => Some(Step::E),
            'F' => Some(Step::F),
            'G' => Some(Step::G),
            'A' => Some(Step::A),
            'B' => Some(Step::B),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::C => "C",
            Step::D => "D",
            Step::E => "E",
            Step::F => "F",
            Step::G => "G",
            Step::A => "A",
            Step::B => "B",
        }
    }

    /// Move `steps` letters up (positive) or down (negative), wrapping B→C
    pub fn shifted(self, steps: i32) -> Step {
        Step::from_index(self.index() + steps)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A step plus a signed count of sharps (positive) or flats (negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchClass {
    pub step: Step,
    pub alter: i32,
}

impl PitchClass {
    pub const fn new(step: Step, alter: i32) -> Self {
        PitchClass { step, alter }
    }

    /// Semitones above C before wrapping: B# is 12, Cb is -1
    pub fn semitone_offset(&self) -> i32 {
        self.step.semitone() + self.alter
    }

    /// Pitch class number 0..12
    pub fn chroma(&self) -> i32 {
        self.semitone_offset().rem_euclid(12)
    }

    pub fn is_enharmonic(&self, other: &PitchClass) -> bool {
        self.chroma() == other.chroma()
    }

    /// Accidental suffix: `#` per sharp, `b` per flat
    pub fn accidental(&self) -> String {
        alter_to_accidental(self.alter)
    }
}

/// `"C"`, `"f#"`, `"Bbb"` → pitch class. The first character is the step;
/// the rest must be a run of `#` or a run of `b`.
impl FromStr for PitchClass {
    type Err = ScoreError;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || ScoreError::InvalidSpelling(text.to_string());

        let mut chars = text.chars();
        let step = chars.next().and_then(Step::from_char).ok_or_else(invalid)?;
        let accidental = chars.as_str();

        let alter = if accidental.is_empty() {
            0
        } else if accidental.chars().all(|c| c == '#') {
            accidental.len() as i32
        } else if accidental.chars().all(|c| c == 'b') {
            -(accidental.len() as i32)
        } else {
            return Err(invalid());
        };

        Ok(PitchClass::new(step, alter))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.step, self.accidental())
    }
}

/// Alteration count → accidental text (`2` → `"##"`, `-1` → `"b"`, `0` → `""`)
pub fn alter_to_accidental(alter: i32) -> String {
    if alter > 0 {
        "#".repeat(alter as usize)
    } else if alter < 0 {
        "b".repeat(alter.unsigned_abs() as usize)
    } else {
        String::new()
    }
}

/// Octaves a document pitch may use; MusicXML itself stops at 0..=9
pub const OCTAVE_RANGE: RangeInclusive<i32> = -1..=10;

/// Largest alteration, in either direction, a document pitch may use
pub const MAX_ALTER: i32 = 3;

/// A spelled pitch with octave (scientific pitch notation, C4 = middle C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub step: Step,
    pub alter: i32,
    pub octave: i32,
}

impl Pitch {
    pub const fn new(step: Step, alter: i32, octave: i32) -> Self {
        Pitch { step, alter, octave }
    }

    pub fn from_class(class: PitchClass, octave: i32) -> Self {
        Pitch::new(class.step, class.alter, octave)
    }

    /// Whether octave and alteration are within what a score can carry
    pub fn is_in_range(&self) -> bool {
        OCTAVE_RANGE.contains(&self.octave) && (-MAX_ALTER..=MAX_ALTER).contains(&self.alter)
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::new(self.step, self.alter)
    }

    /// Linear semitone position: step base + alteration + 12 × octave
    pub fn chromatic_index(&self) -> i32 {
        self.step.semitone() + self.alter + 12 * self.octave
    }

    /// Spell a chromatic index. The octave follows the chosen spelling, so
    /// index 48 spelled with a B yields B#3 and index 59 spelled with a C
    /// yields Cb5.
    pub fn from_chromatic_index(index: i32, policy: SpellingPolicy) -> Pitch {
        let class = policy.spell(index.rem_euclid(12));
        let octave = (index - class.semitone_offset()).div_euclid(12);
        Pitch::from_class(class, octave)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class(), self.octave)
    }
}

/// `"C#4"`, `"Bb-1"` → pitch
impl FromStr for Pitch {
    type Err = ScoreError;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || ScoreError::InvalidSpelling(text.to_string());

        let split = text
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(invalid)?;

        let class: PitchClass = text[..split].parse()?;
        let octave: i32 = text[split..].parse().map_err(|_| invalid())?;

        Ok(Pitch::from_class(class, octave))
    }
}

const SHARP_SPELLINGS: [PitchClass; 12] = [
    PitchClass::new(Step::C, 0),
    PitchClass::new(Step::C, 1),
    PitchClass::new(Step::D, 0),
    PitchClass::new(Step::D, 1),
    PitchClass::new(Step::E, 0),
    PitchClass::new(Step::F, 0),
    PitchClass::new(Step::F, 1),
    PitchClass::new(Step::G, 0),
    PitchClass::new(Step::G, 1),
    PitchClass::new(Step::A, 0),
    PitchClass::new(Step::A, 1),
    PitchClass::new(Step::B, 0),
];

const FLAT_SPELLINGS: [PitchClass; 12] = [
    PitchClass::new(Step::C, 0),
    PitchClass::new(Step::D, -1),
    PitchClass::new(Step::D, 0),
    PitchClass::new(Step::E, -1),
    PitchClass::new(Step::E, 0),
    PitchClass::new(Step::F, 0),
    PitchClass::new(Step::G, -1),
    PitchClass::new(Step::G, 0),
    PitchClass::new(Step::A, -1),
    PitchClass::new(Step::A, 0),
    PitchClass::new(Step::B, -1),
    PitchClass::new(Step::B, 0),
];

/// Order in which sharps enter a key signature
const SHARP_ORDER: [Step; 7] = [Step::F, Step::C, Step::G, Step::D, Step::A, Step::E, Step::B];

/// Order in which flats enter a key signature
const FLAT_ORDER: [Step; 7] = [Step::B, Step::E, Step::A, Step::D, Step::G, Step::C, Step::F];

/// How to pick a spelling for a chromatic index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpellingPolicy {
    /// C C# D D# E F F# G G# A A# B
    #[default]
    Sharps,
    /// C Db D Eb E F Gb G Ab A Bb B
    Flats,
    /// Spell against a key signature (signed fifths count)
    Key(i32),
    /// Force the letter and derive the alteration
    Letter(Step),
}

impl SpellingPolicy {
    pub fn spell(self, chroma: i32) -> PitchClass {
        let chroma = chroma.rem_euclid(12);
        match self {
            SpellingPolicy::Sharps => SHARP_SPELLINGS[chroma as usize],
            SpellingPolicy::Flats => FLAT_SPELLINGS[chroma as usize],
            SpellingPolicy::Letter(step) => {
                // Nearest alteration in -6..=5
                let alter = (chroma - step.semitone() + 6).rem_euclid(12) - 6;
                PitchClass::new(step, alter)
            }
            SpellingPolicy::Key(fifths) => spell_in_key(chroma, fifths),
        }
    }
}

/// Alteration a key signature applies to `step`. Counts past seven wrap
/// into double accidentals (nine sharps put F and C on double sharps).
pub fn key_alteration(step: Step, fifths: i32) -> i32 {
    let order = if fifths >= 0 { &SHARP_ORDER } else { &FLAT_ORDER };
    let count = fifths.abs();
    let position = order.iter().position(|s| *s == step).unwrap_or(0) as i32;

    if count <= position {
        return 0;
    }
    let alter = (count - position - 1) / 7 + 1;
    if fifths >= 0 {
        alter
    } else {
        -alter
    }
}

fn spell_in_key(chroma: i32, fifths: i32) -> PitchClass {
    let matches = |class: &PitchClass| class.chroma() == chroma;

    // Scale tone
    if let Some(class) = Step::ALL
        .iter()
        .map(|&step| PitchClass::new(step, key_alteration(step, fifths)))
        .find(|class| matches(class))
    {
        return class;
    }

    // Natural letter cancelling the signature
    if let Some(class) = Step::ALL
        .iter()
        .map(|&step| PitchClass::new(step, 0))
        .find(|class| matches(class))
    {
        return class;
    }

    // Scale tone raised in sharp keys, lowered in flat keys
    let delta = if fifths >= 0 { 1 } else { -1 };
    if let Some(class) = Step::ALL
        .iter()
        .map(|&step| PitchClass::new(step, key_alteration(step, fifths) + delta))
        .find(|class| class.alter.abs() <= 2 && matches(class))
    {
        return class;
    }

    if fifths >= 0 {
        SpellingPolicy::Sharps.spell(chroma)
    } else {
        SpellingPolicy::Flats.spell(chroma)
    }
}
