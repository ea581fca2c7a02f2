//! Solfège syllables for notes
//!
//! Two conventions are supported:
//!
//! - **Fixed-do**: do is always C. Only the 17 conventional spellings
//!   (naturals, single sharps, single flats) have a syllable.
//! - **Movable-do**: do is the tonic of the key. Spellings outside the key's
//!   major scale, and keys without a table, fall back to fixed-do.
//!
//! A spelling with no syllable resolves to an empty string, which callers
//! treat as "no annotation".

mod tables;

use crate::errors::Result;
use crate::models::key::parse_tonic;
use crate::models::pitch::{Pitch, PitchClass, Step};
use crate::models::score::Score;
use serde::{Deserialize, Serialize};
use std::fmt;
use tables::{FIXED_DO_MAP, MAJOR_SCALES, MOVABLE_DO_MAP};

const KOREAN_SYLLABLES: [&str; 7] = ["도", "레", "미", "파", "솔", "라", "시"];
const LATIN_SYLLABLES: [&str; 7] = ["do", "re", "mi", "fa", "sol", "la", "si"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolfegeMode {
    #[default]
    Fixed,
    Movable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyllableStyle {
    /// 도 레 미 파 솔 라 시
    #[default]
    Korean,
    /// do re mi fa sol la si
    Latin,
}

/// Scale degree (1-7) plus a chromatic inflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Syllable {
    pub degree: u8,
    pub alter: i8,
}

impl Syllable {
    pub const fn new(degree: u8, alter: i8) -> Self {
        Syllable { degree, alter }
    }

    /// Base syllable with `#` per sharp and `♭` per flat
    pub fn render(&self, style: SyllableStyle) -> String {
        let names = match style {
            SyllableStyle::Korean => &KOREAN_SYLLABLES,
            SyllableStyle::Latin => &LATIN_SYLLABLES,
        };
        let base = names[usize::from(self.degree.clamp(1, 7)) - 1];
        let suffix = if self.alter >= 0 { "#" } else { "♭" };
        format!("{}{}", base, suffix.repeat(usize::from(self.alter.unsigned_abs())))
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(SyllableStyle::Korean))
    }
}

/// Key names are matched by canonical spelling, so "bb" finds "Bb"
fn canonical_key(key: &str) -> String {
    parse_tonic(key)
        .map(|tonic| tonic.to_string())
        .unwrap_or_else(|_| key.trim().to_string())
}

/// Syllable of a pitch class, `None` when no table covers its spelling
pub fn lookup(class: &PitchClass, key: &str, mode: SolfegeMode) -> Option<Syllable> {
    let spelling = class.to_string();

    if mode == SolfegeMode::Movable {
        let movable = MOVABLE_DO_MAP
            .get(canonical_key(key).as_str())
            .and_then(|degrees| degrees.get(spelling.as_str()));
        if let Some(syllable) = movable {
            return Some(*syllable);
        }
    }

    FIXED_DO_MAP.get(spelling.as_str()).copied()
}

/// Syllable text for a pitch; empty when unsupported
pub fn resolve(pitch: &Pitch, key: &str, mode: SolfegeMode) -> String {
    resolve_styled(pitch, key, mode, SyllableStyle::default())
}

pub fn resolve_styled(pitch: &Pitch, key: &str, mode: SolfegeMode, style: SyllableStyle) -> String {
    lookup(&pitch.pitch_class(), key, mode)
        .map(|syllable| syllable.render(style))
        .unwrap_or_default()
}

/// Syllable for a note name, with or without octave ("F#4", "Bb").
/// Unreadable names give an empty string.
pub fn resolve_name(name: &str, key: &str, mode: SolfegeMode) -> String {
    let name = name.trim();
    let class = name
        .parse::<Pitch>()
        .map(|pitch| pitch.pitch_class())
        .or_else(|_| name.parse::<PitchClass>());

    match class {
        Ok(class) => lookup(&class, key, mode)
            .map(|syllable| syllable.to_string())
            .unwrap_or_default(),
        Err(e) => {
            log::debug!("No syllable for '{}': {}", name, e);
            String::new()
        }
    }
}

/// Tonics with a movable-do table
pub fn supported_keys() -> Vec<&'static str> {
    MAJOR_SCALES.iter().map(|(tonic, _)| *tonic).collect()
}

/// One annotated note, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolfegeAnnotation {
    pub measure_number: i32,
    /// Position among all notes of the measure, rests included
    pub note_index: usize,
    /// e.g. "F#4"
    pub pitch_name: String,
    pub syllable: String,
    pub step: Step,
    pub octave: i32,
}

/// Annotation options as they arrive from the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolfegeSettings {
    pub key: String,
    pub mode: SolfegeMode,
    pub style: SyllableStyle,
}

impl Default for SolfegeSettings {
    fn default() -> Self {
        SolfegeSettings {
            key: "C".to_string(),
            mode: SolfegeMode::Fixed,
            style: SyllableStyle::Korean,
        }
    }
}

impl SolfegeSettings {
    pub fn annotate(&self, score: &Score) -> Vec<SolfegeAnnotation> {
        annotate_with(score, &self.key, self.mode, self.style)
    }
}

/// Annotate every pitched note of a score. Rests and notes without a
/// pitch are skipped.
pub fn annotate_score(score: &Score, key: &str, mode: SolfegeMode) -> Vec<SolfegeAnnotation> {
    annotate_with(score, key, mode, SyllableStyle::default())
}

/// Parse a document and annotate it
pub fn annotate_musicxml(xml: &str, key: &str, mode: SolfegeMode) -> Result<Vec<SolfegeAnnotation>> {
    let score = crate::converters::musicxml::parse_musicxml(xml)?;
    Ok(annotate_score(&score, key, mode))
}

fn annotate_with(
    score: &Score,
    key: &str,
    mode: SolfegeMode,
    style: SyllableStyle,
) -> Vec<SolfegeAnnotation> {
    let mut annotations = Vec::new();

    for measure in score.parts.iter().flat_map(|part| &part.measures) {
        for (note_index, note) in measure.notes.iter().enumerate() {
            if note.is_rest {
                continue;
            }
            let Some(pitch) = note.pitch else {
                continue;
            };

            annotations.push(SolfegeAnnotation {
                measure_number: measure.number,
                note_index,
                pitch_name: pitch.to_string(),
                syllable: resolve_styled(&pitch, key, mode, style),
                step: pitch.step,
                octave: pitch.octave,
            });
        }
    }

    log::debug!(
        "Annotated {} note(s) in key {} ({:?})",
        annotations.len(),
        key,
        mode
    );
    annotations
}
