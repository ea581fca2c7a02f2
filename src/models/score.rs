//! Score model: Score → Part → Measure → Note
//!
//! Each level owns its children; traversal is always top-down.

use crate::models::key::KeySignature;
use crate::models::pitch::Pitch;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const UNKNOWN_COMPOSER: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub title: String,
    pub composer: String,
    pub parts: Vec<Part>,
}

impl Score {
    pub fn new(title: impl Into<String>, composer: impl Into<String>) -> Self {
        Score {
            title: title.into(),
            composer: composer.into(),
            parts: Vec::new(),
        }
    }

    fn first_attributes(&self) -> Option<&Attributes> {
        self.parts.first()?.measures.first()?.attributes.as_ref()
    }

    /// Key of the first measure of the first part, C major when absent
    pub fn key_signature(&self) -> KeySignature {
        self.first_attributes()
            .and_then(|attrs| attrs.key)
            .unwrap_or_default()
    }

    /// Time of the first measure of the first part, 4/4 when absent
    pub fn time_signature(&self) -> TimeSignature {
        self.first_attributes()
            .and_then(|attrs| attrs.time)
            .unwrap_or_default()
    }

    pub fn note_count(&self) -> usize {
        self.parts
            .iter()
            .flat_map(|part| &part.measures)
            .map(|measure| measure.notes.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub name: String,
    pub measures: Vec<Measure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// `number` attribute; 0 when missing or not numeric, so it may repeat
    pub number: i32,
    pub attributes: Option<Attributes>,
    pub notes: Vec<Note>,
}

impl Measure {
    pub fn new(number: i32) -> Self {
        Measure {
            number,
            attributes: None,
            notes: Vec::new(),
        }
    }
}

/// Contents of a measure's `<attributes>`. Absent fields are not
/// inherited from earlier measures here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    pub divisions: Option<u32>,
    pub key: Option<KeySignature>,
    pub time: Option<TimeSignature>,
    pub clef: Option<Clef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    pub beats: u32,
    pub beat_type: u32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature {
            beats: 4,
            beat_type: 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clef {
    pub sign: Option<String>,
    pub line: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Absent for rests and for notes without a readable `<pitch>`
    pub pitch: Option<Pitch>,
    /// In the measure's division units
    pub duration: u32,
    /// Rhythmic type label ("quarter", "half", ...)
    #[serde(rename = "type")]
    pub note_type: Option<String>,
    pub is_rest: bool,
}

impl Note {
    pub fn pitched(pitch: Pitch, duration: u32, note_type: Option<&str>) -> Self {
        Note {
            pitch: Some(pitch),
            duration,
            note_type: note_type.map(str::to_string),
            is_rest: false,
        }
    }

    pub fn rest(duration: u32, note_type: Option<&str>) -> Self {
        Note {
            pitch: None,
            duration,
            note_type: note_type.map(str::to_string),
            is_rest: true,
        }
    }
}
