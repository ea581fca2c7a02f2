//! MusicXML parser implementation
//!
//! Converts `score-partwise` documents into the [`Score`] model using
//! roxmltree. Optional sub-elements are tolerated; only an unreadable
//! document or a missing root fails the parse.

use crate::errors::{Result, ScoreError};
use crate::models::key::{KeySignature, Mode};
use crate::models::pitch::{Pitch, Step};
use crate::models::score::{
    Attributes, Clef, Measure, Note, Part, Score, TimeSignature, DEFAULT_TITLE, UNKNOWN_COMPOSER,
};
use roxmltree::{Document, Node, ParsingOptions};

/// Parse a MusicXML string into a [`Score`]
///
/// # Example
///
/// ```
/// let musicxml = r#"<?xml version="1.0"?>
/// <score-partwise version="3.1">
///   <part id="P1">
///     <measure number="1">
///       <note><pitch><step>C</step><octave>4</octave></pitch><duration>4</duration></note>
///     </measure>
///   </part>
/// </score-partwise>"#;
///
/// let score = solfege_wasm::parse_musicxml(musicxml).unwrap();
/// assert_eq!(score.parts[0].measures[0].notes.len(), 1);
/// ```
pub fn parse_musicxml(xml: &str) -> Result<Score> {
    let doc = parse_document(xml)?;
    let root = score_root(&doc)?;

    let mut score = Score::new(extract_title(root), extract_composer(root));
    score.parts = extract_parts(root);

    log::debug!(
        "Parsed score '{}': {} part(s), {} note(s)",
        score.title,
        score.parts.len(),
        score.note_count()
    );

    Ok(score)
}

/// Parse XML text, accepting the DOCTYPE line MusicXML files carry
pub(crate) fn parse_document(xml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(xml, options)
        .map_err(|e| ScoreError::MalformedDocument(format!("XML parse error: {}", e)))
}

/// The `<score-partwise>` root element
pub(crate) fn score_root<'a, 'input>(doc: &'a Document<'input>) -> Result<Node<'a, 'input>> {
    let root = doc.root_element();
    if root.tag_name().name() != "score-partwise" {
        return Err(ScoreError::MalformedDocument(format!(
            "Expected <score-partwise>, found <{}>",
            root.tag_name().name()
        )));
    }
    Ok(root)
}

/// First child element with the given tag name
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

pub(crate) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed, non-empty text of the first child element `name`
pub(crate) fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Integer prefix of `text`, the way `parseInt` reads it ("12a" → 12,
/// "-1.5" → -1, "abc" → None)
pub(crate) fn leading_int(text: &str) -> Option<i32> {
    let text = text.trim();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

fn child_int(node: Node, name: &str) -> Option<i32> {
    child_text(node, name).and_then(leading_int)
}

/// Read `<pitch>`; `None` when step or octave is missing or unreadable, or
/// when octave or alteration is out of range
pub(crate) fn read_pitch(pitch_node: Node) -> Option<Pitch> {
    let step_text = child_text(pitch_node, "step")?;
    let mut chars = step_text.chars();
    let step = chars.next().and_then(Step::from_char)?;
    if chars.next().is_some() {
        return None;
    }

    let alter = child_int(pitch_node, "alter").unwrap_or(0);
    let octave = child_int(pitch_node, "octave")?;

    let pitch = Pitch::new(step, alter, octave);
    if !pitch.is_in_range() {
        log::warn!("Pitch out of range: alter {}, octave {}", alter, octave);
        return None;
    }
    Some(pitch)
}

fn extract_title(score: Node) -> String {
    child(score, "work")
        .and_then(|work| child_text(work, "work-title"))
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

fn extract_composer(score: Node) -> String {
    let creators: Vec<Node> = child(score, "identification")
        .map(|identification| children(identification, "creator").collect())
        .unwrap_or_default();

    // type="composer" first, then any creator
    creators
        .iter()
        .filter(|creator| creator.attribute("type") == Some("composer"))
        .find_map(node_text)
        .or_else(|| creators.first().and_then(node_text))
        .unwrap_or(UNKNOWN_COMPOSER)
        .to_string()
}

fn node_text<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|text| !text.is_empty())
}

fn part_name(score: Node, part_id: &str) -> Option<String> {
    score
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "score-part")
        .find(|n| n.attribute("id") == Some(part_id))
        .and_then(|n| child_text(n, "part-name"))
        .map(str::to_string)
}

fn extract_parts(score: Node) -> Vec<Part> {
    children(score, "part")
        .enumerate()
        .map(|(index, part_node)| {
            let id = part_node
                .attribute("id")
                .map(str::to_string)
                .unwrap_or_else(|| format!("P{}", index + 1));
            let name = part_name(score, &id).unwrap_or_else(|| format!("Part {}", index + 1));
            let measures = children(part_node, "measure").map(parse_measure).collect();

            Part { id, name, measures }
        })
        .collect()
}

fn parse_measure(measure_node: Node) -> Measure {
    let number = measure_node
        .attribute("number")
        .and_then(leading_int)
        .unwrap_or(0);

    Measure {
        number,
        attributes: child(measure_node, "attributes").map(parse_attributes),
        notes: children(measure_node, "note").map(parse_note).collect(),
    }
}

fn parse_attributes(attributes: Node) -> Attributes {
    let divisions = child_int(attributes, "divisions").and_then(|d| u32::try_from(d).ok());

    let key = child(attributes, "key").map(|key| {
        let raw = child_int(key, "fifths").unwrap_or(0);
        let fifths = raw.clamp(-7, 7);
        if fifths != raw {
            log::warn!("Key fifths {} out of range, clamped to {}", raw, fifths);
        }
        let mode = child_text(key, "mode")
            .and_then(|m| m.parse::<Mode>().ok())
            .unwrap_or_default();
        KeySignature::new(fifths, mode)
    });

    let time = child(attributes, "time").map(|time| {
        let positive = |name| {
            child_int(time, name)
                .filter(|v| *v > 0)
                .map(|v| v as u32)
                .unwrap_or(4)
        };
        TimeSignature {
            beats: positive("beats"),
            beat_type: positive("beat-type"),
        }
    });

    let clef = child(attributes, "clef").map(|clef| Clef {
        sign: child_text(clef, "sign").map(str::to_string),
        line: child_int(clef, "line"),
    });

    Attributes {
        divisions,
        key,
        time,
        clef,
    }
}

fn parse_note(note_node: Node) -> Note {
    let is_rest = child(note_node, "rest").is_some();

    let pitch = if is_rest {
        None
    } else {
        child(note_node, "pitch").and_then(|pitch_node| {
            let pitch = read_pitch(pitch_node);
            if pitch.is_none() {
                log::warn!("Skipping unreadable <pitch> at byte {}", pitch_node.range().start);
            }
            pitch
        })
    };

    let duration = child_int(note_node, "duration")
        .and_then(|d| u32::try_from(d).ok())
        .unwrap_or(0);

    Note {
        pitch,
        duration,
        note_type: child_text(note_node, "type").map(str::to_string),
        is_rest,
    }
}
