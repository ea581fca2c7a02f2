//! Transposition of MusicXML text
//!
//! The source is parsed read-only with roxmltree. Each pitch and key
//! signature that has to change becomes an [`Edit`] over a byte range of
//! the source, and the output is assembled from the untouched spans plus
//! the replacements. Nothing is returned unless every step succeeds, and
//! everything outside the edited elements comes through byte for byte.

use super::engine::transpose_pitch;
use super::interval::Interval;
use crate::converters::musicxml::parser::{child, parse_document, read_pitch, score_root};
use crate::errors::Result;
use crate::models::key::key_to_fifths;
use roxmltree::Node;
use std::ops::Range;

/// Replace `range` of the source with `text` (an empty range inserts)
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Transpose every pitch of a MusicXML document from one key to another
/// and set every `key/fifths` to the target key's signature.
///
/// Identical key names return the input unchanged.
pub fn transpose(xml: &str, from_key: &str, to_key: &str) -> Result<String> {
    if from_key == to_key {
        return Ok(xml.to_string());
    }

    let interval = Interval::between(from_key, to_key)?;
    let fifths = key_to_fifths(to_key);
    log::info!(
        "Transposing {} → {} ({} semitones)",
        from_key,
        to_key,
        interval.semitones
    );

    let doc = parse_document(xml)?;
    let root = score_root(&doc)?;

    let mut edits = Vec::new();
    for node in root.descendants().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "note" => plan_note(node, &interval, fifths, &mut edits),
            "key" => {
                if let Some(fifths_node) = child(node, "fifths") {
                    edits.push(replace_text(fifths_node, &fifths.to_string()));
                }
            }
            _ => {}
        }
    }

    log::debug!("Applying {} edit(s)", edits.len());
    Ok(apply_edits(xml, edits))
}

fn plan_note(note: Node, interval: &Interval, fifths: i32, edits: &mut Vec<Edit>) {
    if child(note, "rest").is_some() {
        return;
    }
    let Some(pitch_node) = child(note, "pitch") else {
        return;
    };
    let (Some(pitch), Some(step), Some(octave)) = (
        read_pitch(pitch_node),
        child(pitch_node, "step"),
        child(pitch_node, "octave"),
    ) else {
        log::warn!(
            "Leaving unreadable <pitch> at byte {} untransposed",
            pitch_node.range().start
        );
        return;
    };

    let new_pitch = transpose_pitch(&pitch, interval, fifths);

    edits.push(replace_text(step, new_pitch.step.as_str()));

    match (child(pitch_node, "alter"), new_pitch.alter) {
        (Some(alter), 0) => edits.push(remove_element(alter)),
        (Some(alter), value) => edits.push(replace_text(alter, &value.to_string())),
        (None, 0) => {}
        (None, value) => {
            // Goes right before <octave>, on its own line when the source is indented
            let at = octave.range().start;
            edits.push(Edit {
                range: at..at,
                text: format!("<alter>{}</alter>{}", value, indent_before(octave)),
            });
        }
    }

    edits.push(replace_text(octave, &new_pitch.octave.to_string()));
}

/// Replace an element's text, or the whole element if it has none
fn replace_text(element: Node, text: &str) -> Edit {
    match element.first_child().filter(|n| n.is_text()) {
        Some(text_node) => Edit {
            range: text_node.range(),
            text: text.to_string(),
        },
        None => {
            let name = element.tag_name().name();
            Edit {
                range: element.range(),
                text: format!("<{name}>{text}</{name}>"),
            }
        }
    }
}

/// Remove an element together with the indentation in front of it
fn remove_element(element: Node) -> Edit {
    let start = element
        .prev_sibling()
        .filter(|n| is_whitespace_text(*n))
        .map(|n| n.range().start)
        .unwrap_or(element.range().start);

    Edit {
        range: start..element.range().end,
        text: String::new(),
    }
}

fn indent_before<'a>(element: Node<'a, '_>) -> &'a str {
    element
        .prev_sibling()
        .filter(|n| is_whitespace_text(*n))
        .and_then(|n| n.text())
        .unwrap_or("")
}

fn is_whitespace_text(node: Node) -> bool {
    node.is_text() && node.text().map_or(false, |t| t.trim().is_empty())
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| edit.range.start);

    let mut out = String::with_capacity(source.len() + edits.len() * 16);
    let mut cursor = 0;
    for edit in edits {
        debug_assert!(edit.range.start >= cursor, "overlapping edits at {:?}", edit.range);
        out.push_str(&source[cursor..edit.range.start]);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::musicxml::parse_musicxml;
    use crate::errors::ScoreError;

    const HYMN: &str = include_str!("../../tests/fixtures/hymn.musicxml");

    fn pitch_names(xml: &str) -> Vec<String> {
        parse_musicxml(xml)
            .unwrap()
            .parts
            .iter()
            .flat_map(|p| &p.measures)
            .flat_map(|m| &m.notes)
            .filter_map(|n| n.pitch.map(|p| p.to_string()))
            .collect()
    }

    #[test]
    fn test_same_key_is_identity() {
        assert_eq!(transpose(HYMN, "C", "C").unwrap(), HYMN);
        // Short-circuits before parsing
        assert_eq!(transpose("not xml", "G", "G").unwrap(), "not xml");
    }

    #[test]
    fn test_c_to_d() {
        let out = transpose(HYMN, "C", "D").unwrap();

        assert_eq!(
            pitch_names(&out),
            [
                "D4", "F#4", "A4", "D5", "C#5", "B4", "A4", "F#4", "G4", "A4", "B4", "A4", "D4"
            ]
        );
        assert!(out.contains(
            "<step>F</step>\n          <alter>1</alter>\n          <octave>4</octave>"
        ));
        assert!(out.contains("<fifths>2</fifths>"));
        assert!(!out.contains("<fifths>0</fifths>"));
        // Untouched parts of the document survive
        assert!(out.contains("<bar-style>light-heavy</bar-style>"));
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE"));
    }

    #[test]
    fn test_alter_removed_when_natural() {
        let xml = r#"<score-partwise>
  <part id="P1">
    <measure number="1">
      <attributes><key><fifths>2</fifths></key></attributes>
      <note>
        <pitch>
          <step>F</step>
          <alter>1</alter>
          <octave>4</octave>
        </pitch>
      </note>
      <note><pitch><step>C</step><alter>1</alter><octave>5</octave></pitch></note>
    </measure>
  </part>
</score-partwise>"#;

        let out = transpose(xml, "D", "C").unwrap();
        assert!(!out.contains("<alter>"));
        assert!(out.contains("<pitch>\n          <step>E</step>\n          <octave>4</octave>"));
        assert!(out.contains("<pitch><step>B</step><octave>4</octave></pitch>"));
        assert!(out.contains("<fifths>0</fifths>"));
    }

    #[test]
    fn test_existing_alter_is_updated() {
        let xml = r#"<score-partwise><part id="P1"><measure number="1">
<note><pitch><step>B</step><alter>-1</alter><octave>3</octave></pitch></note>
</measure></part></score-partwise>"#;

        let out = transpose(xml, "F", "Eb").unwrap();
        assert!(out.contains("<step>A</step><alter>-1</alter><octave>3</octave>"));
    }

    #[test]
    fn test_inline_alter_insertion() {
        let xml = r#"<score-partwise><part id="P1"><measure number="1">
<note><pitch><step>E</step><octave>4</octave></pitch></note>
</measure></part></score-partwise>"#;

        let out = transpose(xml, "C", "A").unwrap();
        assert!(out.contains("<pitch><step>C</step><alter>1</alter><octave>5</octave></pitch>"));
    }

    #[test]
    fn test_rests_and_unreadable_pitches_untouched() {
        let xml = r#"<score-partwise><part id="P1"><measure number="1">
<note><rest/><duration>4</duration></note>
<note><pitch><step>C</step></pitch></note>
<note><unpitched><display-step>C</display-step><display-octave>4</display-octave></unpitched></note>
</measure></part></score-partwise>"#;

        assert_eq!(transpose(xml, "C", "G").unwrap(), xml);
    }

    #[test]
    fn test_out_of_range_pitches_left_alone() {
        let xml = r#"<score-partwise><part id="P1"><measure number="1">
<note><pitch><step>C</step><octave>200000000</octave></pitch></note>
<note><pitch><step>C</step><alter>2147483647</alter><octave>4</octave></pitch></note>
<note><pitch><step>C</step><octave>4</octave></pitch></note>
</measure></part></score-partwise>"#;

        let out = transpose(xml, "C", "D").unwrap();
        assert!(out.contains("<step>C</step><octave>200000000</octave>"));
        assert!(out.contains("<step>C</step><alter>2147483647</alter><octave>4</octave>"));
        assert!(out.contains("<step>D</step><octave>4</octave>"));
    }

    #[test]
    fn test_empty_fifths_element_is_filled() {
        let xml = r#"<score-partwise><part id="P1"><measure number="1">
<attributes><key><fifths/></key></attributes>
</measure></part></score-partwise>"#;

        let out = transpose(xml, "C", "Bb").unwrap();
        assert!(out.contains("<key><fifths>-2</fifths></key>"));
    }

    #[test]
    fn test_round_trip_restores_sounding_pitches() {
        let original = parse_musicxml(HYMN).unwrap();
        for (from, to) in [("C", "D"), ("C", "F#"), ("C", "Gb"), ("C", "B"), ("C", "Eb")] {
            let there = transpose(HYMN, from, to).unwrap();
            let back = parse_musicxml(&transpose(&there, to, from).unwrap()).unwrap();

            let indices = |score: &crate::models::Score| -> Vec<i32> {
                score
                    .parts
                    .iter()
                    .flat_map(|p| &p.measures)
                    .flat_map(|m| &m.notes)
                    .filter_map(|n| n.pitch.map(|p| p.chromatic_index()))
                    .collect()
            };
            assert_eq!(indices(&back), indices(&original), "{from} → {to} → {from}");
        }
    }

    #[test]
    fn test_failures_return_no_output() {
        assert_eq!(
            transpose(HYMN, "C", "K"),
            Err(ScoreError::InvalidKey("K".to_string()))
        );
        assert!(matches!(
            transpose("<score-timewise/>", "C", "D"),
            Err(ScoreError::MalformedDocument(_))
        ));
        assert!(matches!(
            transpose("<score-partwise>", "C", "D"),
            Err(ScoreError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_unknown_target_signature_falls_back_to_zero() {
        // E# resolves to a tonic but has no signature of its own
        let out = transpose(HYMN, "C", "E#").unwrap();
        assert!(out.contains("<fifths>0</fifths>"));
        assert_eq!(pitch_names(&out)[0], "E#4");
    }

    #[test]
    fn test_apply_edits() {
        let edits = vec![
            Edit { range: 5..6, text: "Z".to_string() },
            Edit { range: 0..0, text: ">".to_string() },
            Edit { range: 2..4, text: String::new() },
        ];
        assert_eq!(apply_edits("abcdefg", edits), ">abeZg");
    }
}
