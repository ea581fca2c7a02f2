//! MusicXML writer
//!
//! Serializes a [`Score`] back to a `score-partwise` 3.1 document with
//! quick-xml. Only the elements the model carries are written.

use crate::errors::{Result, ScoreError};
use crate::models::score::{Attributes, Measure, Note, Part, Score};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

type XmlWriter = Writer<Vec<u8>>;

/// Serialize a score to MusicXML text
pub fn write_musicxml(score: &Score) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_score(&mut writer, score).map_err(|e| ScoreError::Write(e.to_string()))?;

    String::from_utf8(writer.into_inner()).map_err(|e| ScoreError::Write(e.to_string()))
}

fn write_score(w: &mut XmlWriter, score: &Score) -> quick_xml::Result<()> {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    w.create_element("score-partwise")
        .with_attribute(("version", "3.1"))
        .write_inner_content(|w| {
            w.create_element("work")
                .write_inner_content(|w| text_element(w, "work-title", &score.title))?;

            w.create_element("identification").write_inner_content(|w| {
                w.create_element("creator")
                    .with_attribute(("type", "composer"))
                    .write_text_content(BytesText::new(&score.composer))?;
                Ok::<(), quick_xml::Error>(())
            })?;

            w.create_element("part-list").write_inner_content(|w| {
                for part in &score.parts {
                    w.create_element("score-part")
                        .with_attribute(("id", part.id.as_str()))
                        .write_inner_content(|w| text_element(w, "part-name", &part.name))?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;

            for part in &score.parts {
                write_part(w, part)?;
            }
            Ok::<(), quick_xml::Error>(())
        })?;

    Ok(())
}

fn write_part(w: &mut XmlWriter, part: &Part) -> quick_xml::Result<()> {
    w.create_element("part")
        .with_attribute(("id", part.id.as_str()))
        .write_inner_content(|w| {
            for measure in &part.measures {
                write_measure(w, measure)?;
            }
            Ok::<(), quick_xml::Error>(())
        })?;
    Ok(())
}

fn write_measure(w: &mut XmlWriter, measure: &Measure) -> quick_xml::Result<()> {
    let number = measure.number.to_string();
    w.create_element("measure")
        .with_attribute(("number", number.as_str()))
        .write_inner_content(|w| {
            if let Some(attributes) = &measure.attributes {
                write_attributes(w, attributes)?;
            }
            for note in &measure.notes {
                write_note(w, note)?;
            }
            Ok::<(), quick_xml::Error>(())
        })?;
    Ok(())
}

fn write_attributes(w: &mut XmlWriter, attributes: &Attributes) -> quick_xml::Result<()> {
    w.create_element("attributes").write_inner_content(|w| {
        if let Some(divisions) = attributes.divisions {
            text_element(w, "divisions", &divisions.to_string())?;
        }
        if let Some(key) = attributes.key {
            w.create_element("key").write_inner_content(|w| {
                text_element(w, "fifths", &key.fifths.to_string())?;
                text_element(w, "mode", key.mode.as_str())
            })?;
        }
        if let Some(time) = attributes.time {
            w.create_element("time").write_inner_content(|w| {
                text_element(w, "beats", &time.beats.to_string())?;
                text_element(w, "beat-type", &time.beat_type.to_string())
            })?;
        }
        if let Some(clef) = &attributes.clef {
            w.create_element("clef").write_inner_content(|w| {
                if let Some(sign) = &clef.sign {
                    text_element(w, "sign", sign)?;
                }
                if let Some(line) = clef.line {
                    text_element(w, "line", &line.to_string())?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;
        }
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

fn write_note(w: &mut XmlWriter, note: &Note) -> quick_xml::Result<()> {
    w.create_element("note").write_inner_content(|w| {
        if note.is_rest {
            w.create_element("rest").write_empty()?;
        } else if let Some(pitch) = note.pitch {
            w.create_element("pitch").write_inner_content(|w| {
                text_element(w, "step", pitch.step.as_str())?;
                // A zero alteration is never written
                if pitch.alter != 0 {
                    text_element(w, "alter", &pitch.alter.to_string())?;
                }
                text_element(w, "octave", &pitch.octave.to_string())
            })?;
        }
        text_element(w, "duration", &note.duration.to_string())?;
        if let Some(note_type) = &note.note_type {
            text_element(w, "type", note_type)?;
        }
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

fn text_element(w: &mut XmlWriter, name: &str, text: &str) -> quick_xml::Result<()> {
    w.create_element(name).write_text_content(BytesText::new(text))?;
    Ok(())
}
