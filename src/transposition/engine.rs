//! Transposition of pitches and score models

use super::interval::Interval;
use crate::errors::Result;
use crate::models::key::key_to_fifths;
use crate::models::pitch::{Pitch, SpellingPolicy};
use crate::models::score::Score;

/// Spellings past a double sharp or double flat are respelled in the key
pub const MAX_ALTERATION: i32 = 2;

/// Transpose one pitch. The letter follows the interval; if that would
/// need more than a double accidental, the pitch is spelled against the
/// target key signature instead.
pub fn transpose_pitch(pitch: &Pitch, interval: &Interval, to_fifths: i32) -> Pitch {
    let shifted = interval.apply(pitch);
    if shifted.alter.abs() <= MAX_ALTERATION {
        return shifted;
    }

    let respelled =
        Pitch::from_chromatic_index(shifted.chromatic_index(), SpellingPolicy::Key(to_fifths));
    log::debug!("Respelled {} as {} ({} fifths)", shifted, respelled, to_fifths);
    respelled
}

/// Transposed copy of a score. Key signatures are set to `to_key`; rests
/// and pitch-less notes are untouched.
pub fn transpose_score(score: &Score, from_key: &str, to_key: &str) -> Result<Score> {
    if from_key == to_key {
        return Ok(score.clone());
    }

    let interval = Interval::between(from_key, to_key)?;
    let fifths = key_to_fifths(to_key);

    let mut transposed = score.clone();
    for measure in transposed.parts.iter_mut().flat_map(|part| &mut part.measures) {
        if let Some(key) = measure
            .attributes
            .as_mut()
            .and_then(|attributes| attributes.key.as_mut())
        {
            key.fifths = fifths;
        }

        for note in measure.notes.iter_mut().filter(|note| !note.is_rest) {
            if let Some(pitch) = note.pitch.as_mut() {
                *pitch = transpose_pitch(pitch, &interval, fifths);
            }
        }
    }

    Ok(transposed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitch::Step;
    use crate::models::score::{Attributes, Measure, Note, Part};
    use crate::models::KeySignature;

    fn one_measure_score(notes: Vec<Note>) -> Score {
        let mut measure = Measure::new(1);
        measure.attributes = Some(Attributes {
            key: Some(KeySignature::default()),
            ..Attributes::default()
        });
        measure.notes = notes;

        let mut score = Score::new("T", "C");
        score.parts.push(Part {
            id: "P1".to_string(),
            name: "Part 1".to_string(),
            measures: vec![measure],
        });
        score
    }

    #[test]
    fn test_transpose_pitch_respells_triple_sharps() {
        // F## up a chromatic semitone by letter would be F###
        let interval = Interval::between("C", "C#").unwrap();
        let pitch = Pitch::new(Step::F, 2, 4);
        let result = transpose_pitch(&pitch, &interval, 7);

        assert_eq!(result.chromatic_index(), pitch.chromatic_index() + 1);
        assert_eq!(result, Pitch::new(Step::G, 1, 4));

        // Double sharps that fit are kept
        let interval = Interval::between("C", "D").unwrap();
        assert_eq!(transpose_pitch(&pitch, &interval, 2), Pitch::new(Step::G, 2, 4));
    }

    #[test]
    fn test_transpose_score() {
        let score = one_measure_score(vec![
            Note::pitched(Pitch::new(Step::C, 0, 4), 4, Some("quarter")),
            Note::rest(4, Some("quarter")),
            Note::pitched(Pitch::new(Step::E, 0, 4), 4, Some("quarter")),
        ]);

        let transposed = transpose_score(&score, "C", "D").unwrap();
        let measure = &transposed.parts[0].measures[0];

        assert_eq!(measure.notes.len(), 3);
        assert_eq!(measure.notes[0].pitch, Some(Pitch::new(Step::D, 0, 4)));
        assert_eq!(measure.notes[1].pitch, None);
        assert!(measure.notes[1].is_rest);
        assert_eq!(measure.notes[2].pitch, Some(Pitch::new(Step::F, 1, 4)));
        assert_eq!(measure.attributes.as_ref().unwrap().key.unwrap().fifths, 2);

        // The input is untouched
        assert_eq!(score.parts[0].measures[0].notes[0].pitch, Some(Pitch::new(Step::C, 0, 4)));
    }

    #[test]
    fn test_transpose_score_same_key_and_invalid_key() {
        let score = one_measure_score(vec![Note::pitched(Pitch::new(Step::G, 0, 3), 2, None)]);
        assert_eq!(transpose_score(&score, "G", "G").unwrap(), score);
        assert!(transpose_score(&score, "G", "Z").is_err());
    }
}
