// Solfège annotation of parsed documents

use solfege_wasm::solfege::{annotate_musicxml, annotate_score, SolfegeMode};
use solfege_wasm::{parse_musicxml, ScoreError, SolfegeSettings, SyllableStyle};

const HYMN: &str = include_str!("fixtures/hymn.musicxml");

#[test]
fn test_hymn_fixed_do() {
    let annotations = annotate_musicxml(HYMN, "C", SolfegeMode::Fixed).unwrap();
    assert_eq!(annotations.len(), 13);

    let first: Vec<&str> = annotations[..4].iter().map(|a| a.syllable.as_str()).collect();
    assert_eq!(first, ["도", "미", "솔", "도"]);

    let last = annotations.last().unwrap();
    assert_eq!(last.measure_number, 4);
    assert_eq!(last.note_index, 1);
    assert_eq!(last.pitch_name, "C4");
}

#[test]
fn test_rests_are_skipped_but_counted() {
    let xml = r#"<score-partwise><part id="P1"><measure number="7">
<note><rest/><duration>2</duration></note>
<note><pitch><step>D</step><alter>1</alter><octave>4</octave></pitch><duration>2</duration></note>
</measure></part></score-partwise>"#;

    let annotations = annotate_musicxml(xml, "C", SolfegeMode::Fixed).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].measure_number, 7);
    assert_eq!(annotations[0].note_index, 1);
    assert_eq!(annotations[0].syllable, "레#");
}

#[test]
fn test_settings_drive_annotation() {
    let score = parse_musicxml(HYMN).unwrap();
    let settings = SolfegeSettings {
        key: "G".to_string(),
        mode: SolfegeMode::Movable,
        style: SyllableStyle::Latin,
    };

    let annotations = settings.annotate(&score);
    // G4 is do in G; C is fa
    assert_eq!(annotations[2].syllable, "do");
    assert_eq!(annotations[0].syllable, "fa");
    assert_eq!(annotate_score(&score, "G", SolfegeMode::Movable)[0].syllable, "파");
}

#[test]
fn test_absurd_alterations_are_not_annotated() {
    let xml = r#"<score-partwise><part id="P1"><measure number="1">
<note><pitch><step>C</step><alter>300000000</alter><octave>4</octave></pitch></note>
<note><pitch><step>C</step><alter>-2147483648</alter><octave>4</octave></pitch></note>
<note><pitch><step>G</step><octave>4</octave></pitch></note>
</measure></part></score-partwise>"#;

    let annotations = annotate_musicxml(xml, "C", SolfegeMode::Fixed).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].note_index, 2);
    assert_eq!(annotations[0].pitch_name, "G4");
}

#[test]
fn test_malformed_document() {
    assert!(matches!(
        annotate_musicxml("<opus/>", "C", SolfegeMode::Fixed),
        Err(ScoreError::MalformedDocument(_))
    ));
}

#[test]
fn test_annotations_serialize_for_js() {
    let annotations = annotate_musicxml(HYMN, "C", SolfegeMode::Fixed).unwrap();
    let json = serde_json::to_value(&annotations[1]).unwrap();

    assert_eq!(json["measureNumber"], 1);
    assert_eq!(json["noteIndex"], 1);
    assert_eq!(json["pitchName"], "E4");
    assert_eq!(json["syllable"], "미");
    assert_eq!(json["step"], "E");
    assert_eq!(json["octave"], 4);
}
