//! Static solfège tables
//!
//! Fixed-do: spelling → syllable, C is always do.
//! Movable-do: tonic → spelling → syllable, the tonic is always do.

use super::Syllable;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The 17 conventional spellings: naturals, single sharps, single flats
const FIXED_DO: [(&str, Syllable); 17] = [
    ("C", Syllable::new(1, 0)),
    ("C#", Syllable::new(1, 1)),
    ("Db", Syllable::new(2, -1)),
    ("D", Syllable::new(2, 0)),
    ("D#", Syllable::new(2, 1)),
    ("Eb", Syllable::new(3, -1)),
    ("E", Syllable::new(3, 0)),
    ("F", Syllable::new(4, 0)),
    ("F#", Syllable::new(4, 1)),
    ("Gb", Syllable::new(5, -1)),
    ("G", Syllable::new(5, 0)),
    ("G#", Syllable::new(5, 1)),
    ("Ab", Syllable::new(6, -1)),
    ("A", Syllable::new(6, 0)),
    ("A#", Syllable::new(6, 1)),
    ("Bb", Syllable::new(7, -1)),
    ("B", Syllable::new(7, 0)),
];

/// Major scale spellings, degrees 1-7, for every supported tonic
pub(crate) const MAJOR_SCALES: [(&str, [&str; 7]); 18] = [
    ("C", ["C", "D", "E", "F", "G", "A", "B"]),
    ("C#", ["C#", "D#", "E#", "F#", "G#", "A#", "B#"]),
    ("Db", ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"]),
    ("D", ["D", "E", "F#", "G", "A", "B", "C#"]),
    ("D#", ["D#", "E#", "F##", "G#", "A#", "B#", "C##"]),
    ("Eb", ["Eb", "F", "G", "Ab", "Bb", "C", "D"]),
    ("E", ["E", "F#", "G#", "A", "B", "C#", "D#"]),
    ("F", ["F", "G", "A", "Bb", "C", "D", "E"]),
    ("F#", ["F#", "G#", "A#", "B", "C#", "D#", "E#"]),
    ("Gb", ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]),
    ("G", ["G", "A", "B", "C", "D", "E", "F#"]),
    ("G#", ["G#", "A#", "B#", "C#", "D#", "E#", "F##"]),
    ("Ab", ["Ab", "Bb", "C", "Db", "Eb", "F", "G"]),
    ("A", ["A", "B", "C#", "D", "E", "F#", "G#"]),
    ("A#", ["A#", "B#", "C##", "D#", "E#", "F##", "G##"]),
    ("Bb", ["Bb", "C", "D", "Eb", "F", "G", "A"]),
    ("B", ["B", "C#", "D#", "E", "F#", "G#", "A#"]),
    ("Cb", ["Cb", "Db", "Eb", "Fb", "Gb", "Ab", "Bb"]),
];

pub(crate) static FIXED_DO_MAP: Lazy<HashMap<&'static str, Syllable>> =
    Lazy::new(|| FIXED_DO.into_iter().collect());

pub(crate) static MOVABLE_DO_MAP: Lazy<HashMap<&'static str, HashMap<&'static str, Syllable>>> =
    Lazy::new(|| {
        MAJOR_SCALES
            .iter()
            .map(|(tonic, scale)| {
                let degrees = scale
                    .iter()
                    .enumerate()
                    .map(|(i, spelling)| (*spelling, Syllable::new(i as u8 + 1, 0)))
                    .collect();
                (*tonic, degrees)
            })
            .collect()
    });
