//! Format converters
//!
//! This module contains converters between MusicXML text and the score model.

pub mod musicxml;

pub use musicxml::{parse_musicxml, write_musicxml};
