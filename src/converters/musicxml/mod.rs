//! MusicXML reading and writing
//!
//! ```text
//! MusicXML String
//!   ↓ [parser: roxmltree]
//! Score (Score → Part → Measure → Note)
//!   ↓ [writer: quick-xml]
//! MusicXML String
//! ```
//!
//! Only `score-partwise` documents are supported. The parser tolerates
//! missing optional elements and fails only when the document is not XML or
//! the root element is wrong.

pub mod parser;
pub mod writer;

pub use parser::parse_musicxml;
pub use writer::write_musicxml;
