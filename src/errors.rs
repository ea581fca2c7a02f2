//! Error types for score processing
//!
//! Every fallible operation in the crate returns [`ScoreError`]. Missing
//! measure numbers, missing alterations, unmapped key names and unmapped
//! solfège spellings are not errors: those fall back to documented defaults.

use thiserror::Error;

/// Top-level error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Pitch-class text could not be read (e.g. "H", "C#b", "")
    #[error("Invalid pitch spelling: '{0}'")]
    InvalidSpelling(String),

    /// Document is not well-formed XML or lacks the `score-partwise` root
    #[error("Malformed MusicXML document: {0}")]
    MalformedDocument(String),

    /// Key name cannot be resolved to a tonic
    #[error("Invalid key name: '{0}'")]
    InvalidKey(String),

    /// XML writer failure
    #[error("MusicXML write failed: {0}")]
    Write(String),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
