//! Error types for dsatty
//!
//! Only a few conditions are real errors. Unrecognized lines, operations on an
//! empty model and out-of-range indices are absorbed where they happen so that a
//! completed run always has one snapshot per extracted operation.

use crate::parser::{DsaKind, Language};
use thiserror::Error;

/// Main error type for dsatty operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The declared language has no grammar for the detected data structure
    #[error("{language} has no grammar for {kind} operations")]
    UnsupportedLanguage { language: Language, kind: DsaKind },

    /// A language tag that does not name a supported language
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Playback speed multiplier that is zero, negative or not finite
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
