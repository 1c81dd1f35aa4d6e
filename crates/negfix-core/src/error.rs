//! Error type shared by every stage of the library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while configuring, decoding, processing or exporting.
#[derive(Debug, Error)]
pub enum NegfixError {
    /// Bad configuration: unknown profile, invalid exponent, bad options file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input that cannot be processed as given.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A computation whose result would be undefined (zero range, too few samples).
    #[error("Degenerate computation: {0}")]
    Degenerate(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("{context} '{}': {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NegfixError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NegfixError::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NegfixError>;
