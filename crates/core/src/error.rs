//! Error types for slide deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or writing a slide deck.
///
/// Malformed slide blocks are not represented here; the parser drops them
/// and reports a [`crate::parser::BlockError`] diagnostic instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    /// The text producer failed (HTTP status, transport, or response shape).
    #[error("Content generation failed: {0}")]
    Producer(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// A PPTX package is missing expected parts.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),
}
