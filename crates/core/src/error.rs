//! Error types shared across the plexus crates.

use thiserror::Error;

/// Errors produced by animation construction and rendering operations.
#[derive(Debug, Error)]
pub enum AnimationError {
    /// Width or height was zero, negative, or non-finite.
    #[error("invalid dimensions: width and height must be finite and positive")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The host could not supply surface dimensions before construction.
    #[error("dimension resolution failed: {0}")]
    Resolve(String),

    /// A snapshot or other file operation failed.
    #[error("i/o error: {0}")]
    Io(String),
}
