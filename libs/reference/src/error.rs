//! Error types for digest validation.

use thiserror::Error;

/// Errors that can occur when validating an image digest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// The digest has the wrong length.
    #[error("digest must be 64 hex characters, got {actual}")]
    Length { actual: usize },

    /// The digest contains characters outside lowercase hex.
    #[error("digest must be lowercase hex")]
    Alphabet,
}
