//! Error types for sailtree

use thiserror::Error;

/// Main error type for sailtree operations
///
/// Grammatical problems in a template are never errors: the parser always
/// produces a tree covering the whole input and marks damaged nodes. This
/// enum covers the ambient failures around the parser instead.
#[derive(Error, Debug)]
pub enum SailtreeError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output formatting or serialization error
    #[error("Format error: {0}")]
    Format(String),
}

/// Result type alias for sailtree operations
pub type Result<T> = std::result::Result<T, SailtreeError>;
