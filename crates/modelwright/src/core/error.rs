//! Core error types for model translation
//!
//! Translation itself never fails on malformed diagram text. The only errors
//! are caller-side input rejection and failures in the surrounding I/O.

use thiserror::Error;

/// Errors surfaced around the translation pipeline
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Empty input: diagram text must contain at least one non-whitespace character")]
    EmptyInput,

    #[error("Emit error: {message}")]
    EmitError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ModelError {
    /// Create a new emit error
    pub fn emit_error(message: String) -> Self {
        Self::EmitError { message }
    }

    /// Reject `input` if it is empty or only whitespace
    pub fn reject_blank(input: &str) -> Result<(), Self> {
        if input.trim().is_empty() {
            Err(Self::EmptyInput)
        } else {
            Ok(())
        }
    }
}
