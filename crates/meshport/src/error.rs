//! Error types for Meshport operations.
//!
//! This module provides the main error type [`MeshportError`] which wraps
//! the error conditions that can occur while converting a mesh.

use std::{io, path::PathBuf};

use thiserror::Error;

use meshport_parser::ParseError;

/// The main error type for Meshport operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the parser diagnostics
/// so that callers can render the offending lines.
#[derive(Debug, Error)]
pub enum MeshportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MeshportError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
