//! Error types for a README update run

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors that stop an entity or the whole run.
///
/// Per-entity data problems are not errors, see [`crate::source::Unavailable`].
#[derive(Error, Debug)]
pub enum UpdateError {
    /// A template resource could not be read. Aborts the run.
    #[error("Template missing: {path:?}: {source}")]
    TemplateMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written
    #[error("Failed to write {path:?}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
