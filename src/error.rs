//! Error taxonomy for literal extraction.
//!
//! Only I/O on the reference or output path aborts a run; the other variants
//! are recorded against a single occurrence and the run continues.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// A named input or output file could not be opened, read or written.
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The call-site could not be isolated into one left/right segment pair.
    #[error("line does not split into one left/right segment pair ({segments} segments)")]
    MalformedLine { segments: usize },

    /// The synthesized extraction pattern failed to compile.
    #[error("extraction pattern failed to compile: {0}")]
    PatternCompile(#[from] regex::Error),
}

impl ExtractError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
