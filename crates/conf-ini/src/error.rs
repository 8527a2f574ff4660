//! Error types for conf-ini

use std::path::PathBuf;

/// Result type for conf-ini operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading sectioned text
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An option appeared before the first section header
    #[error("{origin}:{line}: option outside of any section: {text:?}")]
    MissingSectionHeader {
        origin: String,
        line: usize,
        text: String,
    },

    /// A line that is neither a header, an option, a comment nor a continuation
    #[error("{origin}:{line}: cannot parse line: {text:?}")]
    MalformedLine {
        origin: String,
        line: usize,
        text: String,
    },

    /// `%(name)s` references a key that does not exist
    #[error("[{section}] {key}: interpolation references missing option '{reference}'")]
    MissingReference {
        section: String,
        key: String,
        reference: String,
    },

    /// A `%` that is neither `%%` nor `%(name)s`
    #[error("[{section}] {key}: bad interpolation syntax near {fragment:?}")]
    InterpolationSyntax {
        section: String,
        key: String,
        fragment: String,
    },

    /// Interpolation nested too deeply, usually a reference cycle
    #[error("[{section}] {key}: interpolation exceeds depth {depth}")]
    InterpolationDepth {
        section: String,
        key: String,
        depth: usize,
    },

    /// A source file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// 1-based line number for errors tied to a specific line.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MissingSectionHeader { line, .. } | Error::MalformedLine { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}
