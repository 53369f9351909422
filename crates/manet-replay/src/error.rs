//! Error types for fixture reading and writing.

use std::fmt;
use std::io;

/// Errors that can occur while reading or writing a positions fixture.
#[derive(Debug)]
pub enum ReplayError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The fixture does not start with the expected header line.
    InvalidHeader {
        /// The first line found.
        found: String,
    },
    /// A position line could not be decoded.
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidHeader { found } => {
                write!(f, "invalid fixture header {found:?}")
            }
            Self::MalformedLine { line, detail } => {
                write!(f, "malformed fixture line {line}: {detail}")
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
