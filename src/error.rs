//! Error types for diagram output operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed underlying cause for conversion failures.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Syntax failure reported by the dot parser.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DotSyntaxError(pub String);

/// Errors produced while converting or writing diagram files.
///
/// Both variants preserve the originating failure as a source so callers
/// can walk the [`std::error::Error::source`] chain.
#[derive(Debug, Error)]
pub enum WriterError {
    /// The dot renderer or the SVG rasterizer failed.
    #[error("failed to convert {what}")]
    Conversion {
        what: String,
        #[source]
        source: Cause,
    },

    /// A filesystem operation failed (write, or stat during path resolution).
    #[error("failed to write {what} to {}", path.display())]
    Write {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriterError {
    pub(crate) fn conversion(what: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self::Conversion {
            what: what.into(),
            source: source.into(),
        }
    }

    pub(crate) fn write(what: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            what,
            path: path.into(),
            source,
        }
    }
}
