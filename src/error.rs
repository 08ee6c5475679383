use std::path::PathBuf;

use thiserror::Error;

/// Enum with all errors in this crate.
///
/// Malformed manifest rows are not errors; they are reported as
/// [`SkippedRecord`][crate::SkippedRecord] warnings alongside a successful result.
#[derive(Error, Debug)]
pub enum RouteTilesError {
    /// A tile or position source could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A result listing could not be written.
    #[error("cannot write {}: {source}", path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("buffer distance must be finite, got {0}")]
    InvalidBuffer(f64),

    #[error("node size must be at least 2, got {0}")]
    InvalidNodeSize(u16),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, RouteTilesError>;
