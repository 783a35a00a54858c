//! Error types shared by the dataset, annotation and session modules

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read the song dataset or a prior annotation export.
///
/// A dataset load failure is fatal for the session: nothing can be labeled
/// until a readable dataset is opened.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column `{0}` is missing")]
    MissingColumn(String),

    #[error("the dataset contains no songs")]
    Empty,

    #[error("line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
}

/// Failure to produce the annotation export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing has been saved yet. Writing a header-only file could clobber a
    /// meaningful export, so no file is produced.
    #[error("no annotations have been saved yet, nothing to export")]
    EmptyStore,

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode annotations: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    /// Whether the failure should be surfaced as a warning rather than an error
    pub fn is_warning(&self) -> bool {
        matches!(self, ExportError::EmptyStore)
    }
}

/// Rejected label event from the presentation layer
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("image slot `{column}` is not part of the page for song `{song_id}`")]
    UnknownSlot { song_id: String, column: String },

    #[error("image `{0}` is missing, it cannot be labeled")]
    MediaUnavailable(String),
}
