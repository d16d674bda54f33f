//! Error types for tour parsing and validation.

use tourdoc_storage::StorageError;

/// Error type for tour parsing.
///
/// Any of these aborts the whole parse; no partial tour is returned.
#[derive(Debug, thiserror::Error)]
pub enum TourError {
    /// The content root could not be listed.
    #[error("Failed to read tour directory: {0}")]
    ReadRoot(#[source] StorageError),
    /// A chapter document could not be read.
    #[error("Failed to read chapter {name}: {source}")]
    ReadChapter {
        /// Chapter file name.
        name: String,
        /// Underlying storage error.
        source: StorageError,
    },
}

/// A lesson that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The lesson references no template file.
    #[error("lesson \"{lesson}\" in chapter \"{chapter}\" has no .vuego template file")]
    MissingTemplate {
        /// Lesson title.
        lesson: String,
        /// Chapter name.
        chapter: String,
    },
}
