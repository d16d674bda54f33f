//! Filesystem content implementation.
//!
//! Provides [`FsContent`] for reading a content tree from the local filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{ContentFs, DirEntry, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem content tree rooted at a directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use tourdoc_storage::{ContentFs, FsContent};
///
/// let content = FsContent::new(PathBuf::from("tour"));
/// let entries = content.list_dir(".")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsContent {
    /// Root directory of the content tree.
    root: PathBuf,
}

impl FsContent {
    /// Create a content tree rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the content tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path doesn't escape the content root.
    ///
    /// Rejects paths containing parent directory components (`..`) or
    /// absolute roots.
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Map a content path to a filesystem path under the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        Self::validate_path(relative)?;
        Ok(self.root.join(relative))
    }
}

impl ContentFs for FsContent {
    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, StorageError> {
        let dir = self.resolve(path)?;
        let read_dir = fs::read_dir(&dir)
            .map_err(|e| StorageError::io(e, Some(dir.clone())).with_backend(BACKEND))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry =
                entry.map_err(|e| StorageError::io(e, Some(dir.clone())).with_backend(BACKEND))?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let file = self.resolve(path)?;
        fs::read(&file).map_err(|e| StorageError::io(e, Some(file)).with_backend(BACKEND))
    }

    fn is_dir(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_dir())
    }
}
