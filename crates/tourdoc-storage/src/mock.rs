//! Mock content implementation for testing.
//!
//! Provides [`MockContent`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};

use crate::storage::{ContentFs, DirEntry, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Normalize a lookup path: drop leading `./`, `/` and trailing `/`.
fn normalize(path: &str) -> &str {
    let mut path = path.trim_matches('/');
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    if path == "." { "" } else { path }
}

/// In-memory content tree for testing.
///
/// Files are stored by path. Directories are implied by the paths of the
/// files beneath them and are never stored explicitly.
///
/// # Example
///
/// ```ignore
/// use tourdoc_storage::{ContentFs, MockContent};
///
/// let content = MockContent::new()
///     .with_file("01-basics.md", "# Basics\n\n## First\n\nHello.")
///     .with_file("basics/first.vuego", "<div>Hello</div>");
///
/// let entries = content.list_dir(".").unwrap();
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockContent {
    files: BTreeMap<String, Vec<u8>>,
}

impl MockContent {
    /// Create a new empty mock content tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given path and content.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<str>, content: impl Into<Vec<u8>>) -> Self {
        self.files
            .insert(normalize(path.as_ref()).to_owned(), content.into());
        self
    }

    /// Number of files stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if no files are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ContentFs for MockContent {
    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, StorageError> {
        let dir = normalize(path);
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };

        let mut files = BTreeSet::new();
        let mut dirs = BTreeSet::new();
        for key in self.files.keys() {
            let Some(rest) = key.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    dirs.insert(child);
                }
                None => {
                    files.insert(rest);
                }
            }
        }

        if files.is_empty() && dirs.is_empty() && !dir.is_empty() {
            return Err(StorageError::not_found(dir).with_backend(BACKEND));
        }

        let mut entries: Vec<DirEntry> = files
            .into_iter()
            .map(DirEntry::file)
            .chain(dirs.into_iter().map(DirEntry::dir))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let key = normalize(path);
        self.files
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key).with_backend(BACKEND))
    }

    fn is_dir(&self, path: &str) -> bool {
        let dir = normalize(path);
        if dir.is_empty() {
            return true;
        }
        let prefix = format!("{dir}/");
        self.files.keys().any(|k| k.starts_with(&prefix))
    }
}
