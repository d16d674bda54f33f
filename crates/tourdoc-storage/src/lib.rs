//! Content filesystem abstraction for tourdoc.
//!
//! This crate provides a [`ContentFs`] trait for reading lesson and document
//! sources from a read-only, hierarchical content tree. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Embedding** content trees in other hosts
//! - **Clean separation** between parsing logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentFs`] trait with `list_dir()`, `read()`, and `is_dir()` methods
//! - [`FsContent`] implementation rooted at a directory on disk
//! - [`MockContent`] for testing (behind `mock` feature flag)
//! - [`ResourceLoader`] for resolving referenced files and their sidecar data
//! - [`DataParser`] for turning sidecar files into template values
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use tourdoc_storage::{ContentFs, FsContent, ResourceLoader};
//!
//! let content = FsContent::new(PathBuf::from("tour"));
//! let loader = ResourceLoader::new(&content);
//! let resource = loader.read("basics", "index.vuego")?;
//! println!("{}: {} bytes", resource.name, resource.content.len());
//! ```

mod data;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod path;
mod resource;
mod storage;

pub use data::{DataError, DataMap, DataParser, SerdeDataParser};
pub use fs::FsContent;
#[cfg(feature = "mock")]
pub use mock::MockContent;
pub use path::{base_name, extension, join_path};
pub use resource::{
    DATA_EXTENSIONS, DEFAULT_GLOBAL_DATA, Resource, ResourceLoader, TEMPLATE_EXTENSION,
};
pub use storage::{ContentFs, DirEntry, StorageError, StorageErrorKind};
