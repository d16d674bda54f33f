//! Lesson tours built from markdown chapter documents.
//!
//! This crate provides:
//! - [`Tour`]: ordered chapters parsed from a content tree, with lesson
//!   navigation across chapter boundaries, lookups and validation
//! - [`Chapter`] and [`Lesson`]: the serializable tour model
//!
//! # Chapter format
//!
//! ```markdown
//! # Interpolation
//!
//! ---
//!
//! ## Hello, world
//!
//! Values from the data file are available in the template.
//!
//! @file: index.vuego
//!
//! ---
//!
//! ## Expressions
//! ...
//! ```
//!
//! Sections are separated by `---` between blank lines. `@file:` paths
//! resolve against the chapter's slug directory, so `01-interpolation.md`
//! reads its files from `interpolation/`.

mod error;
mod lesson;
mod split;
mod tour;

pub use error::{TourError, ValidationError};
pub use lesson::{Chapter, Lesson, LessonLink, chapter_slug};
pub use split::{FILE_REF_MARKER, LESSON_DELIMITER, extract_file_refs};
pub use tour::{Tour, TourOptions};
