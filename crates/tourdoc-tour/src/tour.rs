//! Tour parsing, navigation and lookups.
//!
//! A tour is a directory of chapter documents:
//!
//! ```text
//! tour/
//! ├── README.md             # intro, not a chapter
//! ├── 01-interpolation.md   # chapter 0
//! ├── 02-loops.md           # chapter 1
//! ├── DONE.md               # completion page, not a chapter
//! ├── interpolation/        # files referenced by 01-interpolation.md
//! │   ├── index.vuego
//! │   └── index.yml
//! └── loops/
//!     └── index.vuego
//! ```
//!
//! Chapters are ordered by file name. Lesson navigation runs across chapter
//! boundaries: the last lesson of a chapter links to the first lesson of the
//! next one.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tourdoc_renderer::{DirectiveProcessor, Expansion, TabGroupIds};
use tourdoc_storage::{ContentFs, ResourceLoader};

use crate::error::{TourError, ValidationError};
use crate::lesson::{Chapter, Lesson, LessonLink, chapter_slug};
use crate::split::split_lessons;

/// Duration since `start` in milliseconds.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// File naming conventions of a tour directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourOptions {
    /// Extension of chapter documents.
    pub chapter_extension: String,
    /// Intro document, excluded from chapters.
    pub intro: String,
    /// Completion document, excluded from chapters.
    pub completion: String,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            chapter_extension: ".md".to_owned(),
            intro: "README.md".to_owned(),
            completion: "DONE.md".to_owned(),
        }
    }
}

impl TourOptions {
    /// True if a root file name is a chapter document.
    fn is_chapter(&self, name: &str) -> bool {
        name.ends_with(self.chapter_extension.as_str())
            && name != self.intro
            && name != self.completion
    }
}

/// A parsed tour.
///
/// Immutable once parsed; safe to share between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    chapters: Vec<Chapter>,
    intro: Option<String>,
    completion: Option<String>,
}

impl Tour {
    /// Parse a tour with the default file naming.
    pub fn parse(content: &dyn ContentFs) -> Result<Self, TourError> {
        Self::parse_with(content, &TourOptions::default())
    }

    /// Parse a tour from the root of `content`.
    ///
    /// # Example
    ///
    /// ```
    /// use tourdoc_storage::MockContent;
    /// use tourdoc_tour::{Tour, TourOptions};
    ///
    /// let content = MockContent::new()
    ///     .with_file("01-basics.md", "# Basics\n\n---\n\n## Hello\n\n@file: index.vuego")
    ///     .with_file("basics/index.vuego", "<p>Hello</p>");
    ///
    /// let tour = Tour::parse_with(&content, &TourOptions::default()).unwrap();
    /// let lesson = tour.lesson_by_slug("basics", "0").unwrap();
    ///
    /// assert_eq!(lesson.id, "0/0");
    /// assert_eq!(lesson.chapter_title, "Basics");
    /// assert_eq!(lesson.files["index.vuego"], "<p>Hello</p>");
    /// ```
    pub fn parse_with(content: &dyn ContentFs, options: &TourOptions) -> Result<Self, TourError> {
        let start = Instant::now();

        let entries = content.list_dir(".").map_err(TourError::ReadRoot)?;
        let mut names: Vec<String> = entries
            .into_iter()
            .filter(|entry| !entry.is_dir && options.is_chapter(&entry.name))
            .map(|entry| entry.name)
            .collect();
        names.sort();

        let loader = ResourceLoader::new(content);
        let mut chapters = Vec::with_capacity(names.len());
        for (index, file_name) in names.into_iter().enumerate() {
            chapters.push(parse_chapter(content, loader, file_name, index, options)?);
        }

        let mut tour = Self {
            chapters,
            intro: read_optional(content, &options.intro),
            completion: read_optional(content, &options.completion),
        };
        tour.link_lessons();

        tracing::info!(
            chapters = tour.chapters.len(),
            lessons = tour.lesson_count(),
            elapsed_ms = elapsed_ms(start),
            "Tour parsed"
        );

        Ok(tour)
    }

    /// Fill in previous/next links across the flattened lesson sequence.
    fn link_lessons(&mut self) {
        let links: Vec<LessonLink> = self.lessons().map(Lesson::link).collect();

        let flat = self.chapters.iter_mut().flat_map(|c| c.lessons.iter_mut());
        for (pos, lesson) in flat.enumerate() {
            let prev = pos.checked_sub(1).map(|p| links[p].clone());
            let next = links.get(pos + 1).cloned();
            lesson.set_neighbours(prev, next);
        }
    }

    /// Chapters in order.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// All lessons in tour order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.chapters.iter().flat_map(|c| c.lessons.iter())
    }

    /// Content of the intro document, if present.
    #[must_use]
    pub fn intro(&self) -> Option<&str> {
        self.intro.as_deref()
    }

    /// Content of the completion document, if present.
    #[must_use]
    pub fn completion(&self) -> Option<&str> {
        self.completion.as_deref()
    }

    /// Look up a lesson by composite identifier.
    #[must_use]
    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons().find(|lesson| lesson.id == id)
    }

    /// Look up a lesson by chapter slug and lesson index given as text.
    ///
    /// A non-numeric index finds nothing.
    #[must_use]
    pub fn lesson_by_slug(&self, slug: &str, index: &str) -> Option<&Lesson> {
        let index = index.parse().ok()?;
        self.lesson_by_slug_index(slug, index)
    }

    /// Look up a lesson by chapter slug and index within the chapter.
    ///
    /// Only the first chapter with a matching slug is searched.
    #[must_use]
    pub fn lesson_by_slug_index(&self, slug: &str, index: usize) -> Option<&Lesson> {
        self.chapters
            .iter()
            .find(|chapter| chapter.slug == slug)?
            .lessons
            .get(index)
    }

    /// First lesson of the tour.
    #[must_use]
    pub fn first_lesson(&self) -> Option<&Lesson> {
        self.lessons().next()
    }

    /// Total number of lessons.
    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.chapters.iter().map(|c| c.lessons.len()).sum()
    }

    /// Validate all lessons, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.lessons().try_for_each(Lesson::validate)
    }

    /// Validate all lessons and collect every failure.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        self.lessons().filter_map(|l| l.validate().err()).collect()
    }

    /// Expand directives in a lesson body.
    ///
    /// Directive paths resolve against the lesson's chapter directory.
    /// Returns `None` for an unknown lesson identifier.
    pub fn render_lesson(
        &self,
        id: &str,
        processor: &DirectiveProcessor<'_>,
        ids: &mut TabGroupIds,
    ) -> Option<Expansion> {
        let lesson = self.lesson(id)?;
        Some(processor.process(&lesson.content, &lesson.chapter_slug, ids))
    }
}

/// Read and decompose one chapter document.
fn parse_chapter(
    content: &dyn ContentFs,
    loader: ResourceLoader<'_>,
    file_name: String,
    index: usize,
    options: &TourOptions,
) -> Result<Chapter, TourError> {
    let text = match content.read_to_string(&file_name) {
        Ok(text) => text,
        Err(source) => {
            return Err(TourError::ReadChapter {
                name: file_name,
                source,
            });
        }
    };

    let name = file_name
        .strip_suffix(options.chapter_extension.as_str())
        .unwrap_or(&file_name)
        .to_owned();
    let slug = chapter_slug(&name).to_owned();

    let split = split_lessons(&text);
    let title = split.title.unwrap_or_else(|| name.clone());
    let total = split.sections.len();

    let lessons = split
        .sections
        .into_iter()
        .enumerate()
        .map(|(lesson_idx, section)| {
            let mut files = BTreeMap::new();
            for reference in &section.file_refs {
                loader.attach(&slug, reference, &mut files);
            }

            Lesson {
                id: format!("{index}/{lesson_idx}"),
                title: section.title,
                content: section.body,
                files,
                file_refs: section.file_refs,
                chapter: name.clone(),
                chapter_title: title.clone(),
                chapter_slug: slug.clone(),
                chapter_idx: index,
                lesson_idx,
                total_in_chapter: total,
                has_prev: false,
                has_next: false,
                prev: None,
                next: None,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(chapter = %name, lessons = lessons.len(), "Parsed chapter");

    Ok(Chapter {
        name,
        title,
        slug,
        index,
        lessons,
    })
}

/// Read a document that may be absent.
fn read_optional(content: &dyn ContentFs, path: &str) -> Option<String> {
    match content.read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.is_not_found() => None,
        Err(e) => {
            tracing::warn!(path, error = %e, "Failed to read tour document");
            None
        }
    }
}
