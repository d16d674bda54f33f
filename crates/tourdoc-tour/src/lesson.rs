//! Lesson and chapter model.

use std::collections::BTreeMap;

use serde::Serialize;
use tourdoc_storage::{DATA_EXTENSIONS, DataError, DataMap, DataParser, TEMPLATE_EXTENSION};

use crate::error::ValidationError;

/// Name of the template preferred as a lesson's primary template.
const INDEX_TEMPLATE: &str = "index.vuego";

/// Link to a neighbouring lesson in the flattened tour sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonLink {
    /// Composite lesson identifier (`{chapter}/{lesson}`).
    pub id: String,
    /// Slug of the chapter the lesson belongs to.
    pub chapter_slug: String,
    /// Index of the lesson within its chapter.
    pub lesson_idx: usize,
}

/// The smallest navigable unit of a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Composite identifier, `{chapter_idx}/{lesson_idx}`.
    pub id: String,
    /// Title from the `## ` heading, or `Lesson N`.
    pub title: String,
    /// Markdown body with headings and `@file:` lines removed.
    pub content: String,
    /// Attached files keyed by base name.
    pub files: BTreeMap<String, String>,
    /// Raw `@file:` paths in source order.
    pub file_refs: Vec<String>,
    /// Parent chapter name.
    pub chapter: String,
    /// Parent chapter display title.
    pub chapter_title: String,
    /// Parent chapter slug (also the lesson file directory).
    pub chapter_slug: String,
    /// Chapter index within the tour.
    pub chapter_idx: usize,
    /// Lesson index within the chapter.
    pub lesson_idx: usize,
    /// Number of lessons in the parent chapter.
    pub total_in_chapter: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Previous lesson, possibly in the previous chapter.
    pub prev: Option<LessonLink>,
    /// Next lesson, possibly in the next chapter.
    pub next: Option<LessonLink>,
}

impl Lesson {
    /// Identifier of the previous lesson.
    #[must_use]
    pub fn prev_id(&self) -> Option<&str> {
        self.prev.as_ref().map(|link| link.id.as_str())
    }

    /// Identifier of the next lesson.
    #[must_use]
    pub fn next_id(&self) -> Option<&str> {
        self.next.as_ref().map(|link| link.id.as_str())
    }

    pub(crate) fn link(&self) -> LessonLink {
        LessonLink {
            id: self.id.clone(),
            chapter_slug: self.chapter_slug.clone(),
            lesson_idx: self.lesson_idx,
        }
    }

    pub(crate) fn set_neighbours(&mut self, prev: Option<LessonLink>, next: Option<LessonLink>) {
        self.has_prev = prev.is_some();
        self.has_next = next.is_some();
        self.prev = prev;
        self.next = next;
    }

    /// Check that the lesson references at least one template file.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self
            .file_refs
            .iter()
            .any(|r| r.ends_with(TEMPLATE_EXTENSION))
        {
            return Ok(());
        }
        Err(ValidationError::MissingTemplate {
            lesson: self.title.clone(),
            chapter: self.chapter.clone(),
        })
    }

    /// Main template of the lesson.
    ///
    /// `index.vuego` when attached, otherwise the first attached template by name.
    #[must_use]
    pub fn primary_template(&self) -> Option<&str> {
        if self.files.contains_key(INDEX_TEMPLATE) {
            return Some(INDEX_TEMPLATE);
        }
        self.files
            .keys()
            .map(String::as_str)
            .find(|name| name.ends_with(TEMPLATE_EXTENSION))
    }

    /// Attached data file belonging to the primary template.
    #[must_use]
    pub fn data_file(&self) -> Option<&str> {
        let stem = self.primary_template()?.strip_suffix(TEMPLATE_EXTENSION)?;
        DATA_EXTENSIONS.iter().find_map(|ext| {
            self.files
                .get_key_value(&format!("{stem}{ext}"))
                .map(|(name, _)| name.as_str())
        })
    }

    /// Parse the primary template's data file.
    ///
    /// A lesson without a data file has empty data.
    pub fn template_data(&self, parser: &dyn DataParser) -> Result<DataMap, DataError> {
        let Some(name) = self.data_file() else {
            return Ok(DataMap::new());
        };
        let content = self.files.get(name).map_or("", String::as_str);
        parser.parse(name, content)
    }
}

/// An ordered group of lessons from one chapter document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// File name without extension, e.g. `01-interpolation`.
    pub name: String,
    /// Title from the `# ` heading, or the name.
    pub title: String,
    /// Public name with a numeric prefix removed, e.g. `interpolation`.
    pub slug: String,
    /// Chapter index within the tour.
    pub index: usize,
    pub lessons: Vec<Lesson>,
}

/// Public slug for a chapter name.
///
/// A leading all-digit segment before the first hyphen is dropped.
///
/// ```
/// use tourdoc_tour::chapter_slug;
///
/// assert_eq!(chapter_slug("01-interpolation"), "interpolation");
/// assert_eq!(chapter_slug("02-v-if"), "v-if");
/// assert_eq!(chapter_slug("intro-basics"), "intro-basics");
/// assert_eq!(chapter_slug("basics"), "basics");
/// ```
#[must_use]
pub fn chapter_slug(name: &str) -> &str {
    match name.split_once('-') {
        Some((prefix, rest))
            if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            rest
        }
        _ => name,
    }
}
