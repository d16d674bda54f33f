//! Splitting a chapter document into lesson sections.
//!
//! Lessons are separated by a blank line, a `---` line and another blank
//! line. Inside a section, a `# ` heading names the chapter, a `## ` heading
//! names the lesson and `@file:` lines reference lesson files.

/// Structural separator between lessons.
pub const LESSON_DELIMITER: &str = "\n\n---\n\n";

/// Marker that starts a file reference line.
pub const FILE_REF_MARKER: &str = "@file:";

/// One lesson section before it is attached to a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section {
    pub title: String,
    pub body: String,
    pub file_refs: Vec<String>,
}

/// Result of splitting a chapter document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct SplitChapter {
    /// Text of the first `# ` heading seen, if any.
    pub title: Option<String>,
    pub sections: Vec<Section>,
}

/// Split text into its first line and the rest.
fn first_line(text: &str) -> (&str, &str) {
    text.split_once('\n').unwrap_or((text, ""))
}

/// Split a chapter document into lesson sections.
pub(crate) fn split_lessons(content: &str) -> SplitChapter {
    let mut chapter = SplitChapter::default();

    for (position, section) in content.split(LESSON_DELIMITER).enumerate() {
        let mut body = section.trim();
        if body.is_empty() {
            continue;
        }

        let (line, rest) = first_line(body);
        if let Some(heading) = line.strip_prefix("# ") {
            chapter.title.get_or_insert_with(|| heading.trim().to_owned());
            body = rest.trim();
            if body.is_empty() {
                continue;
            }
        }

        let (line, rest) = first_line(body);
        let title = match line.strip_prefix("## ") {
            Some(heading) => {
                body = rest.trim();
                heading.trim().to_owned()
            }
            None => format!("Lesson {}", position + 1),
        };

        let (file_refs, body) = extract_file_refs(body);
        chapter.sections.push(Section {
            title,
            body,
            file_refs,
        });
    }

    chapter
}

/// Pull `@file:` reference lines out of a lesson body.
///
/// Returns the referenced paths in source order and the body with those
/// lines removed and surrounding whitespace trimmed. Markers without a path
/// are removed but not recorded.
///
/// # Example
///
/// ```
/// use tourdoc_tour::extract_file_refs;
///
/// let (refs, body) = extract_file_refs("Intro\n@file: index.vuego\n  @file: index.yml\nOutro");
/// assert_eq!(refs, vec!["index.vuego", "index.yml"]);
/// assert_eq!(body, "Intro\nOutro");
/// ```
#[must_use]
pub fn extract_file_refs(content: &str) -> (Vec<String>, String) {
    let mut refs = Vec::new();
    let mut kept = Vec::new();

    for line in content.split('\n') {
        match line.trim().strip_prefix(FILE_REF_MARKER) {
            Some(path) => {
                let path = path.trim();
                if !path.is_empty() {
                    refs.push(path.to_owned());
                }
            }
            None => kept.push(line),
        }
    }

    (refs, kept.join("\n").trim().to_owned())
}
