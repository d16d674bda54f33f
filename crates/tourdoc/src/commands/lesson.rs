//! `tourdoc lesson` command implementation.

use clap::Args;
use tourdoc_renderer::{DirectiveProcessor, HtmlMarkdown, TabGroupIds, VerbatimTemplate};

use super::{TourArgs, load_tour};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lesson command.
#[derive(Args)]
pub(crate) struct LessonArgs {
    /// Chapter slug (e.g. `interpolation` for `01-interpolation.md`).
    chapter: String,

    /// Lesson index within the chapter, starting at 0.
    index: String,

    #[command(flatten)]
    tour: TourArgs,
}

impl LessonArgs {
    /// Execute the lesson command.
    ///
    /// Writes the expanded lesson body to stdout and lesson details to stderr.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.tour.load_config()?;
        let (content, tour) = load_tour(&config)?;

        let lesson = tour
            .lesson_by_slug(&self.chapter, &self.index)
            .ok_or_else(|| {
                CliError::NotFound(format!("No lesson {}/{}", self.chapter, self.index))
            })?;

        output.highlight(&format!(
            "{} - {} ({} of {})",
            lesson.chapter_title,
            lesson.title,
            lesson.lesson_idx + 1,
            lesson.total_in_chapter
        ));
        if let Some(template) = lesson.primary_template() {
            let data = lesson.data_file().unwrap_or("no data");
            output.detail(&format!("Template: {template} ({data})"));
        }
        if let Some(prev) = &lesson.prev {
            output.detail(&format!("Previous: {}/{}", prev.chapter_slug, prev.lesson_idx));
        }
        if let Some(next) = &lesson.next {
            output.detail(&format!("Next: {}/{}", next.chapter_slug, next.lesson_idx));
        }

        let markdown = HtmlMarkdown::new();
        let processor = DirectiveProcessor::new(&content, &VerbatimTemplate, &markdown);
        let mut ids = TabGroupIds::new();
        let Some(expansion) = tour.render_lesson(&lesson.id, &processor, &mut ids) else {
            return Err(CliError::NotFound(format!("No lesson {}", lesson.id)));
        };

        for warning in &expansion.warnings {
            output.warning(warning);
        }
        output.document(&expansion.html);
        Ok(())
    }
}
