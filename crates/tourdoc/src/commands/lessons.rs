//! `tourdoc lessons` command implementation.

use clap::Args;
use tourdoc_tour::Tour;

use super::{TourArgs, load_tour};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lessons command.
#[derive(Args)]
pub(crate) struct LessonsArgs {
    #[command(flatten)]
    tour: TourArgs,

    /// Print the full tour model as JSON to stdout.
    #[arg(long)]
    json: bool,
}

impl LessonsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.tour.load_config()?;
        let (_, tour) = load_tour(&config)?;

        if self.json {
            output.document(&serde_json::to_string_pretty(&tour)?);
            return Ok(());
        }

        for chapter in tour.chapters() {
            output.highlight(&format!("{} ({})", chapter.title, chapter.slug));
            for line in chapter_lines(&tour, chapter.index) {
                output.info(&line);
            }
        }
        output.detail(&format!("{} lessons", tour.lesson_count()));
        Ok(())
    }
}

/// One line per lesson of a chapter: identifier, title and attached files.
fn chapter_lines(tour: &Tour, chapter_idx: usize) -> Vec<String> {
    let Some(chapter) = tour.chapters().get(chapter_idx) else {
        return Vec::new();
    };

    chapter
        .lessons
        .iter()
        .map(|lesson| {
            let files: Vec<&str> = lesson.files.keys().map(String::as_str).collect();
            if files.is_empty() {
                format!("  {}  {}", lesson.id, lesson.title)
            } else {
                format!("  {}  {}  [{}]", lesson.id, lesson.title, files.join(", "))
            }
        })
        .collect()
}
