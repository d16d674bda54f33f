//! `tourdoc check` command implementation.

use clap::Args;
use tourdoc_storage::base_name;
use tourdoc_tour::Tour;

use super::{TourArgs, load_tour};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    tour: TourArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Fails if any lesson lacks a template reference.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.tour.load_config()?;

        output.info(&format!(
            "Tour directory: {}",
            config.tour_resolved.source_dir.display()
        ));
        let (_, tour) = load_tour(&config)?;

        for line in missing_files(&tour) {
            output.warning(&line);
        }

        let errors = tour.validation_errors();
        for err in &errors {
            output.error(&err.to_string());
        }

        if !errors.is_empty() {
            return Err(CliError::Validation(format!(
                "{} of {} lessons failed validation",
                errors.len(),
                tour.lesson_count()
            )));
        }

        output.success(&format!(
            "{} chapters, {} lessons OK",
            tour.chapters().len(),
            tour.lesson_count()
        ));
        Ok(())
    }
}

/// Describe file references that could not be attached.
fn missing_files(tour: &Tour) -> Vec<String> {
    tour.lessons()
        .flat_map(|lesson| {
            lesson
                .file_refs
                .iter()
                .filter(move |r| !lesson.files.contains_key(base_name(r)))
                .map(move |r| {
                    format!(
                        "{} ({}): missing {}/{}",
                        lesson.title, lesson.id, lesson.chapter_slug, r
                    )
                })
        })
        .collect()
}
