//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod lesson;
pub(crate) mod lessons;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use tourdoc_config::{CliSettings, Config};
use tourdoc_storage::FsContent;
use tourdoc_tour::{Tour, TourOptions};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use lesson::LessonArgs;
pub(crate) use lessons::LessonsArgs;
pub(crate) use render::RenderArgs;

/// Arguments shared by commands that read the tour.
#[derive(Args)]
pub(crate) struct TourArgs {
    /// Path to configuration file (default: auto-discover tourdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tour source directory (overrides config).
    #[arg(short, long, env = "TOURDOC_TOUR_DIR")]
    tour_dir: Option<PathBuf>,
}

impl TourArgs {
    /// Load configuration with the tour directory override applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            tour_dir: self.tour_dir.clone(),
            ..CliSettings::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Content tree and parsed tour for a configuration.
pub(crate) fn load_tour(config: &Config) -> Result<(FsContent, Tour), CliError> {
    let tour_config = &config.tour_resolved;
    let options = TourOptions {
        intro: tour_config.intro.clone(),
        completion: tour_config.completion.clone(),
        ..TourOptions::default()
    };

    tracing::debug!(source_dir = %tour_config.source_dir.display(), "Loading tour");
    let content = FsContent::new(tour_config.source_dir.clone());
    let tour = Tour::parse_with(&content, &options)?;
    Ok((content, tour))
}
