//! tourdoc CLI - lesson tours and directive-expanded docs.
//!
//! Provides commands for:
//! - `check`: Parse and validate a tour
//! - `lessons`: List chapters and lessons, or dump them as JSON
//! - `lesson`: Render one lesson body to HTML
//! - `render`: Render a docs page to HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, LessonArgs, LessonsArgs, RenderArgs};
use output::Output;

/// tourdoc - lesson tours and directive-expanded docs.
#[derive(Parser)]
#[command(name = "tourdoc", version, about)]
struct Cli {
    /// Enable verbose output (parse timing and dropped references).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the tour and validate every lesson.
    Check(CheckArgs),
    /// List chapters and lessons.
    Lessons(LessonsArgs),
    /// Render a lesson body to HTML.
    Lesson(LessonArgs),
    /// Render a docs page to HTML.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Lessons(args) => args.execute(),
        Commands::Lesson(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
