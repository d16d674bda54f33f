//! `tourdoc render` command implementation.

use std::path::PathBuf;

use clap::Args;
use tourdoc_config::{CliSettings, Config};
use tourdoc_renderer::{
    DirectiveProcessor, Document, Expansion, HtmlMarkdown, TabGroupIds, VerbatimTemplate,
};
use tourdoc_storage::{ContentFs, FsContent};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Docs page path relative to the docs directory (e.g. `components/tabs.md`).
    doc: String,

    /// Path to configuration file (default: auto-discover tourdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs source directory (overrides config).
    #[arg(short, long, env = "TOURDOC_DOCS_DIR")]
    docs_dir: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Writes the expanded page body to stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            docs_dir: self.docs_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;
        output.info(&format!("Docs directory: {}", docs.source_dir.display()));

        let content = FsContent::new(docs.source_dir.clone());
        let (document, expansion) = render_document(&content, &self.doc, &docs.global_data)?;

        if let Some(title) = &document.meta.title {
            output.highlight(title);
        }
        if let Some(subtitle) = &document.meta.subtitle {
            output.detail(subtitle);
        }
        output.detail(&format!("Layout: {}", document.layout_path()));
        for warning in &expansion.warnings {
            output.warning(warning);
        }
        output.document(&expansion.html);
        Ok(())
    }
}

/// Directory of a content path, `.` for top-level files.
fn doc_dir(path: &str) -> &str {
    path.rsplit_once('/').map_or(".", |(dir, _)| dir)
}

/// Parse a docs page and expand its directives.
///
/// Directive paths resolve against the page's own directory.
fn render_document(
    content: &dyn ContentFs,
    path: &str,
    global_data: &str,
) -> Result<(Document, Expansion), CliError> {
    let source = content.read_to_string(path)?;
    let document = Document::parse(&source)?;

    let markdown = HtmlMarkdown::new();
    let processor = DirectiveProcessor::new(content, &VerbatimTemplate, &markdown)
        .with_global_data_from(global_data);
    let expansion = processor.process(&document.body, doc_dir(path), &mut TabGroupIds::new());

    Ok((document, expansion))
}
