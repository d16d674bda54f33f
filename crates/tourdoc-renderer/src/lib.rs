//! Directive expansion for markdown lessons and docs.
//!
//! This crate provides a [`DirectiveProcessor`] that walks a markdown body
//! line by line, expands `@`-directives into tabbed previews and code views,
//! and hands everything else to a [`MarkdownRenderer`].
//!
//! # Architecture
//!
//! The processor talks to its collaborators through traits:
//! - [`TemplateRenderer`]: renders a template file with its data
//! - [`MarkdownRenderer`]: converts plain markdown to HTML ([`HtmlMarkdown`] by default)
//! - [`tourdoc_storage::DataParser`]: parses sidecar data files
//!
//! Tab groups are numbered from a caller-owned [`TabGroupIds`] sequence, so
//! identifiers are unique per page rather than per process.
//!
//! # Example
//!
//! ```
//! use tourdoc_renderer::{DirectiveProcessor, HtmlMarkdown, TabGroupIds, VerbatimTemplate};
//! use tourdoc_storage::MockContent;
//!
//! let content = MockContent::new().with_file("guide/hello.vuego", "<p>Hello</p>");
//! let markdown = HtmlMarkdown::new();
//! let processor = DirectiveProcessor::new(&content, &VerbatimTemplate, &markdown);
//!
//! let mut ids = TabGroupIds::new();
//! let result = processor.process("Intro\n\n@example hello.vuego", "guide", &mut ids);
//!
//! assert!(result.html.contains(r#"role="tablist""#));
//! assert!(result.html.contains("<p>Hello</p>"));
//! ```

pub mod directive;
mod frontmatter;
mod markdown;
mod tabs;
mod template;
mod util;

pub use directive::{DirectiveProcessor, Expansion, TabGroupIds, tokenize};
pub use frontmatter::{DocMeta, Document, FrontMatterError};
pub use markdown::{HtmlMarkdown, MarkdownRenderer};
pub use tabs::{Tab, TabBody, TabGroup, syntax_mode};
pub use template::{TemplateError, TemplateRenderer, VerbatimTemplate};
pub use util::escape_html;
