//! Markdown rendering collaborator.
//!
//! [`HtmlMarkdown`] is the default implementation built on pulldown-cmark.
//! Code blocks get syntax-highlighting classes so that they look the same as
//! code tabs produced by directives.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::util::escape_html;

/// Converts markdown text to HTML.
pub trait MarkdownRenderer: Send + Sync {
    /// Render a complete markdown fragment.
    fn render(&self, markdown: &str) -> String;
}

/// pulldown-cmark based markdown renderer.
///
/// # Example
///
/// ```
/// use tourdoc_renderer::{HtmlMarkdown, MarkdownRenderer};
///
/// let html = HtmlMarkdown::new().render("```yaml\nname: World\n```");
/// assert!(html.contains(r#"<code class="language-yaml">"#));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HtmlMarkdown {
    options: Options,
}

impl Default for HtmlMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlMarkdown {
    /// Create a renderer with tables, strikethrough and task lists enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

/// Code block being collected between its start and end events.
struct PendingCode {
    lang: String,
    text: String,
}

impl MarkdownRenderer for HtmlMarkdown {
    fn render(&self, markdown: &str) -> String {
        let mut pending: Option<PendingCode> = None;

        let events = Parser::new_ext(markdown, self.options).filter_map(|event| match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_owned()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                pending = Some(PendingCode {
                    lang: if lang.is_empty() { "text".to_owned() } else { lang },
                    text: String::new(),
                });
                None
            }
            Event::Text(text) if pending.is_some() => {
                if let Some(code) = pending.as_mut() {
                    code.text.push_str(&text);
                }
                None
            }
            Event::End(TagEnd::CodeBlock) => pending.take().map(|code| {
                Event::Html(CowStr::from(format!(
                    "<pre class=\"code\"><code class=\"language-{}\">{}</code></pre>\n",
                    escape_html(&code.lang),
                    escape_html(&code.text)
                )))
            }),
            Event::Code(code) => {
                let class = if code.starts_with('<') {
                    "highlight language-html"
                } else {
                    "highlight"
                };
                Some(Event::InlineHtml(CowStr::from(format!(
                    "<code class=\"{class}\">{}</code>",
                    escape_html(&code)
                ))))
            }
            other => Some(other),
        });

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }
}
