//! Tab and tab group model with accessible HTML output.
//!
//! # Output HTML Structure
//!
//! ```html
//! <div class="tabs" id="tabs-1">
//!   <div class="tabs-buttons" role="tablist">
//!     <button role="tab" id="tab-1-0" aria-controls="panel-1-0"
//!             aria-selected="true" tabindex="0">Preview</button>
//!     <button role="tab" id="tab-1-1" aria-controls="panel-1-1"
//!             aria-selected="false" tabindex="-1">Code</button>
//!   </div>
//!   <section role="tabpanel" id="panel-1-0" aria-labelledby="tab-1-0">
//!     <!-- single tab -->
//!   </section>
//!   <section role="tabpanel" id="panel-1-1" aria-labelledby="tab-1-1" hidden>
//!     <!-- single tab -->
//!   </section>
//! </div>
//! ```

use std::fmt::Write;

use tourdoc_storage::extension;

use crate::util::escape_html;

/// Content of a tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TabBody {
    /// Rendered HTML shown as a live preview.
    Preview(String),
    /// Raw source shown as a code view.
    Code {
        /// Source text (escaped on output).
        source: String,
        /// Syntax-mode hint, e.g. `html` or `yaml`.
        mode: String,
    },
}

/// A single labelled tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    /// Display label for the tab button.
    pub label: String,
    /// Tab content.
    pub body: TabBody,
}

impl Tab {
    /// Create a preview tab holding rendered HTML.
    #[must_use]
    pub fn preview(label: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: TabBody::Preview(html.into()),
        }
    }

    /// Create a code tab holding raw source.
    #[must_use]
    pub fn code(label: impl Into<String>, source: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: TabBody::Code {
                source: source.into(),
                mode: mode.into(),
            },
        }
    }

    /// Render the tab content on its own, without tab chrome.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.body {
            TabBody::Code { source, mode } => {
                let mode = if mode.is_empty() { "text" } else { mode };
                format!(
                    r#"<code class="hljs language-{}"><pre>{}</pre></code>"#,
                    escape_html(mode),
                    escape_html(source)
                )
            }
            TabBody::Preview(html) => format!(r#"<div class="preview">{html}</div>"#),
        }
    }
}

/// An ordered group of tabs rendered as one tab list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabGroup {
    /// Tabs in display order.
    pub tabs: Vec<Tab>,
}

impl TabGroup {
    /// Create a group from tabs.
    #[must_use]
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self { tabs }
    }

    /// True if the group has no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Render the group with the given group identifier.
    ///
    /// The first tab is selected and focusable, the rest are hidden and
    /// removed from the tab order.
    #[must_use]
    pub fn render(&self, group_id: usize) -> String {
        let mut out = String::with_capacity(512);

        write!(out, r#"<div class="tabs" id="tabs-{group_id}">"#).unwrap();

        out.push_str(r#"<div class="tabs-buttons" role="tablist">"#);
        for (idx, tab) in self.tabs.iter().enumerate() {
            let selected = idx == 0;
            write!(
                out,
                r#"<button role="tab" id="tab-{group_id}-{idx}" aria-controls="panel-{group_id}-{idx}" aria-selected="{selected}" tabindex="{}">{}</button>"#,
                if selected { "0" } else { "-1" },
                escape_html(&tab.label)
            )
            .unwrap();
        }
        out.push_str("</div>");

        for (idx, tab) in self.tabs.iter().enumerate() {
            let hidden = if idx == 0 { "" } else { " hidden" };
            write!(
                out,
                r#"<section role="tabpanel" id="panel-{group_id}-{idx}" aria-labelledby="tab-{group_id}-{idx}"{hidden}>{}</section>"#,
                tab.render()
            )
            .unwrap();
        }

        out.push_str("</div>");
        out
    }
}

/// Syntax-mode hint for a file path.
///
/// Templates map to `html`, `yml` to `yaml`, other extensions pass through
/// and paths without one get `text`.
///
/// ```
/// use tourdoc_renderer::syntax_mode;
///
/// assert_eq!(syntax_mode("card.vuego"), "html");
/// assert_eq!(syntax_mode("card.yml"), "yaml");
/// assert_eq!(syntax_mode("card.json"), "json");
/// assert_eq!(syntax_mode("Makefile"), "text");
/// ```
#[must_use]
pub fn syntax_mode(path: &str) -> &str {
    match extension(path) {
        None | Some("") => "text",
        Some("vuego") => "html",
        Some("yml") => "yaml",
        Some(ext) => ext,
    }
}
