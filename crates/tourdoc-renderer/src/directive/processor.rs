//! Single-pass directive processor.
//!
//! Walks a body line by line, buffering markdown until a directive boundary
//! and collecting tabs into groups.

use tourdoc_storage::{ContentFs, DataMap, ResourceLoader, SerdeDataParser};

use super::args::tokenize;
use crate::markdown::MarkdownRenderer;
use crate::tabs::{Tab, TabGroup, syntax_mode};
use crate::template::TemplateRenderer;
use crate::util::html_comment;

/// Sequence of tab group identifiers.
///
/// Owned by the caller and shared by every [`DirectiveProcessor::process`]
/// call that contributes to the same page, so anchors stay unique on that
/// page. The first identifier handed out is 1.
#[derive(Debug, Default, Clone)]
pub struct TabGroupIds {
    last: usize,
}

impl TabGroupIds {
    /// Start a new sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next identifier.
    pub fn next_id(&mut self) -> usize {
        self.last += 1;
        self.last
    }

    /// Number of identifiers handed out so far.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.last
    }
}

/// Result of expanding one body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Rendered fragments joined by newlines.
    pub html: String,
    /// Problems that were recovered from (missing arguments, unreadable files).
    pub warnings: Vec<String>,
}

/// Tab grouping state.
#[derive(Debug)]
enum GroupState {
    /// Not inside `@tabs`.
    Idle,
    /// Inside `@tabs`, collecting tabs.
    Open(Vec<Tab>),
}

/// Recognized directive line.
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    Tabs,
    Render(&'a str),
    File(&'a str),
    Example(&'a str),
}

/// Parse a trimmed line for directive syntax.
fn parse_directive(trimmed: &str) -> Option<Directive<'_>> {
    if trimmed == "@tabs" {
        return Some(Directive::Tabs);
    }
    if let Some(args) = trimmed.strip_prefix("@render ") {
        return Some(Directive::Render(args));
    }
    if let Some(args) = trimmed.strip_prefix("@file ") {
        return Some(Directive::File(args));
    }
    if let Some(args) = trimmed.strip_prefix("@example ") {
        return Some(Directive::Example(args));
    }
    None
}

/// Mutable state of one expansion pass.
struct Pass<'p> {
    markdown: &'p dyn MarkdownRenderer,
    ids: &'p mut TabGroupIds,
    output: Vec<String>,
    pending: Vec<&'p str>,
    state: GroupState,
    warnings: Vec<String>,
}

impl Pass<'_> {
    fn emit(&mut self, fragment: String) {
        if !fragment.is_empty() {
            self.output.push(fragment);
        }
    }

    /// Render buffered markdown lines as one fragment.
    fn flush_markdown(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let html = self.markdown.render(&self.pending.join("\n"));
        self.pending.clear();
        self.emit(html);
    }

    /// Render a group with a fresh identifier. Empty groups render nothing.
    fn emit_group(&mut self, group: &TabGroup) {
        if group.is_empty() {
            return;
        }
        let id = self.ids.next_id();
        self.emit(group.render(id));
    }

    /// Leave tab-group mode, rendering any collected tabs.
    fn close_group(&mut self) {
        if let GroupState::Open(tabs) = std::mem::replace(&mut self.state, GroupState::Idle) {
            self.emit_group(&TabGroup::new(tabs));
        }
    }

    /// Add a tab to the open group, or render it standalone.
    fn push_tab(&mut self, tab: Tab) {
        match &mut self.state {
            GroupState::Open(tabs) => tabs.push(tab),
            GroupState::Idle => self.emit(tab.render()),
        }
    }

    fn has_open_tabs(&self) -> bool {
        matches!(&self.state, GroupState::Open(tabs) if !tabs.is_empty())
    }
}

/// Expands `@`-directives in markdown bodies.
///
/// Paths in directives resolve relative to the document directory passed to
/// [`process`](Self::process). Unreadable files and bad arguments never abort
/// a pass; they produce a visible placeholder and a warning.
///
/// # Example
///
/// ```
/// use tourdoc_renderer::{DirectiveProcessor, HtmlMarkdown, TabGroupIds, VerbatimTemplate};
/// use tourdoc_storage::MockContent;
///
/// let content = MockContent::new()
///     .with_file("guide/card.vuego", "<div>Card</div>")
///     .with_file("guide/card.yml", "title: Card");
/// let markdown = HtmlMarkdown::new();
/// let processor = DirectiveProcessor::new(&content, &VerbatimTemplate, &markdown);
///
/// let body = "@tabs\n@render \"Preview\" card.vuego\n@file \"Data\" card.yml\n\nAfter.";
/// let result = processor.process(body, "guide", &mut TabGroupIds::new());
///
/// assert_eq!(result.html.matches(r#"role="tablist""#).count(), 1);
/// assert!(result.html.contains("<p>After.</p>"));
/// ```
pub struct DirectiveProcessor<'a> {
    loader: ResourceLoader<'a>,
    templates: &'a dyn TemplateRenderer,
    markdown: &'a dyn MarkdownRenderer,
    global_data: DataMap,
}

impl<'a> DirectiveProcessor<'a> {
    /// Create a processor reading files from `content`.
    #[must_use]
    pub fn new(
        content: &'a dyn ContentFs,
        templates: &'a dyn TemplateRenderer,
        markdown: &'a dyn MarkdownRenderer,
    ) -> Self {
        Self {
            loader: ResourceLoader::new(content),
            templates,
            markdown,
            global_data: DataMap::new(),
        }
    }

    /// Set values available to every rendered template.
    ///
    /// These override sidecar values with the same key.
    #[must_use]
    pub fn with_global_data(mut self, data: DataMap) -> Self {
        self.global_data = data;
        self
    }

    /// Load global values from data files matching `pattern` (e.g. `data/*.yml`).
    #[must_use]
    pub fn with_global_data_from(self, pattern: &str) -> Self {
        let data = self.loader.global_data(pattern, &SerdeDataParser);
        self.with_global_data(data)
    }

    /// Expand all directives in `body`.
    ///
    /// `doc_dir` is the directory directive paths resolve against. Tab groups
    /// take their identifiers from `ids`.
    pub fn process(&self, body: &str, doc_dir: &str, ids: &mut TabGroupIds) -> Expansion {
        let mut pass = Pass {
            markdown: self.markdown,
            ids,
            output: Vec::new(),
            pending: Vec::new(),
            state: GroupState::Idle,
            warnings: Vec::new(),
        };

        for (idx, line) in body.split('\n').enumerate() {
            let line_num = idx + 1;
            let trimmed = line.trim();

            match parse_directive(trimmed) {
                Some(Directive::Tabs) => {
                    pass.flush_markdown();
                    // Tabs collected by an earlier `@tabs` are discarded.
                    pass.state = GroupState::Open(Vec::new());
                }
                None if trimmed.is_empty() && matches!(pass.state, GroupState::Open(_)) => {
                    pass.close_group();
                    pass.pending.push(line);
                }
                Some(Directive::Render(args)) => {
                    pass.flush_markdown();
                    let tab = self.render_tab(args, doc_dir, line_num, &mut pass.warnings);
                    pass.push_tab(tab);
                }
                Some(Directive::File(args)) => {
                    pass.flush_markdown();
                    let tab = self.file_tab(args, doc_dir, line_num, &mut pass.warnings);
                    pass.push_tab(tab);
                }
                Some(Directive::Example(args)) => {
                    pass.flush_markdown();
                    let group = self.example_group(args, doc_dir, line_num, &mut pass.warnings);
                    pass.emit_group(&group);
                }
                None => {
                    if pass.has_open_tabs() {
                        pass.close_group();
                    }
                    pass.pending.push(line);
                }
            }
        }

        pass.flush_markdown();
        pass.close_group();

        for warning in &pass.warnings {
            tracing::debug!(doc_dir, warning = %warning, "Directive warning");
        }

        Expansion {
            html: pass.output.join("\n"),
            warnings: pass.warnings,
        }
    }

    /// `@render "Label" path`: live preview of a template.
    fn render_tab(
        &self,
        args: &str,
        doc_dir: &str,
        line_num: usize,
        warnings: &mut Vec<String>,
    ) -> Tab {
        let tokens = tokenize(args);
        let [label, path, ..] = tokens.as_slice() else {
            warnings.push(format!("line {line_num}: @render needs a label and a path"));
            return Tab::preview("Preview", html_comment("missing args"));
        };
        Tab::preview(label.as_str(), self.render_template(doc_dir, path, line_num, warnings))
    }

    /// `@file "Label" path`: source view of a file.
    fn file_tab(
        &self,
        args: &str,
        doc_dir: &str,
        line_num: usize,
        warnings: &mut Vec<String>,
    ) -> Tab {
        let tokens = tokenize(args);
        let [label, path, ..] = tokens.as_slice() else {
            warnings.push(format!("line {line_num}: @file needs a label and a path"));
            return Tab::preview("Code", html_comment("missing args"));
        };
        Tab::code(
            label.as_str(),
            self.read_source(doc_dir, path, line_num, warnings),
            syntax_mode(path),
        )
    }

    /// `@example path`: preview and source of one template, always as its own group.
    fn example_group(
        &self,
        args: &str,
        doc_dir: &str,
        line_num: usize,
        warnings: &mut Vec<String>,
    ) -> TabGroup {
        let tokens = tokenize(args);
        let Some(path) = tokens.first() else {
            warnings.push(format!("line {line_num}: @example needs a path"));
            return TabGroup::default();
        };

        TabGroup::new(vec![
            Tab::preview("Preview", self.render_template(doc_dir, path, line_num, warnings)),
            Tab::code("Code", self.read_source(doc_dir, path, line_num, warnings), "html"),
        ])
    }

    /// Read a file for a code view, or an error comment.
    fn read_source(
        &self,
        doc_dir: &str,
        path: &str,
        line_num: usize,
        warnings: &mut Vec<String>,
    ) -> String {
        match self.loader.read(doc_dir, path) {
            Ok(resource) => resource.content,
            Err(e) => {
                warnings.push(format!("line {line_num}: cannot read {path}: {e}"));
                html_comment(&format!("error reading {path}: {e}"))
            }
        }
    }

    /// Render a template with global and sidecar data, or an error comment.
    fn render_template(
        &self,
        doc_dir: &str,
        path: &str,
        line_num: usize,
        warnings: &mut Vec<String>,
    ) -> String {
        let resource = match self.loader.read(doc_dir, path) {
            Ok(resource) => resource,
            Err(e) => {
                warnings.push(format!("line {line_num}: cannot read {path}: {e}"));
                return html_comment(&format!("error reading {path}: {e}"));
            }
        };

        let mut data = self.loader.template_data(&resource.path, &SerdeDataParser);
        data.extend(self.global_data.clone());

        match self
            .templates
            .render(&resource.path, &resource.content, &data)
        {
            Ok(html) => html,
            Err(e) => {
                warnings.push(format!("line {line_num}: cannot render {path}: {e}"));
                html_comment(&format!("render error: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tourdoc_storage::MockContent;

    use super::*;
    use crate::template::{TemplateError, VerbatimTemplate};

    /// Markdown renderer that records each call and wraps input in `<md>`.
    #[derive(Default)]
    struct RecordingMarkdown {
        calls: Mutex<Vec<String>>,
    }

    impl MarkdownRenderer for RecordingMarkdown {
        fn render(&self, markdown: &str) -> String {
            self.calls.lock().unwrap().push(markdown.to_owned());
            format!("<md>{markdown}</md>")
        }
    }

    fn content() -> MockContent {
        MockContent::new()
            .with_file("guide/card.vuego", "<div>Card</div>")
            .with_file("guide/card.yml", "title: Card")
            .with_file("guide/list.vuego", "<ul></ul>")
            .with_file("guide/style.css", "a { color: red; }")
            .with_file("guide/Makefile", "all:")
    }

    fn expand(body: &str) -> (Expansion, Vec<String>, usize) {
        let content = content();
        let markdown = RecordingMarkdown::default();
        let processor = DirectiveProcessor::new(&content, &VerbatimTemplate, &markdown);
        let mut ids = TabGroupIds::new();
        let result = processor.process(body, "guide", &mut ids);
        let calls = markdown.calls.into_inner().unwrap();
        (result, calls, ids.issued())
    }

    #[test]
    fn test_plain_markdown_single_call() {
        let (result, calls, groups) = expand("- one\n- two\n\n```\ncode\n```");

        assert_eq!(calls, vec!["- one\n- two\n\n```\ncode\n```"]);
        assert_eq!(result.html, "<md>- one\n- two\n\n```\ncode\n```</md>");
        assert_eq!(groups, 0);
    }

    #[test]
    fn test_tabs_with_two_files_is_one_group() {
        let body = "@tabs\n@file \"Template\" card.vuego\n@file \"Data\" card.yml\n\nAfter";
        let (result, calls, groups) = expand(body);

        assert_eq!(groups, 1);
        assert_eq!(result.html.matches(r#"role="tablist""#).count(), 1);
        assert_eq!(result.html.matches(r#"role="tab" "#).count(), 2);
        assert!(result.html.contains(r#"<code class="hljs language-html">"#));
        assert!(result.html.contains(r#"<code class="hljs language-yaml">"#));
        // Closing blank line is kept with the following markdown.
        assert_eq!(calls, vec!["\nAfter"]);
    }

    #[test]
    fn test_group_ids_on_anchors() {
        let body = "@tabs\n@file \"A\" card.vuego\n@file \"B\" card.yml";
        let (result, _, groups) = expand(body);

        assert_eq!(groups, 1);
        assert!(result.html.contains(r#"id="panel-1-0""#));
        assert!(result.html.contains(r#"id="panel-1-1""#));
    }

    #[test]
    fn test_standalone_file_directive() {
        let (result, _, groups) = expand("@file \"Styles\" style.css");

        assert_eq!(groups, 0);
        assert_eq!(
            result.html,
            r#"<code class="hljs language-css"><pre>a { color: red; }</pre></code>"#
        );
    }

    #[test]
    fn test_file_without_extension_is_text() {
        let (result, _, _) = expand("@file \"Build\" Makefile");
        assert!(result.html.contains("language-text"));
    }

    #[test]
    fn test_standalone_render_directive() {
        let (result, _, groups) = expand("Intro\n@render \"Preview\" card.vuego\nOutro");

        assert_eq!(groups, 0);
        assert_eq!(
            result.html,
            "<md>Intro</md>\n<div class=\"preview\"><div>Card</div></div>\n<md>Outro</md>"
        );
    }

    #[test]
    fn test_render_missing_file_is_comment() {
        let (result, _, _) = expand("@render \"Preview\" missing.vuego");

        assert!(result.html.starts_with(r#"<div class="preview"><!-- error reading missing.vuego"#));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("missing.vuego"));
    }

    #[test]
    fn test_render_missing_args_placeholder() {
        let (result, _, _) = expand("@render \"Only label\"\nNext");

        assert!(result.html.starts_with(r#"<div class="preview"><!-- missing args --></div>"#));
        assert!(result.html.ends_with("<md>Next</md>"));
        assert!(result.warnings[0].starts_with("line 1:"));
    }

    #[test]
    fn test_file_missing_args_placeholder() {
        let (result, _, _) = expand("@tabs\n@file \"Only\"\n");

        assert!(result.html.contains(">Code</button>"));
        assert!(result.html.contains("<!-- missing args -->"));
    }

    #[test]
    fn test_example_is_two_tab_group() {
        let (result, _, groups) = expand("@example card.vuego");

        assert_eq!(groups, 1);
        assert!(result.html.contains(">Preview</button>"));
        assert!(result.html.contains(">Code</button>"));
        assert!(result.html.contains("<div class=\"preview\"><div>Card</div></div>"));
        assert!(result.html.contains("&lt;div&gt;Card&lt;/div&gt;"));
    }

    #[test]
    fn test_example_inside_open_group_stays_separate() {
        let body = "@tabs\n@file \"A\" card.vuego\n@example list.vuego\n@file \"B\" card.yml\n";
        let (result, _, groups) = expand(body);

        // Example renders first as its own group; the open group keeps A and B.
        assert_eq!(groups, 2);
        let example_at = result.html.find(r#"id="tabs-1""#).unwrap();
        let open_at = result.html.find(r#"id="tabs-2""#).unwrap();
        assert!(example_at < open_at);
        let open_group = &result.html[open_at..];
        assert!(open_group.contains(">A</button>"));
        assert!(open_group.contains(">B</button>"));
    }

    #[test]
    fn test_bare_example_keyword_is_markdown() {
        let (result, _, groups) = expand("@example   ");

        // "@example   " trims to "@example", which is markdown.
        assert_eq!(groups, 0);
        assert_eq!(result.html, "<md>@example   </md>");
    }

    #[test]
    fn test_text_line_implicitly_closes_group() {
        let body = "@tabs\n@file \"A\" card.vuego\nSome text\n@file \"B\" card.yml";
        let (result, calls, groups) = expand(body);

        assert_eq!(groups, 1);
        assert_eq!(calls, vec!["Some text"]);
        // B was rendered standalone after the text.
        assert!(result.html.ends_with(r#"<code class="hljs language-yaml"><pre>title: Card</pre></code>"#));
    }

    #[test]
    fn test_text_in_empty_group_keeps_it_open() {
        let body = "@tabs\nHeading text\n@file \"A\" card.vuego\n@file \"B\" card.yml";
        let (result, _, groups) = expand(body);

        assert_eq!(groups, 1);
        assert_eq!(result.html.matches(r#"role="tab" "#).count(), 2);
    }

    #[test]
    fn test_blank_line_closes_empty_group() {
        let body = "@tabs\n\n@file \"A\" style.css";
        let (result, _, groups) = expand(body);

        assert_eq!(groups, 0);
        assert!(result.html.ends_with(r#"<code class="hljs language-css"><pre>a { color: red; }</pre></code>"#));
    }

    #[test]
    fn test_group_flushed_at_end_of_input() {
        let (result, _, groups) = expand("@tabs\n@render \"P\" card.vuego");

        assert_eq!(groups, 1);
        assert!(result.html.contains(r#"role="tabpanel""#));
    }

    #[test]
    fn test_reopening_tabs_discards_previous_tabs() {
        let body = "@tabs\n@file \"A\" card.vuego\n@tabs\n@file \"B\" card.yml";
        let (result, _, groups) = expand(body);

        assert_eq!(groups, 1);
        assert!(!result.html.contains(">A</button>"));
        assert!(result.html.contains(">B</button>"));
        assert_eq!(result.html.matches(r#"role="tab" "#).count(), 1);
    }

    #[test]
    fn test_example_code_tab_is_html() {
        let (result, _, groups) = expand("@example style.css");

        assert_eq!(groups, 1);
        assert!(result.html.contains(r#"<code class="hljs language-html">"#));
        assert!(!result.html.contains("language-css"));
    }

    #[test]
    fn test_directive_keyword_needs_argument_separator() {
        let (result, _, groups) = expand("@renderer is not a directive");

        assert_eq!(groups, 0);
        assert_eq!(result.html, "<md>@renderer is not a directive</md>");
    }

    #[test]
    fn test_indented_directive_recognized() {
        let (result, _, _) = expand("   @file \"Styles\" style.css   ");
        assert!(result.html.starts_with("<code"));
    }

    #[test]
    fn test_ids_shared_across_calls() {
        let content = content();
        let markdown = RecordingMarkdown::default();
        let processor = DirectiveProcessor::new(&content, &VerbatimTemplate, &markdown);
        let mut ids = TabGroupIds::new();

        let first = processor.process("@example card.vuego", "guide", &mut ids);
        let second = processor.process("@example card.vuego", "guide", &mut ids);

        assert!(first.html.contains(r#"id="tabs-1""#));
        assert!(second.html.contains(r#"id="tabs-2""#));
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_template_receives_global_over_sidecar_data() {
        let content = content();
        let markdown = RecordingMarkdown::default();
        let seen: Mutex<Option<DataMap>> = Mutex::new(None);
        let templates = |_path: &str, _source: &str, data: &DataMap| -> Result<String, TemplateError> {
            *seen.lock().unwrap() = Some(data.clone());
            Ok("rendered".to_owned())
        };

        let mut global = DataMap::new();
        global.insert("title".to_owned(), Value::from("Global"));
        global.insert("site".to_owned(), Value::from("Docs"));

        let processor =
            DirectiveProcessor::new(&content, &templates, &markdown).with_global_data(global);
        let result = processor.process("@render \"P\" card.vuego", "guide", &mut TabGroupIds::new());

        assert_eq!(result.html, r#"<div class="preview">rendered</div>"#);
        let data = seen.lock().unwrap().clone().unwrap();
        assert_eq!(data.get("title"), Some(&Value::from("Global")));
        assert_eq!(data.get("site"), Some(&Value::from("Docs")));
    }

    #[test]
    fn test_template_error_is_comment() {
        let content = content();
        let markdown = RecordingMarkdown::default();
        let templates = |path: &str, _source: &str, _data: &DataMap| -> Result<String, TemplateError> {
            Err(TemplateError::new(path, "unexpected token"))
        };
        let processor = DirectiveProcessor::new(&content, &templates, &markdown);

        let result = processor.process("@render \"P\" card.vuego", "guide", &mut TabGroupIds::new());

        assert_eq!(
            result.html,
            r#"<div class="preview"><!-- render error: guide/card.vuego: unexpected token --></div>"#
        );
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_global_data_from_pattern() {
        let content = content().with_file("data/site.yml", "site: Docs");
        let markdown = RecordingMarkdown::default();
        let processor = DirectiveProcessor::new(&content, &VerbatimTemplate, &markdown)
            .with_global_data_from("data/*.yml");

        assert_eq!(processor.global_data.get("site"), Some(&Value::from("Docs")));
    }

    #[test]
    fn test_parse_directive() {
        assert_eq!(parse_directive("@tabs"), Some(Directive::Tabs));
        assert_eq!(parse_directive("@tabs extra"), None);
        assert_eq!(parse_directive(r#"@render "A" b"#), Some(Directive::Render(r#""A" b"#)));
        assert_eq!(parse_directive("@file x"), Some(Directive::File("x")));
        assert_eq!(parse_directive("@example x"), Some(Directive::Example("x")));
        assert_eq!(parse_directive("@file"), None);
        assert_eq!(parse_directive("plain"), None);
    }
}
