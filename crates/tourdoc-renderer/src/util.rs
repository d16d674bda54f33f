//! Shared helpers for HTML output.

/// Escape text for use in HTML content and attribute values.
///
/// ```
/// use tourdoc_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap text in an HTML comment.
///
/// `--` sequences are split so the text can't terminate the comment early.
pub(crate) fn html_comment(text: &str) -> String {
    format!("<!-- {} -->", text.replace("--", "- -"))
}
