//! Directive argument tokenizing.

/// Split directive arguments into tokens.
///
/// Tokens are runs of non-whitespace or double-quoted spans. Quotes are
/// removed and quoted text is taken verbatim, with no escape processing. An
/// unterminated quote takes the rest of the input as one token.
///
/// # Example
///
/// ```
/// use tourdoc_renderer::tokenize;
///
/// assert_eq!(tokenize(r#""Live preview" card.vuego"#), vec!["Live preview", "card.vuego"]);
/// assert_eq!(tokenize(r#"X "Y"#), vec!["X", "Y"]);
/// assert!(tokenize("   ").is_empty());
/// ```
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut remaining = input.trim();

    while !remaining.is_empty() {
        if let Some(quoted) = remaining.strip_prefix('"') {
            let Some(end) = quoted.find('"') else {
                tokens.push(quoted.to_owned());
                break;
            };
            tokens.push(quoted[..end].to_owned());
            remaining = quoted[end + 1..].trim_start();
        } else {
            let Some(end) = remaining.find([' ', '\t']) else {
                tokens.push(remaining.to_owned());
                break;
            };
            tokens.push(remaining[..end].to_owned());
            remaining = remaining[end..].trim_start();
        }
    }

    tokens
}
