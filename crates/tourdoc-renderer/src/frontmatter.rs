//! Front matter for docs pages.
//!
//! A docs page may start with a YAML block fenced by `---` lines:
//!
//! ```markdown
//! ---
//! title: Tabs
//! subtitle: Grouping previews and code
//! layout: wide
//! ---
//!
//! Body text.
//! ```

use serde::Deserialize;

/// Metadata from a docs page's front matter.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocMeta {
    /// Page title.
    pub title: Option<String>,
    /// Page subtitle, also used as the description.
    pub subtitle: Option<String>,
    /// Layout name (e.g. `page`) or a template path.
    pub layout: Option<String>,
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
#[error("Invalid front matter: {0}")]
pub struct FrontMatterError(#[from] serde_yaml::Error);

/// A docs page split into metadata and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Parsed front matter (all fields empty when there is none).
    pub meta: DocMeta,
    /// Markdown body with the front matter removed.
    pub body: String,
}

impl Document {
    /// Split `content` into front matter and body.
    ///
    /// Content that doesn't start with `---`, or has no closing `---`, is
    /// returned as the body unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use tourdoc_renderer::Document;
    ///
    /// let doc = Document::parse("---\ntitle: Tabs\n---\n\nBody").unwrap();
    /// assert_eq!(doc.meta.title.as_deref(), Some("Tabs"));
    /// assert_eq!(doc.body, "Body");
    /// ```
    pub fn parse(content: &str) -> Result<Self, FrontMatterError> {
        let unchanged = || Self {
            meta: DocMeta::default(),
            body: content.to_owned(),
        };

        if !content.starts_with("---") {
            return Ok(unchanged());
        }

        let mut parts = content.splitn(3, "---");
        let (Some(_), Some(yaml), Some(body)) = (parts.next(), parts.next(), parts.next()) else {
            return Ok(unchanged());
        };

        let meta = if yaml.trim().is_empty() {
            DocMeta::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        Ok(Self {
            meta,
            body: body.trim().to_owned(),
        })
    }

    /// Layout template path for this page.
    ///
    /// Bare layout names resolve to `layouts/{name}.vuego`; `page` is the default.
    #[must_use]
    pub fn layout_path(&self) -> String {
        let name = self.meta.layout.as_deref().unwrap_or("page");
        if name.contains(".vuego") {
            name.to_owned()
        } else {
            format!("layouts/{name}.vuego")
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_full_front_matter() {
        let doc = Document::parse(
            "---\ntitle: Tabs\nsubtitle: Grouping\nlayout: wide\n---\n\n# Heading\n\nText\n",
        )
        .unwrap();

        assert_eq!(
            doc.meta,
            DocMeta {
                title: Some("Tabs".to_owned()),
                subtitle: Some("Grouping".to_owned()),
                layout: Some("wide".to_owned()),
            }
        );
        assert_eq!(doc.body, "# Heading\n\nText");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let doc = Document::parse("# Plain\n\nText\n").unwrap();

        assert_eq!(doc.meta, DocMeta::default());
        assert_eq!(doc.body, "# Plain\n\nText\n");
    }

    #[test]
    fn test_parse_unclosed_front_matter() {
        let doc = Document::parse("---\ntitle: Open").unwrap();

        assert_eq!(doc.meta, DocMeta::default());
        assert_eq!(doc.body, "---\ntitle: Open");
    }

    #[test]
    fn test_parse_empty_front_matter() {
        let doc = Document::parse("---\n---\nBody").unwrap();
        assert_eq!(doc.meta, DocMeta::default());
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = Document::parse("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(err.to_string().starts_with("Invalid front matter"));
    }

    #[test]
    fn test_layout_path() {
        let doc = Document::parse("Body").unwrap();
        assert_eq!(doc.layout_path(), "layouts/page.vuego");

        let doc = Document::parse("---\nlayout: wide\n---\nBody").unwrap();
        assert_eq!(doc.layout_path(), "layouts/wide.vuego");

        let doc = Document::parse("---\nlayout: custom/shell.vuego\n---\nBody").unwrap();
        assert_eq!(doc.layout_path(), "custom/shell.vuego");
    }
}
