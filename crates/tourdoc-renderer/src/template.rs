//! Template rendering collaborator.

use tourdoc_storage::DataMap;

/// Error returned by a [`TemplateRenderer`].
#[derive(Debug, thiserror::Error)]
#[error("{path}: {message}")]
pub struct TemplateError {
    /// Content path of the template that failed.
    pub path: String,
    /// Renderer-specific failure description.
    pub message: String,
}

impl TemplateError {
    /// Create a template error.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Renders a template file with a set of named values.
///
/// The template language is opaque to this crate. Implemented for closures
/// with the same signature as [`render`](Self::render).
pub trait TemplateRenderer: Send + Sync {
    /// Render `source`, read from `path`, with `data`.
    fn render(&self, path: &str, source: &str, data: &DataMap) -> Result<String, TemplateError>;
}

impl<F> TemplateRenderer for F
where
    F: Fn(&str, &str, &DataMap) -> Result<String, TemplateError> + Send + Sync,
{
    fn render(&self, path: &str, source: &str, data: &DataMap) -> Result<String, TemplateError> {
        self(path, source, data)
    }
}

/// Template renderer that returns the template source unchanged.
///
/// Used when no template engine is wired in, so previews still show markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerbatimTemplate;

impl TemplateRenderer for VerbatimTemplate {
    fn render(&self, _path: &str, source: &str, _data: &DataMap) -> Result<String, TemplateError> {
        Ok(source.to_owned())
    }
}
