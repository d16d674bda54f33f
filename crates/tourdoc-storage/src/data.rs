//! Sidecar data parsing.
//!
//! Sidecar files (`index.yaml`, `index.json`, ...) supply the values a
//! template is rendered with. Both YAML and JSON are parsed into the same
//! [`DataMap`] shape.

use serde_json::{Map, Value};

/// Mapping from value name to value, as handed to template renderers.
pub type DataMap = Map<String, Value>;

/// Error type for sidecar data parsing.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// JSON syntax error.
    #[error("Invalid JSON in {name}: {source}")]
    Json {
        /// File name being parsed.
        name: String,
        /// Underlying parser error.
        source: serde_json::Error,
    },
    /// YAML syntax error.
    #[error("Invalid YAML in {name}: {source}")]
    Yaml {
        /// File name being parsed.
        name: String,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },
    /// The document parsed, but its top level is not a mapping.
    #[error("{name} must contain a mapping at the top level")]
    NotAMapping {
        /// File name being parsed.
        name: String,
    },
}

/// Parser turning structured-data files into a [`DataMap`].
pub trait DataParser: Send + Sync {
    /// Parse `content` read from the file `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the content is malformed or not a mapping.
    fn parse(&self, name: &str, content: &str) -> Result<DataMap, DataError>;
}

/// Default parser: `serde_json` for `.json` files, `serde_yaml` otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerdeDataParser;

impl DataParser for SerdeDataParser {
    fn parse(&self, name: &str, content: &str) -> Result<DataMap, DataError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(DataMap::new());
        }

        let value: Value = if name.ends_with(".json") {
            serde_json::from_str(trimmed).map_err(|source| DataError::Json {
                name: name.to_owned(),
                source,
            })?
        } else {
            serde_yaml::from_str(trimmed).map_err(|source| DataError::Yaml {
                name: name.to_owned(),
                source,
            })?
        };

        match value {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(DataMap::new()),
            _ => Err(DataError::NotAMapping {
                name: name.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_yaml() {
        let map = SerdeDataParser
            .parse("index.yaml", "name: World\nitems:\n  - a\n  - b\n")
            .unwrap();

        assert_eq!(map.get("name"), Some(&json!("World")));
        assert_eq!(map.get("items"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_parse_yml_nested() {
        let map = SerdeDataParser
            .parse("index.yml", "user:\n  name: Ada\n  admin: true\n")
            .unwrap();

        assert_eq!(map.get("user"), Some(&json!({"name": "Ada", "admin": true})));
    }

    #[test]
    fn test_parse_json() {
        let map = SerdeDataParser
            .parse("first.json", r#"{"name": "test", "count": 3}"#)
            .unwrap();

        assert_eq!(map.get("name"), Some(&json!("test")));
        assert_eq!(map.get("count"), Some(&json!(3)));
    }

    #[test]
    fn test_parse_empty_is_empty_map() {
        assert!(SerdeDataParser.parse("index.yaml", "  \n").unwrap().is_empty());
        assert!(SerdeDataParser.parse("index.yaml", "~").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = SerdeDataParser.parse("bad.json", "{ nope").unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = SerdeDataParser.parse("bad.yaml", "key: [unclosed").unwrap_err();
        assert!(matches!(err, DataError::Yaml { .. }));
    }

    #[test]
    fn test_parse_scalar_is_not_mapping() {
        let err = SerdeDataParser.parse("list.yaml", "- a\n- b").unwrap_err();
        assert!(matches!(err, DataError::NotAMapping { .. }));
    }
}
