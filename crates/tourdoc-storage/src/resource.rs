//! Resource resolution against a content tree.
//!
//! [`ResourceLoader`] resolves referenced files relative to a directory and
//! finds the sidecar data file that belongs to a template.

use std::collections::BTreeMap;

use glob::Pattern;

use crate::data::{DataMap, DataParser};
use crate::path::{base_name, join_path};
use crate::storage::{ContentFs, StorageError};

/// File extension of template files.
pub const TEMPLATE_EXTENSION: &str = ".vuego";

/// Sidecar data extensions in preference order. First hit wins.
pub const DATA_EXTENSIONS: [&str; 3] = [".yaml", ".yml", ".json"];

/// Default glob for site-wide data files merged into every render.
pub const DEFAULT_GLOBAL_DATA: &str = "data/*.yml";

/// A file read from the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Base file name (directory components discarded).
    pub name: String,
    /// Full content path the file was read from.
    pub path: String,
    /// File content.
    pub content: String,
}

/// Resolves relative resource paths against a [`ContentFs`].
#[derive(Clone, Copy)]
pub struct ResourceLoader<'a> {
    content: &'a dyn ContentFs,
}

impl<'a> ResourceLoader<'a> {
    /// Create a loader over the given content tree.
    #[must_use]
    pub fn new(content: &'a dyn ContentFs) -> Self {
        Self { content }
    }

    /// Read `rel` resolved under `dir`.
    pub fn read(&self, dir: &str, rel: &str) -> Result<Resource, StorageError> {
        let path = join_path(dir, rel);
        let content = self.content.read_to_string(&path)?;
        Ok(Resource {
            name: base_name(rel).to_owned(),
            path,
            content,
        })
    }

    /// Find the sidecar data file for a template path.
    ///
    /// Only template paths have sidecars. Siblings are tried in
    /// [`DATA_EXTENSIONS`] order and the first readable one is returned.
    pub fn sidecar(&self, template_path: &str) -> Option<Resource> {
        let stem = template_path.strip_suffix(TEMPLATE_EXTENSION)?;

        DATA_EXTENSIONS.iter().find_map(|ext| {
            let path = format!("{stem}{ext}");
            let content = self.content.read_to_string(&path).ok()?;
            Some(Resource {
                name: base_name(&path).to_owned(),
                path,
                content,
            })
        })
    }

    /// Read `rel` under `dir` and store it in `files` by base name.
    ///
    /// A template's sidecar data file is stored alongside it under its own
    /// base name. Unreadable references are skipped. Existing entries with
    /// the same name are overwritten.
    pub fn attach(&self, dir: &str, rel: &str, files: &mut BTreeMap<String, String>) {
        let resource = match self.read(dir, rel) {
            Ok(resource) => resource,
            Err(e) => {
                tracing::debug!(dir, reference = rel, error = %e, "Dropping unreadable file reference");
                return;
            }
        };

        let sidecar = self.sidecar(&resource.path);
        files.insert(resource.name, resource.content);

        if let Some(data) = sidecar {
            files.insert(data.name, data.content);
        }
    }

    /// Parse the sidecar data of a template.
    ///
    /// Returns an empty map when there is no sidecar or it fails to parse.
    pub fn template_data(&self, template_path: &str, parser: &dyn DataParser) -> DataMap {
        let Some(sidecar) = self.sidecar(template_path) else {
            return DataMap::new();
        };

        parser
            .parse(&sidecar.name, &sidecar.content)
            .unwrap_or_else(|e| {
                tracing::warn!(path = %sidecar.path, error = %e, "Ignoring malformed sidecar data");
                DataMap::new()
            })
    }

    /// Merge every data file matching `pattern` into one map.
    ///
    /// Only files directly inside the pattern's directory are considered.
    /// Files are merged in name order, later keys win. A missing directory
    /// or an invalid pattern yields an empty map.
    pub fn global_data(&self, pattern: &str, parser: &dyn DataParser) -> DataMap {
        let mut merged = DataMap::new();

        let matcher = match Pattern::new(pattern) {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::warn!(pattern, error = %e, "Invalid global data pattern");
                return merged;
            }
        };

        let dir = pattern.rsplit_once('/').map_or(".", |(dir, _)| dir);
        let Ok(entries) = self.content.list_dir(dir) else {
            return merged;
        };

        for entry in entries.into_iter().filter(|e| !e.is_dir) {
            let path = join_path(dir, &entry.name);
            if !matcher.matches(&path) {
                continue;
            }
            let Ok(content) = self.content.read_to_string(&path) else {
                continue;
            };
            match parser.parse(&entry.name, &content) {
                Ok(map) => merged.extend(map),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Ignoring malformed global data");
                }
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::data::SerdeDataParser;
    use crate::storage::DirEntry;

    /// Minimal in-memory tree so these tests don't depend on the `mock` feature.
    struct Files(BTreeMap<&'static str, &'static str>);

    impl ContentFs for Files {
        fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, StorageError> {
            let prefix = format!("{path}/");
            let entries: Vec<DirEntry> = self
                .0
                .keys()
                .filter_map(|k| k.strip_prefix(prefix.as_str()))
                .filter(|rest| !rest.contains('/'))
                .map(DirEntry::file)
                .collect();
            if entries.is_empty() {
                return Err(StorageError::not_found(path));
            }
            Ok(entries)
        }

        fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
            self.0
                .get(path)
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| StorageError::not_found(path))
        }

        fn is_dir(&self, _path: &str) -> bool {
            false
        }
    }

    fn files(entries: &[(&'static str, &'static str)]) -> Files {
        Files(entries.iter().copied().collect())
    }

    #[test]
    fn test_read_resolves_under_dir() {
        let fs = files(&[("basics/parts/header.vuego", "<h1/>")]);
        let loader = ResourceLoader::new(&fs);

        let resource = loader.read("basics", "parts/header.vuego").unwrap();

        assert_eq!(resource.name, "header.vuego");
        assert_eq!(resource.path, "basics/parts/header.vuego");
        assert_eq!(resource.content, "<h1/>");
    }

    #[test]
    fn test_read_missing() {
        let fs = files(&[]);
        let loader = ResourceLoader::new(&fs);

        assert!(loader.read("basics", "nope.vuego").unwrap_err().is_not_found());
    }

    #[test]
    fn test_sidecar_prefers_yaml() {
        let fs = files(&[
            ("basics/first.yaml", "from: yaml"),
            ("basics/first.yml", "from: yml"),
            ("basics/first.json", r#"{"from": "json"}"#),
        ]);
        let loader = ResourceLoader::new(&fs);

        let sidecar = loader.sidecar("basics/first.vuego").unwrap();
        assert_eq!(sidecar.name, "first.yaml");
    }

    #[test]
    fn test_sidecar_falls_back_in_order() {
        let fs = files(&[
            ("basics/first.yml", "from: yml"),
            ("basics/first.json", r#"{"from": "json"}"#),
        ]);
        let loader = ResourceLoader::new(&fs);
        assert_eq!(loader.sidecar("basics/first.vuego").unwrap().name, "first.yml");

        let fs = files(&[("basics/first.json", "{}")]);
        let loader = ResourceLoader::new(&fs);
        assert_eq!(loader.sidecar("basics/first.vuego").unwrap().name, "first.json");
    }

    #[test]
    fn test_sidecar_only_for_templates() {
        let fs = files(&[("basics/style.yaml", "a: 1")]);
        let loader = ResourceLoader::new(&fs);

        assert!(loader.sidecar("basics/style.css").is_none());
    }

    #[test]
    fn test_attach_template_with_sidecar() {
        let fs = files(&[
            ("basics/first.vuego", "<div>Hello</div>"),
            ("basics/first.json", r#"{"name": "test"}"#),
        ]);
        let loader = ResourceLoader::new(&fs);
        let mut attached = BTreeMap::new();

        loader.attach("basics", "first.vuego", &mut attached);

        assert_eq!(attached.len(), 2);
        assert_eq!(attached["first.vuego"], "<div>Hello</div>");
        assert_eq!(attached["first.json"], r#"{"name": "test"}"#);
    }

    #[test]
    fn test_attach_missing_is_silent() {
        let fs = files(&[]);
        let loader = ResourceLoader::new(&fs);
        let mut attached = BTreeMap::new();

        loader.attach("basics", "missing.vuego", &mut attached);

        assert!(attached.is_empty());
    }

    #[test]
    fn test_attach_basename_collision_last_wins() {
        let fs = files(&[("basics/a/x.css", "first"), ("basics/b/x.css", "second")]);
        let loader = ResourceLoader::new(&fs);
        let mut attached = BTreeMap::new();

        loader.attach("basics", "a/x.css", &mut attached);
        loader.attach("basics", "b/x.css", &mut attached);

        assert_eq!(attached.len(), 1);
        assert_eq!(attached["x.css"], "second");
    }

    #[test]
    fn test_template_data_parses_sidecar() {
        let fs = files(&[("guide/card.yml", "title: Card")]);
        let loader = ResourceLoader::new(&fs);

        let data = loader.template_data("guide/card.vuego", &SerdeDataParser);

        assert_eq!(data.get("title"), Some(&json!("Card")));
    }

    #[test]
    fn test_template_data_malformed_is_empty() {
        let fs = files(&[("guide/card.json", "{ broken")]);
        let loader = ResourceLoader::new(&fs);

        assert!(loader.template_data("guide/card.vuego", &SerdeDataParser).is_empty());
    }

    #[test]
    fn test_global_data_merges_matching_files() {
        let fs = files(&[
            ("data/menu.yml", "menu: [home]"),
            ("data/site.yml", "site: Docs\nmenu: [docs]"),
            ("data/notes.txt", "ignored: true"),
        ]);
        let loader = ResourceLoader::new(&fs);

        let data = loader.global_data(DEFAULT_GLOBAL_DATA, &SerdeDataParser);

        assert_eq!(data.get("site"), Some(&json!("Docs")));
        assert_eq!(data.get("menu"), Some(&json!(["docs"])));
        assert!(data.get("ignored").is_none());
    }

    #[test]
    fn test_global_data_missing_dir() {
        let fs = files(&[]);
        let loader = ResourceLoader::new(&fs);

        assert!(loader.global_data(DEFAULT_GLOBAL_DATA, &SerdeDataParser).is_empty());
    }
}
