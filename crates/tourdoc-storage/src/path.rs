//! Lexical helpers for `/`-separated content paths.

/// Join a relative path onto a directory and normalize the result.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment when
/// there is one. A `..` that cannot be resolved is kept so backends can reject it.
/// An empty result is returned as `"."`.
///
/// # Examples
///
/// ```
/// use tourdoc_storage::join_path;
///
/// assert_eq!(join_path("basics", "index.vuego"), "basics/index.vuego");
/// assert_eq!(join_path(".", "guide/tabs.md"), "guide/tabs.md");
/// assert_eq!(join_path("guide", "../data/site.yml"), "data/site.yml");
/// ```
pub fn join_path(dir: &str, rel: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in dir.split('/').chain(rel.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        ".".to_owned()
    } else {
        segments.join("/")
    }
}

/// Last component of a path.
///
/// ```
/// use tourdoc_storage::base_name;
///
/// assert_eq!(base_name("nested/dir/first.vuego"), "first.vuego");
/// assert_eq!(base_name("first.vuego"), "first.vuego");
/// ```
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Extension of the last path component, without the dot.
///
/// Returns `None` when the file name has no dot.
pub fn extension(path: &str) -> Option<&str> {
    let name = base_name(path);
    name.rfind('.').map(|idx| &name[idx + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path_simple() {
        assert_eq!(join_path("basics", "first.vuego"), "basics/first.vuego");
    }

    #[test]
    fn test_join_path_root_dir() {
        assert_eq!(join_path(".", "first.vuego"), "first.vuego");
        assert_eq!(join_path("", "first.vuego"), "first.vuego");
    }

    #[test]
    fn test_join_path_nested_reference() {
        assert_eq!(
            join_path("basics", "parts/header.vuego"),
            "basics/parts/header.vuego"
        );
    }

    #[test]
    fn test_join_path_resolves_parent() {
        assert_eq!(join_path("a/b", "../c"), "a/c");
        assert_eq!(join_path("a", "./b/./c"), "a/b/c");
    }

    #[test]
    fn test_join_path_keeps_unresolved_parent() {
        assert_eq!(join_path("a", "../../etc/passwd"), "../etc/passwd");
    }

    #[test]
    fn test_join_path_empty() {
        assert_eq!(join_path("", ""), ".");
        assert_eq!(join_path("a", ".."), ".");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/c.json"), "c.json");
        assert_eq!(base_name("c.json"), "c.json");
        assert_eq!(base_name("dir/"), "dir");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("basics/index.vuego"), Some("vuego"));
        assert_eq!(extension("data.yml"), Some("yml"));
        assert_eq!(extension("archive.tar.gz"), Some("gz"));
        assert_eq!(extension("Makefile"), None);
        assert_eq!(extension("some.dir/Makefile"), None);
    }
}
