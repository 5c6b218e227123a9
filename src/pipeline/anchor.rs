//! Anchor ids and lexical path resolution.
//!
//! Every section is wrapped as `<section id="ID">` and every rewritten
//! cross-file link points at `#ID`. Both sides go through [`anchor_id`], so a
//! link resolves exactly when its target file was assembled.
//!
//! Paths here are `/`-separated strings. Resolution is purely lexical: `..`
//! is folded against the preceding segment without touching the filesystem,
//! which keeps link rewriting free of I/O.

/// Flatten a `/`-separated path into a section id (`a/b/c.md` → `a__b__c.md`).
pub fn anchor_id(path: &str) -> String {
    path.replace('/', "__")
}

/// Join `target` onto `dir` the way a filesystem join would: an absolute
/// target replaces the directory, an empty directory yields the target.
pub fn join(dir: &str, target: &str) -> String {
    if target.starts_with('/') || dir.is_empty() {
        target.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{target}")
    } else {
        format!("{dir}/{target}")
    }
}

/// Collapse empty and `.` segments and fold `..` into its parent.
///
/// Leading `..` segments of a relative path are kept; `..` at the root of an
/// absolute path is dropped. An empty result is `.`.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Express absolute `path` relative to absolute `base` (both normalized).
pub fn relative_to(path: &str, base: &str) -> String {
    let path_segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let base_segments: Vec<&str> = base
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    let common = path_segments
        .iter()
        .zip(&base_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; base_segments.len() - common];
    parts.extend(&path_segments[common..]);

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Resolve `target`, written inside a file living in `dir`, to a path
/// relative to `working_dir`.
///
/// The concatenation is made absolute against `working_dir` first, so a path
/// that climbs out of the working directory and re-enters it by name lands on
/// the same file as the direct route.
pub fn resolve(dir: &str, target: &str, working_dir: &str) -> String {
    let combined = if dir.is_empty() {
        target.to_string()
    } else {
        format!("{dir}/{target}")
    };
    let base = normalize(working_dir);
    let absolute = if combined.starts_with('/') {
        normalize(&combined)
    } else {
        normalize(&join(&base, &combined))
    };
    relative_to(&absolute, &base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_replaces_every_separator() {
        assert_eq!(anchor_id("src/engine/README.md"), "src__engine__README.md");
        assert_eq!(anchor_id("plain.md"), "plain.md");
    }

    #[test]
    fn join_behaves_like_a_path_join() {
        assert_eq!(join("docs", "foo.png"), "docs/foo.png");
        assert_eq!(join("docs/", "foo.png"), "docs/foo.png");
        assert_eq!(join("", "foo.png"), "foo.png");
        assert_eq!(join("docs", "/abs/foo.png"), "/abs/foo.png");
    }

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(normalize("docs/a/../other.md"), "docs/other.md");
        assert_eq!(normalize("docs/./a//b.md"), "docs/a/b.md");
        assert_eq!(normalize("a/../../x.md"), "../x.md");
        assert_eq!(normalize("../../x.md"), "../../x.md");
        assert_eq!(normalize("a/.."), ".");
        assert_eq!(normalize("/../etc/x"), "/etc/x");
        assert_eq!(normalize("/a/b/../c"), "/a/c");
    }

    #[test]
    fn relative_to_walks_up_and_down() {
        assert_eq!(relative_to("/home/u/proj/docs/a.md", "/home/u/proj"), "docs/a.md");
        assert_eq!(relative_to("/home/u/other/a.md", "/home/u/proj"), "../other/a.md");
        assert_eq!(relative_to("/home/u/proj", "/home/u/proj"), ".");
        assert_eq!(relative_to("/a.md", "/"), "a.md");
        assert_eq!(relative_to("docs/a.md", "."), "docs/a.md");
    }

    #[test]
    fn resolve_relative_target() {
        assert_eq!(resolve("docs/a", "../other.md", "/w"), "docs/other.md");
        assert_eq!(resolve("docs/a", "b/c.md", "/w"), "docs/a/b/c.md");
        assert_eq!(resolve("docs", "../../up.md", "/w"), "../up.md");
    }

    #[test]
    fn resolve_absolute_source_against_working_dir() {
        assert_eq!(
            resolve("/w/papers/doc", "../intro.md", "/w"),
            "papers/intro.md"
        );
    }

    #[test]
    fn resolve_reentering_working_dir_by_name() {
        assert_eq!(
            resolve("papers/doc", "../../../w/papers/b.md", "/w"),
            "papers/b.md"
        );
        assert_eq!(resolve("docs", "../../w/docs/x.md", "/w"), "docs/x.md");
    }

    #[test]
    fn resolve_above_filesystem_root_is_clamped() {
        assert_eq!(resolve("a", "../../../../x.md", "/w"), "../x.md");
    }

    #[test]
    fn resolve_absolute_target_inside_relative_dir_is_nested() {
        // The directory and target are concatenated, not path-joined.
        assert_eq!(resolve("docs", "/abs/x.md", "/w"), "docs/abs/x.md");
    }
}
