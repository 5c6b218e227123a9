//! Document model: source file paths and rendered sections.

use crate::pipeline::anchor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A Markdown source file, identified by a `/`-separated path relative to the
/// working directory (absolute only when the root lies outside it).
///
/// The same string is used for ordering, for resolving sibling references and,
/// after [`anchor::anchor_id`], as the section id, so it is stored in one
/// canonical separator style on every platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePath(String);

impl SourcePath {
    /// Wrap an already `/`-separated path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Convert a filesystem path, joining its components with `/`.
    pub fn from_path(path: &Path) -> Self {
        let mut out = String::new();
        for component in path.components() {
            match component {
                Component::Prefix(p) => out.push_str(&p.as_os_str().to_string_lossy()),
                Component::RootDir => out.push('/'),
                Component::CurDir => {}
                Component::ParentDir => push_segment(&mut out, ".."),
                Component::Normal(s) => push_segment(&mut out, &s.to_string_lossy()),
            }
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part of the path, without a trailing separator.
    ///
    /// Empty for a bare file name, `/` for a file at the filesystem root.
    pub fn dir(&self) -> &str {
        match self.0.rsplit_once('/') {
            Some(("", _)) => "/",
            Some((dir, _)) => dir,
            None => "",
        }
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// The in-document anchor id of this file's section.
    pub fn anchor_id(&self) -> String {
        anchor::anchor_id(&self.0)
    }

    /// Location on disk, resolved against `working_dir`.
    pub fn to_fs_path(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(&self.0)
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn push_segment(out: &mut String, segment: &str) {
    if !out.is_empty() && !out.ends_with('/') {
        out.push('/');
    }
    out.push_str(segment);
}

/// The HTML rendering of one Markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub source: SourcePath,
    /// HTML fragment produced by the Markdown renderer.
    pub html: String,
    /// Size of the source Markdown as read from disk.
    pub markdown_bytes: usize,
}

impl Section {
    pub fn id(&self) -> String {
        self.source.anchor_id()
    }

    /// The fragment wrapped in its `<section>` container.
    pub fn to_html(&self) -> String {
        format!("<section id=\"{}\">{}</section>", self.id(), self.html)
    }
}
