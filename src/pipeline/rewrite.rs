//! Content rewriting: make one file's Markdown work inside the combined manual.
//!
//! Two independent passes run over the raw text of each file, in this order:
//!
//! 1. **Links**: every inline `[label](target)` is classified once into a
//!    [`LinkTarget`] and rewritten: images are re-rooted at the file's
//!    directory, repository URLs and relative paths become `#anchor` links to
//!    the section holding that file, other web URLs are left alone.
//! 2. **Headings**: every heading marker gains one `#`, so each file's `#`
//!    title nests under the manual's cover title.
//!
//! Both passes are pure string functions. Text that does not match a pattern
//! passes through untouched; nothing here can fail.

use crate::document::SourcePath;
use crate::pipeline::anchor;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

/// Extension that marks a link target as a co-located image.
pub const IMAGE_EXTENSION: &str = ".png";

/// Settings the link pass needs beyond the file itself.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    /// Prefix of repository URLs that point at files inside the manual.
    pub repo_base_url: &'a str,
    /// `/`-separated absolute working directory that resolved paths are
    /// expressed relative to.
    pub working_dir: &'a str,
}

/// Apply link rewriting, then heading normalisation, to one file's text.
pub fn rewrite_document(text: &str, source: &SourcePath, ctx: &RewriteContext<'_>) -> String {
    let s = rewrite_links(text, source, ctx);
    normalize_headings(&s)
}

// ── Links ────────────────────────────────────────────────────────────────────

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

/// What a link target refers to. Classification order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// A `.png` next to the current file.
    Image(&'a str),
    /// A file in the repository, addressed by URL; holds the project path.
    Repository(String),
    /// Any other `http…` URL.
    External,
    /// A path relative to the current file's directory.
    Relative(&'a str),
}

/// Classify `target`. Tested in order: image, repository URL, external URL,
/// relative path.
pub fn classify<'a>(target: &'a str, repo_base_url: &str) -> LinkTarget<'a> {
    if extension(target) == IMAGE_EXTENSION {
        return LinkTarget::Image(target);
    }
    if let Some(rest) = target.strip_prefix(repo_base_url) {
        let mut path = rest.trim_end_matches('/').to_string();
        if extension(&path).is_empty() {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str("README.md");
        }
        return LinkTarget::Repository(path);
    }
    if target.starts_with("http") {
        return LinkTarget::External;
    }
    LinkTarget::Relative(target)
}

/// Rewrite every inline link and image in `text`.
pub fn rewrite_links(text: &str, source: &SourcePath, ctx: &RewriteContext<'_>) -> String {
    RE_LINK
        .replace_all(text, |caps: &Captures<'_>| {
            let label = &caps[1];
            let target = &caps[2];
            let kind = classify(target, ctx.repo_base_url);
            trace!("{}: link {:?} classified as {:?}", source, target, kind);
            match kind {
                LinkTarget::Image(img) => {
                    format!("[{}]({})", label, anchor::join(source.dir(), img))
                }
                LinkTarget::Repository(path) => {
                    format!("[{}](#{})", label, anchor::anchor_id(&path))
                }
                LinkTarget::External => caps[0].to_string(),
                LinkTarget::Relative(rel) => {
                    let resolved = anchor::resolve(source.dir(), rel, ctx.working_dir);
                    format!("[{}](#{})", label, anchor::anchor_id(&resolved))
                }
            }
        })
        .into_owned()
}

/// Extension of the last path segment including its dot, or `""`.
///
/// Leading dots of the segment do not start an extension (`.png` has none).
fn extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(idx) => &name[stem_start + idx..],
        None => "",
    }
}

// ── Headings ─────────────────────────────────────────────────────────────────

// Leading whitespace is matched within the line and written back unchanged,
// so blank lines above a heading survive and a `#` inside an indented code
// block stays code (gaining a `#`) instead of being pulled out as a heading.
static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([ \t]*)(#+)").unwrap());

/// Demote every heading one level by appending `#` to its marker.
///
/// Not idempotent: each pass adds another `#`.
pub fn normalize_headings(text: &str) -> String {
    RE_HEADING.replace_all(text, "${1}${2}#").into_owned()
}
