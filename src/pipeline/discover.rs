//! File discovery: enumerate the Markdown files under the root directory.
//!
//! The walk is tolerant. A root that does not exist produces an empty list
//! (and therefore a manual with only the cover), and entries that cannot be
//! read are logged and skipped rather than aborting the run. Only the later
//! read of a discovered file is allowed to fail fatally.

use crate::document::SourcePath;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Check if a file name has a Markdown extension (`.md`, any case).
pub fn is_markdown(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".md")
}

/// Recursively collect every Markdown file under `working_dir.join(root)`.
///
/// Returned paths are relative to `working_dir` when the root lies inside it,
/// absolute otherwise. Entries are visited in file-name order so repeated
/// runs see the same sequence, but callers must not rely on the order:
/// [`crate::pipeline::order`] defines document order.
pub fn discover_markdown_files(root: &Path, working_dir: &Path) -> Vec<SourcePath> {
    let root_dir = working_dir.join(root);
    if !root_dir.is_dir() {
        debug!("Root directory {} does not exist; nothing to assemble", root_dir.display());
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root_dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if !is_markdown(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(working_dir).unwrap_or(path);
        files.push(SourcePath::from_path(relative));
    }

    debug!("Discovered {} Markdown files under {}", files.len(), root_dir.display());
    files
}
