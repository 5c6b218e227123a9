//! Streaming assembly API: yield sections one file at a time.
//!
//! [`sections`] performs discovery and ordering up front, then returns an
//! iterator that reads, rewrites and renders one file per call to `next`, in
//! document order. The eager [`crate::convert::assemble`] is a fold over this
//! iterator; use the iterator directly to write sections out incrementally or
//! to inspect them without building the whole document.
//!
//! The iterator stops after the first error: the assembler never skips a file.

use crate::config::ManualConfig;
use crate::convert::render_section;
use crate::document::{Section, SourcePath};
use crate::error::ManualError;
use crate::pipeline::{discover, order};
use std::path::PathBuf;
use tracing::info;

/// Lazily renders the ordered source files into [`Section`]s.
pub struct SectionIter {
    files: Vec<SourcePath>,
    next_index: usize,
    working_dir: PathBuf,
    config: ManualConfig,
    failed: bool,
}

impl SectionIter {
    /// Number of files the iterator will render in total.
    pub fn total(&self) -> usize {
        self.files.len()
    }
}

impl Iterator for SectionIter {
    type Item = Result<Section, ManualError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let source = self.files.get(self.next_index)?;
        self.next_index += 1;

        let index = self.next_index;
        let total = self.files.len();
        let cb = self.config.progress_callback.as_ref();

        if let Some(cb) = cb {
            cb.on_file_start(index, total, source.as_str());
        }
        let result = render_section(source, &self.working_dir, &self.config);
        match &result {
            Ok(section) => {
                if let Some(cb) = cb {
                    cb.on_file_complete(index, total, source.as_str(), section.html.len());
                }
            }
            Err(e) => {
                self.failed = true;
                if let Some(cb) = cb {
                    cb.on_file_error(index, total, source.as_str(), &e.to_string());
                }
            }
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.failed {
            0
        } else {
            self.files.len() - self.next_index
        };
        (0, Some(remaining))
    }
}

/// Discover and order the manual's files, returning a lazy section iterator.
///
/// # Errors
/// Only fails if the working directory cannot be determined. A missing root
/// directory yields an empty iterator.
pub fn sections(config: &ManualConfig) -> Result<SectionIter, ManualError> {
    let working_dir = config.resolve_working_dir()?;

    let mut files = discover::discover_markdown_files(&config.root_dir, &working_dir);
    order::sort_sources(&mut files, &config.primary_segment);
    info!("Found {} Markdown files under {}", files.len(), config.root_dir.display());

    if let Some(ref cb) = config.progress_callback {
        cb.on_assembly_start(files.len());
    }

    Ok(SectionIter {
        files,
        next_index: 0,
        working_dir,
        config: config.clone(),
        failed: false,
    })
}
