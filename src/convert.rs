//! Eager (full-document) assembly entry points.
//!
//! [`assemble`] drives the whole pipeline and returns the finished HTML;
//! [`assemble_to_file`] and [`assemble_to_pdf`] add the two ways of delivering
//! it. All of them are all-or-nothing: the first unreadable file aborts the
//! run and nothing is written.

use crate::config::ManualConfig;
use crate::document::{Section, SourcePath};
use crate::error::ManualError;
use crate::output::{AssemblyStats, ManualOutput, SectionSummary};
use crate::pipeline::render::render_markdown;
use crate::pipeline::rewrite::{rewrite_document, RewriteContext};
use crate::stream::sections;
use crate::template;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Assemble the manual described by `config`.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Returns `Err(ManualError)` if any discovered file cannot be read, or if
/// the working directory cannot be determined. A missing root directory is
/// not an error: the result is the document shell with only the cover.
pub fn assemble(config: &ManualConfig) -> Result<ManualOutput, ManualError> {
    let total_start = Instant::now();
    info!("Assembling manual from {}", config.root_dir.display());

    // ── Step 1: Discover and order ───────────────────────────────────────
    let discover_start = Instant::now();
    let iter = sections(config)?;
    let discover_duration_ms = discover_start.elapsed().as_millis() as u64;

    // ── Step 2: Rewrite and render every file, in order ──────────────────
    debug!("Rendering {} sections", iter.total());
    let render_start = Instant::now();
    let rendered: Vec<Section> = iter.collect::<Result<_, _>>()?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    // ── Step 3: Wrap in the document shell ───────────────────────────────
    let body: String = rendered.iter().map(Section::to_html).collect();
    let html = template::wrap_document(&body);

    let summaries: Vec<SectionSummary> = rendered.iter().map(SectionSummary::from).collect();
    let stats = AssemblyStats {
        file_count: summaries.len(),
        total_markdown_bytes: summaries.iter().map(|s| s.markdown_bytes).sum(),
        total_html_bytes: html.len(),
        discover_duration_ms,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Assembly complete: {} files, {} bytes of HTML, {}ms total",
        stats.file_count, stats.total_html_bytes, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_assembly_complete(stats.file_count, html.len());
    }

    Ok(ManualOutput {
        html,
        sections: summaries,
        stats,
    })
}

/// Assemble the manual and write the HTML to `output_path`.
///
/// Uses an atomic write (temp file in the same directory + rename) so a
/// failed run never leaves a truncated document behind.
pub fn assemble_to_file(
    config: &ManualConfig,
    output_path: impl AsRef<Path>,
) -> Result<AssemblyStats, ManualError> {
    let output = assemble(config)?;
    let path = output_path.as_ref();
    let write_err = |e: std::io::Error| ManualError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(output.html.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", output.html.len(), path.display());
    Ok(output.stats)
}

/// Assemble the manual and render it to a PDF at `output_path`.
///
/// Rendering is delegated to an installed WeasyPrint; relative asset URLs in
/// the document (fonts, the cover logo, section images) are resolved against
/// the working directory.
pub fn assemble_to_pdf(
    config: &ManualConfig,
    output_path: impl AsRef<Path>,
) -> Result<ManualOutput, ManualError> {
    let output = assemble(config)?;
    let working_dir = config.resolve_working_dir()?;
    weasyprint_bridge::render_pdf(&output.html, &working_dir, output_path.as_ref())?;
    Ok(output)
}

/// Read, rewrite and render one source file into its [`Section`].
///
/// The file is read in one call; its handle is released before rewriting
/// starts, whether the read succeeded or not.
pub fn render_section(
    source: &SourcePath,
    working_dir: &Path,
    config: &ManualConfig,
) -> Result<Section, ManualError> {
    info!("processing file {}", source);

    let fs_path = source.to_fs_path(working_dir);
    let markdown =
        std::fs::read_to_string(&fs_path).map_err(|e| ManualError::from_read(fs_path, e))?;

    let working_dir = SourcePath::from_path(working_dir);
    let ctx = RewriteContext {
        repo_base_url: &config.repo_base_url,
        working_dir: working_dir.as_str(),
    };
    let rewritten = rewrite_document(&markdown, source, &ctx);
    let html = render_markdown(&rewritten, &config.markdown);

    Ok(Section {
        source: source.clone(),
        html,
        markdown_bytes: markdown.len(),
    })
}
