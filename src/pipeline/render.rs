//! Markdown → HTML rendering with GitHub-flavored extensions (comrak).
//!
//! The documentation being assembled was written for GitHub, so the renderer
//! is configured to match it: tables, fenced code, strikethrough, autolinks,
//! task lists and footnotes. Raw HTML is passed through because the sources
//! are trusted and occasionally embed markup the print stylesheet relies on.

use crate::config::MarkdownOptions;
use comrak::{markdown_to_html, Options};

/// Convert one (already rewritten) Markdown document to an HTML fragment.
pub fn render_markdown(markdown: &str, opts: &MarkdownOptions) -> String {
    let mut options = Options::default();

    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    options.render.unsafe_ = true;
    options.render.hardbreaks = opts.hard_line_breaks;

    markdown_to_html(markdown, &options)
}
