//! # mdmanual
//!
//! Assemble a tree of Markdown documentation files into one paginated,
//! print-styled HTML manual, ready for an HTML-to-PDF renderer.
//!
//! ## Why this crate?
//!
//! Project documentation usually lives as many small Markdown files that link
//! to each other by relative path or by repository URL. Concatenating them is
//! not enough for print: links must become in-document page references,
//! images must be found from the new document's location, and each file's
//! headings must nest under the manual's title. This crate does exactly that,
//! deterministically, in one pass.
//!
//! ## Pipeline Overview
//!
//! ```text
//! papers/
//!  │
//!  ├─ 1. Discover  every *.md below the root (walkdir)
//!  ├─ 2. Order     READMEs first, files outside the primary segment last
//!  ├─ 3. Rewrite   images re-rooted, cross-file links → #anchors, headings demoted
//!  ├─ 4. Render    GitHub-flavored Markdown → HTML (comrak)
//!  └─ 5. Assemble  <section id=…> per file inside the fixed print shell
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdmanual::{assemble, ManualConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ManualConfig::builder().root_dir("papers").build()?;
//!     let output = assemble(&config)?;
//!     println!("{}", output.html);
//!     eprintln!("{} sections", output.stats.file_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mdmanual` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;
pub mod template;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ManualConfig, ManualConfigBuilder, MarkdownOptions};
pub use convert::{assemble, assemble_to_file, assemble_to_pdf, render_section};
pub use document::{Section, SourcePath};
pub use error::ManualError;
pub use output::{AssemblyStats, ManualOutput, SectionSummary};
pub use progress::{AssemblyProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{sections, SectionIter};
