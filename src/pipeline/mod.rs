//! Pipeline stages for Markdown-to-manual assembly.
//!
//! Each submodule implements exactly one transformation step and is a pure
//! function of its inputs, apart from discovery reading the directory tree.
//!
//! ## Data Flow
//!
//! ```text
//! discover ──▶ order ──▶ rewrite ──▶ render
//! (walkdir)   (SortKey)  (regex)     (comrak)
//! ```
//!
//! 1. [`discover`] — enumerate `.md` files under the root directory
//! 2. [`order`]    — README-first, primary-segment-first document order
//! 3. [`rewrite`]  — re-root images, turn cross-file links into anchors,
//!    demote headings
//! 4. [`render`]   — GitHub-flavored Markdown to an HTML fragment
//!
//! [`anchor`] holds the path → section id rule shared by the rewriter and the
//! assembler, plus the lexical path arithmetic used to resolve link targets.

pub mod anchor;
pub mod discover;
pub mod order;
pub mod render;
pub mod rewrite;
