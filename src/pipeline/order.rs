//! Section ordering: READMEs first, files outside the primary segment last.
//!
//! A manual reads best when each directory opens with its README and the
//! material outside the main documentation tree trails at the end like an
//! appendix. Both rules are folded into one composite [`SortKey`]:
//!
//! 1. `outside_primary`: `false` for paths containing `/<segment>/`, so the
//!    main tree sorts before everything else.
//! 2. `primary`: for a README, its directory prefix (with trailing `/`); for
//!    any other file, its full path. A prefix compares below every string that
//!    extends it, so a README precedes its siblings and subdirectories no
//!    matter which characters their names start with.
//! 3. `path`: tie-breaker, giving files outside the segment lexical order.

use crate::document::SourcePath;
use tracing::debug;

/// Base name that opens its directory.
pub const README: &str = "README.md";

/// Comparison key for one source file. Never displayed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    pub outside_primary: bool,
    pub primary: String,
    pub path: String,
}

/// Derive the sort key of `path`. The first matching rule wins.
pub fn sort_key(path: &SourcePath, primary_segment: &str) -> SortKey {
    let p = path.as_str();
    let marker = format!("/{primary_segment}/");

    if !p.contains(&marker) {
        return SortKey {
            outside_primary: true,
            primary: String::new(),
            path: p.to_string(),
        };
    }

    let primary = if path.file_name() == README {
        p[..p.len() - README.len()].to_string()
    } else {
        p.to_string()
    };

    SortKey {
        outside_primary: false,
        primary,
        path: p.to_string(),
    }
}

/// Sort `paths` into document order (stable, ascending by [`SortKey`]).
pub fn sort_sources(paths: &mut [SourcePath], primary_segment: &str) {
    paths.sort_by_cached_key(|p| sort_key(p, primary_segment));
    debug!(
        "Document order: {:?}",
        paths.iter().map(SourcePath::as_str).collect::<Vec<_>>()
    );
}
