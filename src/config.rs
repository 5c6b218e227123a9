//! Configuration types for manual assembly.
//!
//! All assembly behaviour is controlled through [`ManualConfig`], built via
//! its [`ManualConfigBuilder`]. The defaults reproduce the layout of the
//! Furnace documentation tree: Markdown under `papers/`, the main manual under
//! `papers/doc/`, and cross references written as GitHub tree URLs.
//!
//! The HTML shell itself is fixed (see [`crate::template`]); only inputs and
//! link-resolution parameters are configurable.

use crate::error::ManualError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default directory holding the Markdown tree.
pub const DEFAULT_ROOT_DIR: &str = "papers";

/// Default primary segment.
pub const DEFAULT_PRIMARY_SEGMENT: &str = "doc";

/// Default repository URL prefix for cross-file links.
pub const DEFAULT_REPO_BASE_URL: &str = "https://github.com/tildearrow/furnace/tree/master/";

/// Configuration for assembling a manual.
///
/// Built via [`ManualConfig::builder()`] or using [`ManualConfig::default()`].
///
/// # Example
/// ```rust
/// use mdmanual::ManualConfig;
///
/// let config = ManualConfig::builder()
///     .root_dir("docs")
///     .primary_segment("guide")
///     .repo_base_url("https://github.com/acme/widget/tree/main/")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ManualConfig {
    /// Directory holding the Markdown tree, relative to `working_dir`. Default: `papers`.
    pub root_dir: PathBuf,

    /// Base for relative paths, section ids and rewritten links.
    /// `None` means the process working directory at assembly time.
    pub working_dir: Option<PathBuf>,

    /// Directory name that marks the main manual. Default: `doc`.
    ///
    /// Files whose path contains `/<primary_segment>/` are ordered README
    /// first within each directory. Every other file is moved behind them,
    /// appendix-style, in lexical order.
    pub primary_segment: String,

    /// URL prefix of links that point at files of the same repository.
    /// Default: the Furnace `tree/master` URL.
    ///
    /// A link starting with this prefix is rewritten to the in-document
    /// anchor of the file it names (directories resolve to their README).
    pub repo_base_url: String,

    /// Markdown renderer switches.
    pub markdown: MarkdownOptions,

    /// Optional per-file progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            working_dir: None,
            primary_segment: DEFAULT_PRIMARY_SEGMENT.to_string(),
            repo_base_url: DEFAULT_REPO_BASE_URL.to_string(),
            markdown: MarkdownOptions::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ManualConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualConfig")
            .field("root_dir", &self.root_dir)
            .field("working_dir", &self.working_dir)
            .field("primary_segment", &self.primary_segment)
            .field("repo_base_url", &self.repo_base_url)
            .field("markdown", &self.markdown)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn AssemblyProgressCallback>"),
            )
            .finish()
    }
}

impl ManualConfig {
    /// Create a new builder for `ManualConfig`.
    pub fn builder() -> ManualConfigBuilder {
        ManualConfigBuilder {
            config: Self::default(),
        }
    }

    /// The configured working directory, or the process one, as an absolute path.
    pub fn resolve_working_dir(&self) -> Result<PathBuf, ManualError> {
        match &self.working_dir {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            other => {
                let cwd = std::env::current_dir().map_err(ManualError::WorkingDir)?;
                Ok(match other {
                    Some(dir) => cwd.join(dir),
                    None => cwd,
                })
            }
        }
    }
}

/// Builder for [`ManualConfig`].
#[derive(Debug)]
pub struct ManualConfigBuilder {
    config: ManualConfig,
}

impl ManualConfigBuilder {
    pub fn root_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.root_dir = dir.into();
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.working_dir = Some(dir.into());
        self
    }

    pub fn primary_segment(mut self, segment: impl Into<String>) -> Self {
        self.config.primary_segment = segment.into();
        self
    }

    pub fn repo_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.repo_base_url = url.into();
        self
    }

    pub fn hard_line_breaks(mut self, v: bool) -> Self {
        self.config.markdown.hard_line_breaks = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ManualConfig, ManualError> {
        let c = &self.config;
        if c.root_dir.as_os_str().is_empty() {
            return Err(ManualError::InvalidConfig("root directory must not be empty".into()));
        }
        if c.primary_segment.is_empty() || c.primary_segment.contains('/') {
            return Err(ManualError::InvalidConfig(format!(
                "primary segment must be a single directory name, got '{}'",
                c.primary_segment
            )));
        }
        if !c.repo_base_url.starts_with("http") || !c.repo_base_url.ends_with('/') {
            return Err(ManualError::InvalidConfig(format!(
                "repository base URL must be an http(s) URL ending in '/', got '{}'",
                c.repo_base_url
            )));
        }
        Ok(self.config)
    }
}

/// Switches for the GitHub-flavored Markdown renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownOptions {
    /// Render single newlines inside paragraphs as `<br>`, as GitHub does for
    /// issue and comment text. Default: true.
    pub hard_line_breaks: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            hard_line_breaks: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_furnace_layout() {
        let c = ManualConfig::default();
        assert_eq!(c.root_dir, PathBuf::from("papers"));
        assert_eq!(c.primary_segment, "doc");
        assert_eq!(c.repo_base_url, "https://github.com/tildearrow/furnace/tree/master/");
        assert!(c.working_dir.is_none());
        assert!(c.markdown.hard_line_breaks);
    }

    #[test]
    fn builder_sets_fields() {
        let c = ManualConfig::builder()
            .root_dir("docs")
            .working_dir("/srv/project")
            .primary_segment("guide")
            .repo_base_url("https://example.org/repo/blob/main/")
            .hard_line_breaks(false)
            .build()
            .unwrap();
        assert_eq!(c.root_dir, PathBuf::from("docs"));
        assert_eq!(c.working_dir, Some(PathBuf::from("/srv/project")));
        assert_eq!(c.primary_segment, "guide");
        assert!(!c.markdown.hard_line_breaks);
    }

    #[test]
    fn rejects_bad_segment() {
        assert!(ManualConfig::builder().primary_segment("").build().is_err());
        assert!(ManualConfig::builder().primary_segment("a/b").build().is_err());
    }

    #[test]
    fn rejects_bad_base_url() {
        let err = ManualConfig::builder()
            .repo_base_url("github.com/x/")
            .build()
            .unwrap_err();
        assert!(matches!(err, ManualError::InvalidConfig(_)));
        assert!(ManualConfig::builder()
            .repo_base_url("https://github.com/x/y/tree/master")
            .build()
            .is_err());
    }

    #[test]
    fn rejects_empty_root() {
        assert!(ManualConfig::builder().root_dir("").build().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn explicit_working_dir_is_used() {
        let c = ManualConfig::builder().working_dir("/tmp/x").build().unwrap();
        assert_eq!(c.resolve_working_dir().unwrap(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn relative_working_dir_is_made_absolute() {
        let c = ManualConfig::builder().working_dir("sub").build().unwrap();
        let resolved = c.resolve_working_dir().unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("sub"));
    }

    #[test]
    fn debug_hides_callback() {
        let s = format!("{:?}", ManualConfig::default());
        assert!(s.contains("primary_segment"));
        assert!(s.contains("progress_callback: None"));
    }
}
