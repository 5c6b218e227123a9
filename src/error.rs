//! Error types for the mdmanual library.
//!
//! Assembly is all-or-nothing: any error returned here aborts the run and no
//! document is emitted. Conditions that are *not* errors by contract:
//!
//! * a missing root directory (yields an empty manual),
//! * Markdown link syntax the rewriter does not recognise (passed through),
//! * unreadable subdirectories during discovery (logged and skipped).

use std::path::PathBuf;
use thiserror::Error;
use weasyprint_bridge::WeasyprintError;

/// All fatal errors returned by the mdmanual library.
#[derive(Debug, Error)]
pub enum ManualError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A discovered Markdown file disappeared before it could be read.
    #[error("Markdown file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process working directory could not be determined.
    #[error("Cannot determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external HTML-to-PDF renderer failed.
    #[error("PDF rendering failed: {0}")]
    PdfRender(#[from] WeasyprintError),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ManualError {
    /// Classify an I/O error raised while reading a source file.
    pub(crate) fn from_read(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ManualError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => ManualError::PermissionDenied { path },
            _ => ManualError::ReadFailed { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn not_found_is_classified() {
        let e = ManualError::from_read("a/b.md".into(), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(e, ManualError::FileNotFound { .. }));
        assert!(e.to_string().contains("a/b.md"));
    }

    #[test]
    fn permission_denied_is_classified() {
        let e = ManualError::from_read(
            "secret.md".into(),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(e, ManualError::PermissionDenied { .. }));
        assert!(e.to_string().contains("chmod"));
    }

    #[test]
    fn invalid_utf8_keeps_source() {
        let e = ManualError::from_read(
            "bin.md".into(),
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        match e {
            ManualError::ReadFailed { ref path, ref source } => {
                assert_eq!(path, &PathBuf::from("bin.md"));
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn invalid_config_display() {
        let e = ManualError::InvalidConfig("root_dir must not be empty".into());
        assert_eq!(
            e.to_string(),
            "Invalid configuration: root_dir must not be empty"
        );
    }

    #[test]
    fn pdf_error_converts() {
        let e: ManualError = WeasyprintError::NotFound.into();
        assert!(e.to_string().starts_with("PDF rendering failed"));
    }
}
