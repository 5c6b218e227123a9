//! # weasyprint-bridge
//!
//! Hand an HTML document to an installed [WeasyPrint](https://weasyprint.org/)
//! and collect the PDF it produces.
//!
//! WeasyPrint understands the print features a paginated manual needs:
//! `@page` margin boxes for running headers and footers, and
//! `target-counter()` for "(page N)" cross references. No Rust-native renderer
//! covers those, so this crate drives the external executable instead.
//!
//! ## How it works
//!
//! On first call to [`locate_weasyprint`] or [`render_pdf`]:
//!
//! 1. Checks `WEASYPRINT_BIN` for an explicit executable path.
//! 2. Otherwise searches every directory on `PATH` for the platform binary
//!    (`weasyprint`, or `weasyprint.exe` on Windows).
//!
//! The resolved path is cached for the lifetime of the process.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use weasyprint_bridge::render_pdf;
//!
//! let html = "<!DOCTYPE html><html><body><p>Hello</p></body></html>";
//! render_pdf(html, Path::new("."), Path::new("out.pdf")).expect("render failed");
//! ```
//!
//! ## Environment variable overrides
//!
//! - `WEASYPRINT_BIN` — path to the WeasyPrint executable; skips the `PATH` search.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, info};

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by weasyprint-bridge operations.
#[derive(Error, Debug)]
pub enum WeasyprintError {
    /// No executable was found via `WEASYPRINT_BIN` or `PATH`.
    #[error(
        "WeasyPrint executable not found.\n\
Install it (e.g. `pip install weasyprint`) or set WEASYPRINT_BIN=/path/to/weasyprint."
    )]
    NotFound,

    /// The executable could not be started.
    #[error("Failed to launch '{path}': {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Streaming the HTML document to the renderer failed.
    #[error("Failed to send HTML to WeasyPrint: {0}")]
    Input(#[source] std::io::Error),

    /// WeasyPrint exited unsuccessfully.
    #[error("WeasyPrint exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// The rendered PDF could not be moved to its destination.
    #[error("Failed to write PDF '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ── Platform metadata ────────────────────────────────────────────────────────

fn executable_name() -> &'static str {
    if cfg!(windows) {
        "weasyprint.exe"
    } else {
        "weasyprint"
    }
}

// ── Thread-safe singleton path cache ─────────────────────────────────────────

static RESOLVED_PATH: OnceLock<PathBuf> = OnceLock::new();

// ── Public API ───────────────────────────────────────────────────────────────

/// Returns `true` if a WeasyPrint executable can be located.
pub fn is_weasyprint_available() -> bool {
    locate_weasyprint().is_ok()
}

/// Returns the path to the WeasyPrint executable.
///
/// Resolution order: `WEASYPRINT_BIN`, then `PATH`. A successful lookup is
/// cached; failures are not, so installing WeasyPrint mid-process is picked up.
pub fn locate_weasyprint() -> Result<PathBuf, WeasyprintError> {
    if let Some(p) = RESOLVED_PATH.get() {
        return Ok(p.clone());
    }
    let resolved = resolve_executable(
        std::env::var_os("WEASYPRINT_BIN").as_deref(),
        std::env::var_os("PATH").as_deref(),
    )?;
    Ok(RESOLVED_PATH.get_or_init(|| resolved).clone())
}

/// Render `html` to a PDF at `output`.
///
/// Relative URLs in the document (fonts, images) are resolved against
/// `base_dir`. The PDF is first written to a temporary file in the output
/// directory and renamed into place, so `output` never holds a partial file.
pub fn render_pdf(html: &str, base_dir: &Path, output: &Path) -> Result<(), WeasyprintError> {
    let exe = locate_weasyprint()?;
    render_pdf_with(&exe, html, base_dir, output)
}

/// Same as [`render_pdf`], with an explicit executable path.
pub fn render_pdf_with(
    exe: &Path,
    html: &str,
    base_dir: &Path,
    output: &Path,
) -> Result<(), WeasyprintError> {
    let out_dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = tempfile::Builder::new()
        .prefix(".weasyprint-")
        .suffix(".pdf")
        .tempfile_in(&out_dir)
        .map_err(|e| WeasyprintError::Output {
            path: output.to_path_buf(),
            source: e,
        })?;

    info!("Rendering PDF with {}", exe.display());
    debug!("base URL: {}, temp output: {}", base_dir.display(), tmp.path().display());

    let mut child = Command::new(exe)
        .arg("--base-url")
        .arg(base_dir)
        .arg("-")
        .arg(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| WeasyprintError::Spawn {
            path: exe.to_path_buf(),
            source: e,
        })?;

    // stdin is fed from its own thread while stderr is drained here, so
    // neither pipe can fill up and stall the other. Dropping stdin at the end
    // of the writer closes the pipe so WeasyPrint sees EOF.
    let stdin = child.stdin.take();
    let (written, waited) = std::thread::scope(|scope| {
        let writer = scope.spawn(move || match stdin {
            Some(mut stdin) => stdin.write_all(html.as_bytes()),
            None => Ok(()),
        });
        let waited = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
        (written, waited)
    });

    // An early exit breaks the pipe; its status and stderr say why.
    let result = waited.map_err(WeasyprintError::Input)?;
    if !result.status.success() {
        return Err(WeasyprintError::Failed {
            status: result.status.to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }
    written.map_err(WeasyprintError::Input)?;

    tmp.persist(output).map_err(|e| WeasyprintError::Output {
        path: output.to_path_buf(),
        source: e.error,
    })?;
    info!("PDF written to {}", output.display());
    Ok(())
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn resolve_executable(
    env_override: Option<&OsStr>,
    search_path: Option<&OsStr>,
) -> Result<PathBuf, WeasyprintError> {
    // 1. Environment variable override.
    if let Some(p) = env_override.filter(|p| !p.is_empty()) {
        let p = PathBuf::from(p);
        if p.is_file() {
            return Ok(p);
        }
        // Fall through: override set but missing → still search PATH.
        debug!("WEASYPRINT_BIN '{}' not found; searching PATH", p.display());
    }

    // 2. PATH search.
    let name = executable_name();
    search_path
        .into_iter()
        .flat_map(std::env::split_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or(WeasyprintError::NotFound)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn env_override_wins_when_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("my-weasyprint");
        std::fs::write(&exe, b"").unwrap();

        let found = resolve_executable(Some(exe.as_os_str()), None).unwrap();
        assert_eq!(found, exe);
    }

    #[test]
    fn missing_override_falls_back_to_path_search() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join(executable_name());
        std::fs::write(&exe, b"").unwrap();

        let path_var = std::env::join_paths([dir.path()]).unwrap();
        let found = resolve_executable(
            Some(OsStr::new("/definitely/not/here/weasyprint")),
            Some(&path_var),
        )
        .unwrap();
        assert_eq!(found, exe);
    }

    #[test]
    fn path_search_skips_directories_without_binary() {
        let empty = tempfile::tempdir().unwrap();
        let full = tempfile::tempdir().unwrap();
        let exe = full.path().join(executable_name());
        std::fs::write(&exe, b"").unwrap();

        let path_var = std::env::join_paths([empty.path(), full.path()]).unwrap();
        assert_eq!(resolve_executable(None, Some(&path_var)).unwrap(), exe);
    }

    #[test]
    fn nothing_found_is_not_found_error() {
        let empty = tempfile::tempdir().unwrap();
        let path_var: OsString = std::env::join_paths([empty.path()]).unwrap();
        let err = resolve_executable(None, Some(&path_var)).unwrap_err();
        assert!(matches!(err, WeasyprintError::NotFound));
        assert!(err.to_string().contains("WEASYPRINT_BIN"));
    }

    #[test]
    fn spawn_failure_reports_executable_path() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("no-such-binary");
        let err = render_pdf_with(&bogus, "<html></html>", dir.path(), &dir.path().join("o.pdf"))
            .unwrap_err();
        assert!(matches!(err, WeasyprintError::Spawn { .. }));
        assert!(!dir.path().join("o.pdf").exists());
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_reports_status_and_stderr() {
        // `sh` rejects `--base-url` as an option and exits before reading
        // stdin, so writing a large document hits a closed pipe.
        let sh = Path::new("/bin/sh");
        if !sh.is_file() {
            println!("SKIP — /bin/sh not available");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let html = "<p>filler</p>\n".repeat(1 << 19);
        let out = dir.path().join("o.pdf");

        let err = render_pdf_with(sh, &html, dir.path(), &out).unwrap_err();
        match err {
            WeasyprintError::Failed { status, stderr } => {
                assert!(!status.is_empty());
                assert!(!stderr.is_empty(), "stderr should explain the failure");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(!out.exists());
    }
}
