//! Progress-callback trait for per-file assembly events.
//!
//! Inject an [`Arc<dyn AssemblyProgressCallback>`] via
//! [`crate::config::ManualConfigBuilder::progress_callback`] to receive events
//! as the assembler works through the ordered file list. The CLI uses it to
//! drive a progress bar; library users can forward events anywhere.
//!
//! # Example
//!
//! ```rust
//! use mdmanual::{AssemblyProgressCallback, ManualConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: Arc<AtomicUsize>,
//! }
//!
//! impl AssemblyProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, index: usize, total: usize, path: &str, html_len: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{}/{} {} ({} bytes)", index, total, path, html_len);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ManualConfig::builder()
//!     .progress_callback(counter as Arc<dyn AssemblyProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the assembler as it processes each file.
///
/// Files are processed one at a time, in document order, so events for file
/// `n + 1` never start before file `n` has completed. The trait is
/// `Send + Sync` so implementations can be shared with other threads.
/// All methods have default no-op implementations.
pub trait AssemblyProgressCallback: Send + Sync {
    /// Called once after discovery and ordering, before any file is read.
    ///
    /// # Arguments
    /// * `total_files` — number of files that will be assembled
    fn on_assembly_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file is read.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position in document order
    /// * `total` — total files
    /// * `path`  — source path of the file
    fn on_file_start(&self, index: usize, total: usize, path: &str) {
        let _ = (index, total, path);
    }

    /// Called when a file has been rewritten and rendered.
    ///
    /// # Arguments
    /// * `html_len` — byte length of the produced HTML fragment
    fn on_file_complete(&self, index: usize, total: usize, path: &str, html_len: usize) {
        let _ = (index, total, path, html_len);
    }

    /// Called when a file fails. Assembly stops after this event.
    fn on_file_error(&self, index: usize, total: usize, path: &str, error: &str) {
        let _ = (index, total, path, error);
    }

    /// Called once after every file has been assembled successfully.
    fn on_assembly_complete(&self, total_files: usize, html_len: usize) {
        let _ = (total_files, html_len);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl AssemblyProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ManualConfig`].
pub type ProgressCallback = Arc<dyn AssemblyProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        started_total: AtomicUsize,
        final_len: AtomicUsize,
    }

    impl AssemblyProgressCallback for TrackingCallback {
        fn on_assembly_start(&self, total_files: usize) {
            self.started_total.store(total_files, Ordering::SeqCst);
        }

        fn on_file_start(&self, _index: usize, _total: usize, _path: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _index: usize, _total: usize, _path: &str, _html_len: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _index: usize, _total: usize, _path: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_assembly_complete(&self, _total_files: usize, html_len: usize) {
            self.final_len.store(html_len, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_assembly_start(2);
        cb.on_file_start(1, 2, "papers/doc/README.md");
        cb.on_file_complete(1, 2, "papers/doc/README.md", 42);
        cb.on_file_error(2, 2, "papers/doc/a.md", "gone");
        cb.on_assembly_complete(2, 100);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_assembly_start(2);
        tracker.on_file_start(1, 2, "a.md");
        tracker.on_file_complete(1, 2, "a.md", 10);
        tracker.on_file_start(2, 2, "b.md");
        tracker.on_file_error(2, 2, "b.md", "permission denied");

        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.final_len.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_assembly_start(1);
        cb.on_file_complete(1, 1, "x.md", 1);
    }
}
