//! Progress reporting and cancellation support.
//!
//! [`ProgressCallback`] receives an [`ExtractionProgress`] snapshot after
//! every decoded frame, and [`CancellationToken`] requests a clean early stop
//! of a running extraction.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stillframe::{
//!     ExtractionProgress, ExtractionRequest, FrameExtractor, ProgressCallback,
//! };
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, progress: &ExtractionProgress) {
//!         println!("processing {}/{}", progress.frames_read, progress.total_frames);
//!     }
//! }
//!
//! let result = FrameExtractor::new(ExtractionRequest::all("input.mp4"))
//!     .with_progress(Arc::new(PrintProgress))
//!     .run()
//!     .unwrap();
//! println!("saved {}", result.frames_saved);
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A snapshot of extraction progress.
///
/// Emitted after every decoded frame, kept or skipped. Each field is
/// monotonically non-decreasing across one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionProgress {
    /// Frames decoded so far.
    pub frames_read: u64,
    /// Frames persisted to disk so far.
    pub frames_saved: u64,
    /// Advisory total from [`VideoMetadata`](crate::VideoMetadata); suitable
    /// for a bounded progress display but not guaranteed to match the final
    /// decode count. Zero when the container reports no usable estimate.
    pub total_frames: u64,
}

/// Trait for receiving progress updates during an extraction run.
///
/// Implementations must be [`Send`] and [`Sync`] so a single callback can be
/// shared with whatever thread the caller drives the run from.
///
/// Progress callbacks are **infallible** — they observe but cannot halt the
/// run. Use [`CancellationToken`] to stop early.
pub trait ProgressCallback: Send + Sync {
    /// Called synchronously from the decode loop after every decoded frame.
    fn on_progress(&self, progress: &ExtractionProgress);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _progress: &ExtractionProgress) {}
}

/// Cooperative stop flag for a running extraction.
///
/// Clone the token before starting the run and keep one clone on the calling
/// side; [`cancel`](CancellationToken::cancel) may then be called from any
/// thread. The extraction loop consults the flag once per iteration and
/// treats a set flag as a clean early termination — the run still returns
/// `Ok` with the frames saved so far, exactly as if the stream had ended.
///
/// # Example
///
/// ```
/// use stillframe::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    stop_requested: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A fresh token with the flag unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Every clone of this token observes it.
    pub fn cancel(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](CancellationToken::cancel) has been called on any
    /// clone of this token.
    pub fn is_cancelled(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }
}
