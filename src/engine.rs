//! Extraction engine.
//!
//! [`FrameExtractor`] owns one extraction run: it opens the source, applies
//! the selection policy, names and JPEG-encodes kept frames under
//! `<video_parent_dir>/<video_stem>_frames/`, emits progress after every
//! decoded frame, and produces an [`ExtractionResult`] or a typed error.
//!
//! # Example
//!
//! ```no_run
//! use stillframe::{ExtractionRequest, FrameExtractor};
//!
//! // Save one frame per second of video time.
//! let request = ExtractionRequest::every_millis("input.mp4", 1000);
//! let result = FrameExtractor::new(request).run().unwrap();
//! println!("{} frames in {}", result.frames_saved, result.output_directory.display());
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    error::ExtractError,
    progress::{CancellationToken, ExtractionProgress, NoOpProgress, ProgressCallback},
    source::{FrameSource, VideoSource},
};

/// Which decoded frames to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Keep every decoded frame.
    All,
    /// Keep one frame every `interval_ms` milliseconds of video time.
    ///
    /// The interval is converted to a whole number of decode steps using the
    /// stream's frame rate; an interval shorter than one frame period is an
    /// invalid configuration.
    Interval {
        /// Spacing between kept frames, in milliseconds. Must be positive.
        interval_ms: u64,
    },
}

/// Parameters for one extraction run. Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Path to the video file to extract from.
    pub source_path: PathBuf,
    /// Selection policy for the run.
    pub mode: ExtractionMode,
}

impl ExtractionRequest {
    /// Request extraction of every frame.
    pub fn all<P: Into<PathBuf>>(source_path: P) -> Self {
        Self {
            source_path: source_path.into(),
            mode: ExtractionMode::All,
        }
    }

    /// Request extraction of one frame every `interval_ms` milliseconds.
    pub fn every_millis<P: Into<PathBuf>>(source_path: P, interval_ms: u64) -> Self {
        Self {
            source_path: source_path.into(),
            mode: ExtractionMode::Interval { interval_ms },
        }
    }

    /// Reject parameters that are invalid before any I/O happens.
    fn validate(&self) -> Result<(), ExtractError> {
        if let ExtractionMode::Interval { interval_ms: 0 } = self.mode {
            return Err(ExtractError::InvalidConfiguration(
                "interval must be a positive number of milliseconds".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary of a completed run. Produced exactly once per successful run,
/// including runs ended early by cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ExtractionResult {
    /// Number of frames written to disk.
    pub frames_saved: u64,
    /// Directory the frames were written to.
    pub output_directory: PathBuf,
}

/// Resolved keep/skip rule for one run.
enum SelectionPolicy {
    /// Keep every frame.
    Every,
    /// Keep frames whose decode index is a multiple of the stride.
    Stride(u64),
}

impl SelectionPolicy {
    /// Resolve a mode against the stream's frame rate.
    ///
    /// Interval mode derives `floor((interval_ms / 1000) * frame_rate)`
    /// decode steps between kept frames and rejects a zero result before the
    /// loop ever runs.
    fn resolve(mode: ExtractionMode, frame_rate: f64) -> Result<Self, ExtractError> {
        match mode {
            ExtractionMode::All => Ok(Self::Every),
            ExtractionMode::Interval { interval_ms } => {
                if frame_rate <= 0.0 {
                    return Err(ExtractError::InvalidConfiguration(format!(
                        "interval extraction needs a known frame rate, got {frame_rate}"
                    )));
                }
                let stride = ((interval_ms as f64 / 1000.0) * frame_rate).floor() as u64;
                if stride == 0 {
                    return Err(ExtractError::InvalidConfiguration(format!(
                        "interval of {interval_ms} ms is shorter than one frame period at {frame_rate:.2} fps"
                    )));
                }
                Ok(Self::Stride(stride))
            }
        }
    }

    fn keeps(&self, decode_index: u64) -> bool {
        match self {
            SelectionPolicy::Every => true,
            SelectionPolicy::Stride(stride) => decode_index % stride == 0,
        }
    }
}

/// Derive the output directory for a video path.
///
/// `/a/b/clip.mp4` becomes `/a/b/clip_frames`, independent of the extraction
/// mode. The directory is reused if it already exists; files with identical
/// computed names are silently overwritten.
pub fn output_directory_for(source_path: &Path) -> PathBuf {
    let stem = source_path.file_stem().unwrap_or_default().to_string_lossy();
    source_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format!("{stem}_frames"))
}

/// File name for the `saved_index`-th kept frame: `frame_NNNNNN.jpg`, with
/// the index zero-padded to six digits.
pub fn frame_file_name(saved_index: u64) -> String {
    format!("frame_{saved_index:06}.jpg")
}

/// A one-shot, synchronous extraction run.
///
/// The extractor owns the source handle for the duration of the run (open →
/// drain → release) and performs no background work: `run` occupies the
/// caller until completion, failure, or cancellation. Concurrent runs against
/// the same video path are unsupported and must be prevented by the caller.
pub struct FrameExtractor {
    request: ExtractionRequest,
    progress: Arc<dyn ProgressCallback>,
    cancellation: Option<CancellationToken>,
}

impl Debug for FrameExtractor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FrameExtractor")
            .field("request", &self.request)
            .field("has_cancellation", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

impl FrameExtractor {
    /// Create an extractor for the given request.
    ///
    /// Defaults: no progress callback, no cancellation token.
    pub fn new(request: ExtractionRequest) -> Self {
        Self {
            request,
            progress: Arc::new(NoOpProgress),
            cancellation: None,
        }
    }

    /// Attach a progress callback, invoked after every decoded frame.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token, checked once per loop iteration.
    ///
    /// A cancelled run ends cleanly, as if the stream had reached its end:
    /// [`run`](FrameExtractor::run) returns `Ok` with the frames saved so
    /// far.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Open the video at the request's path and run the extraction.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::InvalidConfiguration`] for a zero interval (before
    ///   any I/O) or an interval that resolves to zero decode steps (before
    ///   the output directory is created).
    /// - [`ExtractError::SourceUnavailable`] if the path cannot be opened as
    ///   video. Nothing is written in either case.
    /// - [`ExtractError::OutputWriteFailure`] if the output directory cannot
    ///   be created or a frame cannot be written; the run stops at the first
    ///   write problem.
    pub fn run(&self) -> Result<ExtractionResult, ExtractError> {
        self.request.validate()?;
        let source = VideoSource::open(&self.request.source_path)?;
        self.run_with_source(source)
    }

    /// Run the extraction loop against an already-open source.
    ///
    /// The output directory is still derived from the request's
    /// `source_path`. This is the seam for driving the engine with a custom
    /// [`FrameSource`] implementation.
    ///
    /// # Errors
    ///
    /// Same as [`run`](FrameExtractor::run), minus the open step.
    pub fn run_with_source<S: FrameSource>(
        &self,
        mut source: S,
    ) -> Result<ExtractionResult, ExtractError> {
        self.request.validate()?;

        let metadata = source.metadata().clone();
        let policy = SelectionPolicy::resolve(self.request.mode, metadata.frame_rate)?;

        let output_directory = output_directory_for(&self.request.source_path);
        fs::create_dir_all(&output_directory).map_err(|error| {
            ExtractError::OutputWriteFailure {
                frames_saved: 0,
                reason: format!(
                    "failed to create output directory {}: {error}",
                    output_directory.display()
                ),
            }
        })?;

        log::debug!(
            "Extracting {} -> {} ({:?})",
            self.request.source_path.display(),
            output_directory.display(),
            self.request.mode,
        );

        let mut frames_read: u64 = 0;
        let mut frames_saved: u64 = 0;

        loop {
            if self.is_cancelled() {
                log::info!(
                    "Extraction cancelled after {frames_read} decoded frame(s), {frames_saved} saved",
                );
                break;
            }

            let Some(frame) = source.next_frame() else {
                break;
            };

            if policy.keeps(frames_read) {
                let file_path = output_directory.join(frame_file_name(frames_saved));
                frame.save(&file_path).map_err(|error| {
                    ExtractError::OutputWriteFailure {
                        frames_saved,
                        reason: format!("failed to write {}: {error}", file_path.display()),
                    }
                })?;
                frames_saved += 1;
            }

            frames_read += 1;
            self.progress.on_progress(&ExtractionProgress {
                frames_read,
                frames_saved,
                total_frames: metadata.frame_count,
            });
        }

        log::info!(
            "Saved {frames_saved} of {frames_read} decoded frame(s) to {}",
            output_directory.display(),
        );

        Ok(ExtractionResult {
            frames_saved,
            output_directory,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_second_at_thirty_fps_is_thirty_frames() {
        let policy =
            SelectionPolicy::resolve(ExtractionMode::Interval { interval_ms: 1000 }, 30.0)
                .unwrap();
        assert!(matches!(policy, SelectionPolicy::Stride(30)));
    }

    #[test]
    fn stride_is_floored() {
        // 100 ms at 12.5 fps is 1.25 decode steps; keeps every frame.
        let policy =
            SelectionPolicy::resolve(ExtractionMode::Interval { interval_ms: 100 }, 12.5)
                .unwrap();
        assert!(matches!(policy, SelectionPolicy::Stride(1)));
    }

    #[test]
    fn sub_frame_interval_is_rejected() {
        let result = SelectionPolicy::resolve(ExtractionMode::Interval { interval_ms: 10 }, 30.0);
        assert!(matches!(result, Err(ExtractError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_frame_rate_is_rejected() {
        let result =
            SelectionPolicy::resolve(ExtractionMode::Interval { interval_ms: 1000 }, 0.0);
        assert!(matches!(result, Err(ExtractError::InvalidConfiguration(_))));
    }

    #[test]
    fn all_mode_ignores_frame_rate() {
        let policy = SelectionPolicy::resolve(ExtractionMode::All, 0.0).unwrap();
        assert!(policy.keeps(0));
        assert!(policy.keeps(7));
    }

    #[test]
    fn stride_keeps_multiples_only() {
        let policy = SelectionPolicy::Stride(30);
        assert!(policy.keeps(0));
        assert!(!policy.keeps(1));
        assert!(!policy.keeps(29));
        assert!(policy.keeps(30));
        assert!(policy.keeps(60));
    }

    #[test]
    fn zero_interval_fails_validation() {
        let request = ExtractionRequest::every_millis("clip.mp4", 0);
        assert!(matches!(
            request.validate(),
            Err(ExtractError::InvalidConfiguration(_)),
        ));
    }

    #[test]
    fn output_directory_sits_beside_the_video() {
        assert_eq!(
            output_directory_for(Path::new("/a/b/clip.mp4")),
            Path::new("/a/b/clip_frames"),
        );
    }

    #[test]
    fn frame_file_names_are_zero_padded() {
        assert_eq!(frame_file_name(0), "frame_000000.jpg");
        assert_eq!(frame_file_name(42), "frame_000042.jpg");
    }
}
