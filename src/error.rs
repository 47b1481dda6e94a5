//! Error types for the `stillframe` crate.
//!
//! This module defines [`ExtractError`], the error type returned by every
//! fallible operation in the crate. The taxonomy is deliberately small: a run
//! either cannot read its input, was configured impossibly, or could not
//! write its output. All three are terminal for the current run and none are
//! retried.

use std::path::PathBuf;

use thiserror::Error;

/// The error type for all `stillframe` operations.
///
/// Variants carry enough context to display a user-facing message without
/// additional logging at the call site.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The path does not resolve to a decodable video.
    ///
    /// Covers open failures, files with no video stream, and decoder
    /// construction failures. Surfaced before the output directory is
    /// created, so nothing is written.
    #[error("Failed to open video source at {path}: {reason}")]
    SourceUnavailable {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The extraction parameters cannot produce a valid run.
    ///
    /// Raised for a zero-millisecond interval, for interval mode against a
    /// stream with an unknown or zero frame rate, and for an interval shorter
    /// than one frame period. Surfaced before any decode work.
    #[error("Invalid extraction configuration: {0}")]
    InvalidConfiguration(String),

    /// The output directory could not be created, or a frame could not be
    /// encoded and written.
    ///
    /// The run stops at the first write problem rather than skipping the
    /// failed frame; `frames_saved` reports how many frames made it to disk
    /// beforehand.
    #[error("Output write failed after {frames_saved} saved frame(s): {reason}")]
    OutputWriteFailure {
        /// Frames successfully written before the failure.
        frames_saved: u64,
        /// Underlying reason the write failed.
        reason: String,
    },
}
