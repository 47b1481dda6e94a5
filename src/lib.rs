//! # stillframe
//!
//! Extract still frames from a video file into an image sequence.
//!
//! `stillframe` decodes a video sequentially with FFmpeg (via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate) and writes a
//! selected subset of frames as JPEG files to
//! `<video_parent_dir>/<video_stem>_frames/`, reporting progress after every
//! decoded frame.
//!
//! ## Quick Start
//!
//! ### Save every frame
//!
//! ```no_run
//! use stillframe::{ExtractionRequest, FrameExtractor};
//!
//! let result = FrameExtractor::new(ExtractionRequest::all("clip.mp4"))
//!     .run()
//!     .unwrap();
//! println!("{} frames in {}", result.frames_saved, result.output_directory.display());
//! ```
//!
//! ### Save one frame per second
//!
//! ```no_run
//! use stillframe::{ExtractionRequest, FrameExtractor};
//!
//! let request = ExtractionRequest::every_millis("clip.mp4", 1000);
//! let result = FrameExtractor::new(request).run().unwrap();
//! println!("saved {}", result.frames_saved);
//! ```
//!
//! ### Watch progress
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stillframe::{ExtractionProgress, ExtractionRequest, FrameExtractor, ProgressCallback};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, progress: &ExtractionProgress) {
//!         println!("processing {}/{}", progress.frames_read, progress.total_frames);
//!     }
//! }
//!
//! let result = FrameExtractor::new(ExtractionRequest::all("clip.mp4"))
//!     .with_progress(Arc::new(PrintProgress))
//!     .run()
//!     .unwrap();
//! println!("saved {}", result.frames_saved);
//! ```
//!
//! ## Features
//!
//! - **Two selection policies** — every frame, or one frame every N
//!   milliseconds of video time
//! - **Deterministic output naming** — `frame_NNNNNN.jpg` under a directory
//!   derived from the video path, identical across re-runs
//! - **Progress & cancellation** — a per-frame callback and a cooperative
//!   [`CancellationToken`] that ends a run cleanly with a partial count
//! - **Closed error taxonomy** — unreadable source, impossible
//!   configuration, or failed write; nothing is retried silently
//! - **Pluggable sources** — the [`FrameSource`] trait lets the engine run
//!   against any sequential frame producer
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system for the
//! `ffmpeg-next` crate to build and link.

pub mod engine;
pub mod error;
pub mod ffmpeg;
pub mod metadata;
pub mod progress;
pub mod source;

mod conversion;

pub use engine::{
    ExtractionMode, ExtractionRequest, ExtractionResult, FrameExtractor, frame_file_name,
    output_directory_for,
};
pub use error::ExtractError;
pub use ffmpeg::{DecoderLogLevel, set_decoder_log_level};
pub use metadata::VideoMetadata;
pub use progress::{CancellationToken, ExtractionProgress, ProgressCallback};
pub use source::{FrameSource, VideoSource};
