//! Video source adapter.
//!
//! [`VideoSource`] opens a video file with FFmpeg, validates that it carries a
//! decodable video stream, caches [`VideoMetadata`], and yields decoded frames
//! one at a time in RGB8. The [`FrameSource`] trait is the seam between the
//! adapter and the extraction engine: anything that can produce a sequence of
//! frames with metadata can drive a run.

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{conversion, error::ExtractError, metadata::VideoMetadata};

/// A sequential producer of decoded video frames.
///
/// [`VideoSource`] is the production implementation; the extraction engine
/// accepts any implementor via
/// [`FrameExtractor::run_with_source`](crate::FrameExtractor::run_with_source).
pub trait FrameSource {
    /// Stream metadata, read once at open time.
    fn metadata(&self) -> &VideoMetadata;

    /// Decode and return the next frame, advancing the stream position by
    /// exactly one frame. Returns `None` once the stream is exhausted.
    ///
    /// Implementations must be deterministic about the end: once `None` has
    /// been returned, every subsequent call returns `None`.
    fn next_frame(&mut self) -> Option<DynamicImage>;
}

/// An opened video file, ready for sequential frame decoding.
///
/// Opening validates the file and caches metadata; frames are then pulled one
/// at a time with [`next_frame`](VideoSource::next_frame). End-of-stream and
/// mid-stream read/decode failures are deliberately conflated: both end the
/// sequence, so a partially unreadable file yields its readable prefix and
/// then stops. The underlying demuxer and decoder contexts are released
/// exactly once, on every exit path, when the source is dropped.
///
/// # Example
///
/// ```no_run
/// use stillframe::VideoSource;
///
/// let mut source = VideoSource::open("input.mp4").unwrap();
/// while let Some(frame) = source.next_frame() {
///     println!("decoded a {}x{} frame", frame.width(), frame.height());
/// }
/// ```
pub struct VideoSource {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    video_stream_index: usize,
    metadata: VideoMetadata,
    path: PathBuf,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    eof_sent: bool,
    finished: bool,
}

impl std::fmt::Debug for VideoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoSource")
            .field("video_stream_index", &self.video_stream_index)
            .field("metadata", &self.metadata)
            .field("path", &self.path)
            .field("eof_sent", &self.eof_sent)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for sequential frame extraction.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, builds a decoder and an RGB24 scaler at the stream's
    /// native resolution, and caches the stream metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceUnavailable`] if the path cannot be
    /// opened, contains no video stream, or a decoder cannot be constructed
    /// for it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening video source: {}", path.display());

        ffmpeg_next::init().map_err(|error| {
            source_error(&path, format!("FFmpeg initialisation failed: {error}"))
        })?;

        let input_context = ffmpeg_next::format::input(&path)
            .map_err(|error| source_error(&path, error))?;

        let video_stream_index = input_context
            .streams()
            .best(Type::Video)
            .map(|stream| stream.index())
            .ok_or_else(|| source_error(&path, "no video stream found"))?;

        let stream = input_context
            .stream(video_stream_index)
            .ok_or_else(|| source_error(&path, "video stream disappeared after probing"))?;

        // Frame rate from the stream's average rate, falling back to the
        // nominal rate when the average is unavailable.
        let mut frame_rate = conversion::rational_to_f64(stream.avg_frame_rate());
        if frame_rate <= 0.0 {
            frame_rate = conversion::rational_to_f64(stream.rate());
        }

        let decoder_context = CodecContext::from_parameters(stream.parameters())
            .map_err(|error| {
                source_error(&path, format!("failed to read codec parameters: {error}"))
            })?;
        let decoder = decoder_context.decoder().video().map_err(|error| {
            source_error(&path, format!("failed to create video decoder: {error}"))
        })?;

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )
        .map_err(|error| {
            source_error(&path, format!("failed to create pixel converter: {error}"))
        })?;

        // Container-level duration, in AV_TIME_BASE microseconds.
        let duration_microseconds = input_context.duration();
        let duration_seconds = if duration_microseconds > 0 {
            duration_microseconds as f64 / 1_000_000.0
        } else {
            0.0
        };

        let frame_count = if frame_rate > 0.0 {
            (duration_seconds * frame_rate) as u64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width,
            height,
            frame_rate,
            frame_count,
            codec,
        };

        log::info!(
            "Opened video source: {} ({}x{}, {:.2} fps, ~{} frames, codec={})",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.frame_rate,
            metadata.frame_count,
            metadata.codec,
        );

        Ok(Self {
            input_context,
            decoder,
            scaler,
            video_stream_index,
            metadata,
            path,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            eof_sent: false,
            finished: false,
        })
    }

    /// Cached stream metadata.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Decode the next frame, or `None` at end-of-stream.
    ///
    /// Reads packets from the demuxer until the decoder produces a frame.
    /// Any read or decode failure mid-stream is treated as end-of-stream:
    /// the failure is logged at `warn` and the sequence ends. No partial or
    /// corrupt frame is ever returned.
    pub fn next_frame(&mut self) -> Option<DynamicImage> {
        if self.finished {
            return None;
        }

        loop {
            // Drain any frame the decoder has already produced.
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                match self.convert_current_frame() {
                    Ok(image) => return Some(image),
                    Err(error) => {
                        log::warn!(
                            "Stopping {} on frame conversion failure: {error}",
                            self.path.display(),
                        );
                        self.finished = true;
                        return None;
                    }
                }
            }

            if self.eof_sent {
                // Decoder fully drained.
                self.finished = true;
                return None;
            }

            // Feed the decoder another packet.
            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() == self.video_stream_index {
                        if let Err(error) = self.decoder.send_packet(&packet) {
                            log::warn!(
                                "Stopping {} on decode failure: {error}",
                                self.path.display(),
                            );
                            self.finished = true;
                            return None;
                        }
                    }
                    // Non-video packets are silently skipped.
                }
                Err(FfmpegError::Eof) => {
                    if self.decoder.send_eof().is_err() {
                        self.finished = true;
                        return None;
                    }
                    self.eof_sent = true;
                }
                Err(error) => {
                    // A mid-stream read failure ends the sequence, same as a
                    // true end-of-stream.
                    log::warn!(
                        "Stopping {} on read failure: {error}",
                        self.path.display(),
                    );
                    self.finished = true;
                    return None;
                }
            }
        }
    }

    /// Scale the current decoded frame to RGB24 and wrap it as an image.
    fn convert_current_frame(&mut self) -> Result<DynamicImage, String> {
        self.scaler
            .run(&self.decoded_frame, &mut self.rgb_frame)
            .map_err(|error| error.to_string())?;

        let width = self.metadata.width;
        let height = self.metadata.height;
        let buffer = conversion::frame_to_rgb_buffer(&self.rgb_frame, width, height);

        RgbImage::from_raw(width, height, buffer)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| "decoded frame data does not fill an RGB image".to_string())
    }
}

impl FrameSource for VideoSource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> Option<DynamicImage> {
        VideoSource::next_frame(self)
    }
}

fn source_error(path: &Path, reason: impl ToString) -> ExtractError {
    ExtractError::SourceUnavailable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
