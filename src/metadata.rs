//! Video stream metadata.
//!
//! [`VideoMetadata`] is extracted once when a [`VideoSource`](crate::VideoSource)
//! is opened and cached for the lifetime of the source.

/// Metadata for the video stream of an opened source.
///
/// # Example
///
/// ```no_run
/// use stillframe::VideoSource;
///
/// let source = VideoSource::open("input.mp4").unwrap();
/// let metadata = source.metadata();
/// println!("{}x{} @ {:.2} fps", metadata.width, metadata.height, metadata.frame_rate);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frame_rate: f64,
    /// Estimated total number of frames, computed from container duration and
    /// frame rate. Advisory only: the actual decode count is whatever the
    /// stream produces, and the extraction loop never uses this as a bound.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}
