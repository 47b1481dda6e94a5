//! Internal pixel-data and rational-arithmetic helpers.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy pixel data from a scaled RGB24 frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3); the
/// padding has to be stripped before the data can be handed to
/// [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = frame.stride(0);
    let row_bytes = (width as usize) * 3;
    let data = frame.data(0);

    if stride == row_bytes {
        // No padding: copy the whole plane at once.
        data[..row_bytes * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_bytes * (height as usize));
        for row in 0..(height as usize) {
            let start = row * stride;
            buffer.extend_from_slice(&data[start..start + row_bytes]);
        }
        buffer
    }
}

/// Evaluate a rational, returning 0.0 for a zero denominator.
pub(crate) fn rational_to_f64(value: Rational) -> f64 {
    if value.denominator() == 0 {
        0.0
    } else {
        value.numerator() as f64 / value.denominator() as f64
    }
}
