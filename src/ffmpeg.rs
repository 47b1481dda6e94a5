//! FFmpeg log verbosity control.
//!
//! FFmpeg has its own logging system, separate from the Rust
//! [`log`](https://crates.io/crates/log) facade, and by default it prints
//! warnings to stderr. This is a thin wrapper so callers can quiet it down
//! without importing `ffmpeg-next` directly. It does not affect the crate's
//! own `log`-based diagnostics.

use ffmpeg_next::util::log::Level;

/// FFmpeg internal log verbosity, most quiet to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderLogLevel {
    /// Print nothing at all.
    Quiet,
    /// Recoverable errors only.
    Error,
    /// Warnings and errors (FFmpeg's default).
    Warning,
    /// Informational messages and above.
    Info,
    /// Debugging output.
    Debug,
}

impl DecoderLogLevel {
    fn to_ffmpeg_level(self) -> Level {
        match self {
            DecoderLogLevel::Quiet => Level::Quiet,
            DecoderLogLevel::Error => Level::Error,
            DecoderLogLevel::Warning => Level::Warning,
            DecoderLogLevel::Info => Level::Info,
            DecoderLogLevel::Debug => Level::Debug,
        }
    }
}

/// Set how much FFmpeg prints to stderr while decoding.
///
/// # Example
///
/// ```no_run
/// use stillframe::DecoderLogLevel;
///
/// stillframe::set_decoder_log_level(DecoderLogLevel::Quiet);
/// ```
pub fn set_decoder_log_level(level: DecoderLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg_level());
}
