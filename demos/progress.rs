//! Demonstrate progress reporting and cancellation during extraction.
//!
//! Usage:
//!   cargo run --example progress -- <input_file>

use std::error::Error;
use std::sync::Arc;

use stillframe::{
    CancellationToken, ExtractionProgress, ExtractionRequest, FrameExtractor, ProgressCallback,
};

/// Simple progress callback that prints to stdout.
struct PrintProgress;

impl ProgressCallback for PrintProgress {
    fn on_progress(&self, progress: &ExtractionProgress) {
        println!(
            "processing {}/{} ({} saved)",
            progress.frames_read, progress.total_frames, progress.frames_saved,
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "input.mp4".to_string());

    // ── Progress callback ──────────────────────────────────────────
    println!("Extracting with progress reporting...");
    let result = FrameExtractor::new(ExtractionRequest::every_millis(&input_path, 2000))
        .with_progress(Arc::new(PrintProgress))
        .run()?;
    println!("Saved {} frame(s)\n", result.frames_saved);

    // ── Cancellation token ─────────────────────────────────────────
    println!("Demonstrating cancellation...");
    let token = CancellationToken::new();

    // Cancel immediately to demonstrate the mechanism; a cancelled run is a
    // clean early termination, not an error.
    token.cancel();

    let result = FrameExtractor::new(ExtractionRequest::all(&input_path))
        .with_cancellation(token)
        .run()?;
    println!("Cancelled run saved {} frame(s)", result.frames_saved);

    println!("\nDone!");
    Ok(())
}
