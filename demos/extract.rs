//! Extract still frames from a video file.
//!
//! Usage:
//!   cargo run --example extract -- <input_file>

use std::error::Error;

use stillframe::{ExtractionRequest, FrameExtractor, VideoSource};

fn main() -> Result<(), Box<dyn Error>> {
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "input.mp4".to_string());

    println!("Opening {input_path}...");
    let source = VideoSource::open(&input_path)?;
    let metadata = source.metadata();
    println!(
        "Video: {}x{}, {:.2} fps, ~{} frames [{}]",
        metadata.width, metadata.height, metadata.frame_rate, metadata.frame_count, metadata.codec,
    );
    drop(source);

    // Save one frame per second of video time.
    println!("Extracting one frame per second...");
    let result = FrameExtractor::new(ExtractionRequest::every_millis(&input_path, 1000)).run()?;
    println!(
        "Saved {} frame(s) to {}",
        result.frames_saved,
        result.output_directory.display(),
    );

    // Save every frame (overwrites the interval run's files where names collide).
    println!("Extracting every frame...");
    let result = FrameExtractor::new(ExtractionRequest::all(&input_path)).run()?;
    println!("Saved {} frame(s)", result.frames_saved);

    println!("Done!");
    Ok(())
}
