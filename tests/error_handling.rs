//! Failure-path integration tests.
//!
//! These exercise the FFmpeg adapter with inputs that cannot be decoded and
//! verify that nothing is written on the way out.

use stillframe::{ExtractError, ExtractionRequest, FrameExtractor, VideoSource};

#[test]
fn open_nonexistent_file() {
    let result = VideoSource::open("this_file_does_not_exist.mp4");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open video source"),
        "Error message should mention the open failure: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    // A file with garbage content is not a decodable video.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = VideoSource::open(&invalid_file_path);
    assert!(
        matches!(result, Err(ExtractError::SourceUnavailable { .. })),
        "Expected SourceUnavailable for a non-video file",
    );
}

#[test]
fn run_against_missing_file_creates_no_output_directory() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = temporary_directory.path().join("missing.mp4");

    let result = FrameExtractor::new(ExtractionRequest::all(&missing)).run();

    assert!(matches!(result, Err(ExtractError::SourceUnavailable { .. })));
    assert!(
        !temporary_directory.path().join("missing_frames").exists(),
        "An unopenable source must leave no trace on disk",
    );
}

#[test]
fn run_against_garbage_file_creates_no_output_directory() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let garbage = temporary_directory.path().join("garbage.mp4");
    std::fs::write(&garbage, b"\x00\x01\x02\x03 definitely not video")
        .expect("Failed to write garbage file");

    let result = FrameExtractor::new(ExtractionRequest::all(&garbage)).run();

    assert!(matches!(result, Err(ExtractError::SourceUnavailable { .. })));
    assert!(!temporary_directory.path().join("garbage_frames").exists());
}

#[test]
fn zero_interval_is_rejected_before_any_io() {
    // The path does not even exist: validation fires before the open.
    let result =
        FrameExtractor::new(ExtractionRequest::every_millis("never_opened.mp4", 0)).run();

    match result {
        Err(ExtractError::InvalidConfiguration(reason)) => {
            assert!(
                reason.contains("positive"),
                "Reason should explain the constraint: {reason}",
            );
        }
        other => panic!("Expected InvalidConfiguration, got: {other:?}"),
    }
}
