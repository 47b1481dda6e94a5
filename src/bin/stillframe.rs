use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use stillframe::{
    DecoderLogLevel, ExtractionProgress, ExtractionRequest, FrameExtractor, ProgressCallback,
};

const CLI_AFTER_HELP: &str = "Examples:\n  stillframe clip.mp4\n  stillframe clip.mp4 --every-ms 1000 --progress\n  stillframe clip.mp4 --json";

#[derive(Debug, Parser)]
#[command(
    name = "stillframe",
    version,
    about = "Extract still frames from a video into an image sequence",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video path.
    input: PathBuf,

    /// Save one frame every N milliseconds of video time instead of every frame.
    #[arg(long, value_name = "MS")]
    every_ms: Option<u64>,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    /// Print the result summary as JSON.
    #[arg(long)]
    json: bool,

    /// FFmpeg log level (quiet, error, warning, info, debug).
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_log_level(value: &str) -> Option<DecoderLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(DecoderLogLevel::Quiet),
        "error" => Some(DecoderLogLevel::Error),
        "warning" | "warn" => Some(DecoderLogLevel::Warning),
        "info" => Some(DecoderLogLevel::Info),
        "debug" => Some(DecoderLogLevel::Debug),
        _ => None,
    }
}

fn build_request(cli: &Cli) -> ExtractionRequest {
    match cli.every_ms {
        Some(interval_ms) => ExtractionRequest::every_millis(&cli.input, interval_ms),
        None => ExtractionRequest::all(&cli.input),
    }
}

/// Feeds per-frame progress into an indicatif bar.
///
/// The total frame count is only an estimate from the container, so the bar
/// length is set lazily from the first event and the bar stays a spinner when
/// no estimate is available.
struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::no_length();
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, progress: &ExtractionProgress) {
        if progress.total_frames > 0 && self.bar.length() != Some(progress.total_frames) {
            self.bar.set_length(progress.total_frames);
        }
        self.bar.set_position(progress.frames_read);
        self.bar.set_message(format!("{} saved", progress.frames_saved));
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        let parsed = parse_log_level(level).ok_or(format!("unsupported --log-level: {level}"))?;
        stillframe::set_decoder_log_level(parsed);
    }

    let mut extractor = FrameExtractor::new(build_request(&cli));

    let reporter = if cli.progress {
        let reporter = Arc::new(TerminalProgress::new()?);
        extractor = extractor.with_progress(reporter.clone());
        Some(reporter)
    } else {
        None
    };

    let result = extractor.run()?;

    if let Some(reporter) = reporter {
        reporter.finish();
    }

    if cli.json {
        let payload = json!({
            "frames_saved": result.frames_saved,
            "output_directory": result.output_directory.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "saved {} frame(s) to {}",
                result.frames_saved,
                result.output_directory.display()
            )
            .green()
        );
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
