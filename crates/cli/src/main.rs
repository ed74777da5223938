use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use vidscribe_core::audio::domain::model_size::ModelSize;
use vidscribe_core::audio::domain::speech_recognizer::TranscribeOptions;
use vidscribe_core::audio::infrastructure::whisper_recognizer::{
    default_threads, device_label, WhisperRecognizer,
};
use vidscribe_core::delivery::infrastructure::stdout_channel::StdoutChannel;
use vidscribe_core::format::domain::output_format::OutputFormat;
use vidscribe_core::format::infrastructure::transcript_store::PersistTarget;
use vidscribe_core::pipeline::progress_reporter::ProgressReporter;
use vidscribe_core::pipeline::transcribe_video_use_case::TranscribeVideoUseCase;
use vidscribe_core::shared::constants::TRANSCRIPTIONS_DIR;
use vidscribe_core::shared::model_resolver;
use vidscribe_core::video::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;

/// Transcribe the audio track of a video file.
///
/// Emits single-line JSON progress records on stdout, followed by one
/// delimiter-wrapped base64 result line an embedding parent process can
/// extract. Logs go to stderr.
#[derive(Parser)]
#[command(name = "vidscribe")]
struct Cli {
    /// Input video file.
    video_path: PathBuf,

    /// Whisper model size: tiny, base, small, medium, large.
    #[arg(long, default_value = "base")]
    model: String,

    /// ISO 639-1 language code (omit to auto-detect).
    #[arg(long)]
    language: Option<String>,

    /// Transcript format: txt, srt, vtt, json.
    #[arg(long, default_value = "json")]
    format: String,

    /// Directory for the saved transcript (default: ./transcriptions).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Inference threads (default: half the available cores).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() {
    env_logger::init();

    let channel = Arc::new(StdoutChannel::stdout());
    if let Err(e) = run(&channel) {
        // Parents watching the protocol see the failure as a
        // zero-progress record; humans see it on stderr.
        channel.report(0, &format!("Error: {e}"));
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(channel: &Arc<StdoutChannel>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let model: ModelSize = cli.model.parse()?;
    let format: OutputFormat = cli.format.parse()?;
    let threads = cli.threads.unwrap_or_else(default_threads);

    channel.report(
        5,
        &format!("Using device: {} ({threads} threads)", device_label()),
    );

    channel.report(10, "Loading model...");
    let model_path = model_resolver::resolve(model, None, Some(Box::new(download_progress)))?;
    let recognizer = WhisperRecognizer::new(&model_path)?;
    channel.report(30, "Model loaded, detecting audio...");

    let reporter: Arc<dyn ProgressReporter> = channel.clone();
    let use_case = TranscribeVideoUseCase::new(
        Box::new(FfmpegAudioReader::new()),
        Box::new(recognizer),
        model,
        reporter,
    );

    let options = TranscribeOptions {
        language: cli.language,
        threads: Some(threads),
    };
    let target = PersistTarget {
        dir: cli
            .output_dir
            .unwrap_or_else(|| PathBuf::from(TRANSCRIPTIONS_DIR)),
        format,
        timestamped: true,
    };

    let payload = use_case.execute(&cli.video_path, &options, &target)?;
    log::info!("Sending transcription result ({} chars)", payload.text.len());
    channel.deliver(&payload)?;
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.video_path.exists() {
        return Err(format!("Input file not found: {}", cli.video_path.display()).into());
    }
    if cli.threads == Some(0) {
        return Err("Threads must be at least 1".into());
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}
