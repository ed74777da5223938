use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use vidscribe_core::audio::domain::model_size::ModelSize;
use vidscribe_core::audio::domain::speech_recognizer::TranscribeOptions;
use vidscribe_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
use vidscribe_core::format::domain::output_format::OutputFormat;
use vidscribe_core::format::infrastructure::transcript_store::PersistTarget;
use vidscribe_core::pipeline::progress_reporter::ProgressReporter;
use vidscribe_core::pipeline::transcribe_video_use_case::TranscribeVideoUseCase;
use vidscribe_core::shared::model_resolver;
use vidscribe_core::video::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;

use crate::settings::Language;

/// Messages sent from the worker thread to the UI.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    DownloadProgress(u64, u64),
    Progress(u8, String),
    Complete { saved_file: Option<String> },
    Error(String),
}

/// Parameters for one transcription job.
pub struct TranscribeParams {
    pub video_path: PathBuf,
    pub output_dir: PathBuf,
    pub model: ModelSize,
    pub language: Language,
    pub format: OutputFormat,
}

/// Spawn a background transcription worker; progress and the final
/// outcome arrive on the returned channel.
pub fn spawn(params: TranscribeParams) -> Receiver<WorkerMessage> {
    let (tx, rx) = crossbeam_channel::unbounded::<WorkerMessage>();

    thread::spawn(move || {
        if let Err(e) = run(&tx, &params) {
            let _ = tx.send(WorkerMessage::Error(e.to_string()));
        }
    });

    rx
}

struct ChannelReporter {
    tx: Sender<WorkerMessage>,
}

impl ProgressReporter for ChannelReporter {
    fn report(&self, percent: u8, status: &str) {
        let _ = self
            .tx
            .send(WorkerMessage::Progress(percent, status.to_string()));
    }
}

fn run(tx: &Sender<WorkerMessage>, params: &TranscribeParams) -> Result<(), Box<dyn std::error::Error>> {
    let tx_dl = tx.clone();
    let model_path = model_resolver::resolve(
        params.model,
        None,
        Some(Box::new(move |downloaded, total| {
            let _ = tx_dl.send(WorkerMessage::DownloadProgress(downloaded, total));
        })),
    )?;
    let recognizer = WhisperRecognizer::new(&model_path)?;

    let reporter: Arc<dyn ProgressReporter> = Arc::new(ChannelReporter { tx: tx.clone() });
    reporter.report(
        10,
        &format!("Starting transcription: {} model", params.model),
    );
    let use_case = TranscribeVideoUseCase::new(
        Box::new(FfmpegAudioReader::new()),
        Box::new(recognizer),
        params.model,
        reporter,
    );

    let options = TranscribeOptions {
        language: params.language.code().map(str::to_string),
        threads: None,
    };
    let target = PersistTarget {
        dir: params.output_dir.clone(),
        format: params.format,
        timestamped: false,
    };

    let payload = use_case.execute(&params.video_path, &options, &target)?;
    let _ = tx.send(WorkerMessage::Complete {
        saved_file: payload.saved_file,
    });
    Ok(())
}
