use std::path::{Path, PathBuf};
use std::time::Duration;

use crossbeam_channel::Receiver;
use iced::widget::{
    button, column, container, pick_list, progress_bar, row, scrollable, text, text_input,
};
use iced::{Element, Length, Subscription, Task};

use vidscribe_core::audio::domain::model_size::ModelSize;
use vidscribe_core::format::domain::output_format::OutputFormat;
use vidscribe_core::shared::constants::VIDEO_EXTENSIONS;

use crate::settings::{Language, Settings};
use crate::workers::transcribe_worker::{self, TranscribeParams, WorkerMessage};

const MAX_VISIBLE_LOGS: usize = 20;

#[derive(Debug, Clone)]
pub enum Message {
    FolderChanged(String),
    BrowseFolder,
    FolderSelected(Option<PathBuf>),
    VideoSelected(String),
    ModelChanged(ModelSize),
    LanguageChanged(Language),
    FormatChanged(OutputFormat),
    OutputFolderChanged(String),
    StartTranscription,
    PollWorker,
    OpenOutput,
}

pub struct App {
    settings: Settings,
    folder_input: String,
    video_files: Vec<String>,
    selected_video: Option<String>,
    output_folder: String,
    progress: u8,
    status: String,
    logs: Vec<String>,
    worker: Option<Receiver<WorkerMessage>>,
    last_output: Option<String>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                settings: Settings::load(),
                folder_input: String::new(),
                video_files: Vec::new(),
                selected_video: None,
                output_folder: String::new(),
                progress: 0,
                status: "Ready".to_string(),
                logs: Vec::new(),
                worker: None,
                last_output: None,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FolderChanged(folder) => {
                self.folder_input = folder;
                self.rescan_folder();
            }
            Message::BrowseFolder => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select video folder")
                            .pick_folder()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::FolderSelected,
                );
            }
            Message::FolderSelected(Some(path)) => {
                self.folder_input = path.to_string_lossy().to_string();
                self.rescan_folder();
            }
            Message::FolderSelected(None) => {}
            Message::VideoSelected(video) => {
                self.selected_video = Some(video);
            }
            Message::ModelChanged(model) => {
                self.settings.model = model;
                self.settings.save();
            }
            Message::LanguageChanged(language) => {
                self.settings.language = language;
                self.settings.save();
            }
            Message::FormatChanged(format) => {
                self.settings.format = format;
                self.settings.save();
            }
            Message::OutputFolderChanged(folder) => {
                self.output_folder = folder;
            }
            Message::StartTranscription => {
                self.start_transcription();
            }
            Message::PollWorker => {
                self.poll_worker();
            }
            Message::OpenOutput => {
                if let Some(ref saved) = self.last_output {
                    if let Some(parent) = Path::new(saved).parent() {
                        let _ = open::that(parent);
                    }
                }
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let folder_row = row![
            text_input("Folder with videos", &self.folder_input)
                .on_input(Message::FolderChanged)
                .width(Length::Fill),
            button("Browse...").on_press(Message::BrowseFolder),
        ]
        .spacing(8);

        let video_picker: Element<'_, Message> = if self.video_files.is_empty() {
            text("No video files found in the selected folder")
                .size(13)
                .into()
        } else {
            pick_list(
                self.video_files.as_slice(),
                self.selected_video.clone(),
                Message::VideoSelected,
            )
            .placeholder("Select a video file")
            .width(Length::Fill)
            .into()
        };

        let options_row = row![
            pick_list(
                ModelSize::ALL,
                Some(self.settings.model),
                Message::ModelChanged
            ),
            pick_list(
                Language::ALL,
                Some(self.settings.language),
                Message::LanguageChanged
            ),
            pick_list(
                OutputFormat::ALL,
                Some(self.settings.format),
                Message::FormatChanged
            ),
        ]
        .spacing(8);

        let output_row = text_input("Output folder (defaults to the video folder)", &self.output_folder)
            .on_input(Message::OutputFolderChanged)
            .width(Length::Fill);

        let running = self.worker.is_some();
        let start_button = button(text(if running {
            "Transcribing..."
        } else {
            "Start Transcription"
        }))
        .on_press_maybe((!running).then_some(Message::StartTranscription))
        .width(Length::Fill);

        let open_button = button("Open output folder")
            .on_press_maybe(self.last_output.as_ref().map(|_| Message::OpenOutput));

        let visible_logs = self
            .logs
            .iter()
            .rev()
            .take(MAX_VISIBLE_LOGS)
            .rev()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let content = column![
            text("VidScribe").size(22),
            folder_row,
            video_picker,
            options_row,
            output_row,
            start_button,
            progress_bar(0.0..=100.0, self.progress as f32),
            text(format!("Status: {}", self.status)).size(13),
            scrollable(text(visible_logs).size(12)).height(Length::Fill),
            open_button,
        ]
        .spacing(12);

        container(content).padding(16).into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.worker.is_some() {
            iced::time::every(Duration::from_millis(100)).map(|_| Message::PollWorker)
        } else {
            Subscription::none()
        }
    }

    fn rescan_folder(&mut self) {
        self.video_files = list_video_files(Path::new(&self.folder_input));
        self.selected_video = None;
        if self.output_folder.is_empty() {
            self.output_folder = self.folder_input.clone();
        }
    }

    fn start_transcription(&mut self) {
        let Some(ref video) = self.selected_video else {
            self.status = "Please select a video file".to_string();
            return;
        };
        let output_dir = if self.output_folder.is_empty() {
            self.folder_input.clone()
        } else {
            self.output_folder.clone()
        };
        if !Path::new(&output_dir).exists() {
            self.status = "Output folder does not exist".to_string();
            return;
        }

        let params = TranscribeParams {
            video_path: Path::new(&self.folder_input).join(video),
            output_dir: PathBuf::from(output_dir),
            model: self.settings.model,
            language: self.settings.language,
            format: self.settings.format,
        };

        self.logs.clear();
        self.progress = 0;
        self.last_output = None;
        self.status = "Starting...".to_string();
        self.push_log(&format!("Starting transcription of: {video}"));
        self.worker = Some(transcribe_worker::spawn(params));
    }

    fn poll_worker(&mut self) {
        let Some(rx) = self.worker.clone() else {
            return;
        };

        let mut finished = false;
        while let Ok(message) = rx.try_recv() {
            match message {
                WorkerMessage::DownloadProgress(downloaded, total) => {
                    self.status = if total > 0 {
                        let pct = downloaded as f64 / total as f64 * 100.0;
                        format!("Downloading model... {pct:.0}%")
                    } else {
                        format!("Downloading model... {downloaded} bytes")
                    };
                }
                WorkerMessage::Progress(percent, status) => {
                    self.progress = percent;
                    self.status = status.clone();
                    self.push_log(&status);
                }
                WorkerMessage::Complete { saved_file } => {
                    self.progress = 100;
                    self.status = "Completed!".to_string();
                    if let Some(ref path) = saved_file {
                        self.push_log(&format!("Transcription saved to: {path}"));
                    }
                    self.last_output = saved_file;
                    finished = true;
                }
                WorkerMessage::Error(error) => {
                    self.progress = 0;
                    self.status = "Error occurred".to_string();
                    self.push_log(&format!("ERROR: {error}"));
                    log::error!("Transcription failed: {error}");
                    finished = true;
                }
            }
        }

        if finished {
            self.worker = None;
        }
    }

    fn push_log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push(format!("[{timestamp}] {message}"));
    }
}

/// Video files (by extension) directly inside `folder`, sorted by name.
fn list_video_files(folder: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(folder) else {
        return Vec::new();
    };
    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    files.sort();
    files
}
