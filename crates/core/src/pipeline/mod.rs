pub mod infrastructure;
pub mod progress_reporter;
pub mod progress_schedule;
pub mod transcribe_video_use_case;
