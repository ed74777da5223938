pub mod audio;
pub mod delivery;
pub mod format;
pub mod pipeline;
pub mod shared;
pub mod video;
