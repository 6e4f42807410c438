pub mod config;
pub mod core;
pub mod player;
pub mod render;
pub mod segmentation;
pub mod sync;
pub mod transcript;
pub mod vocab;

pub use config::SubtitleConfig;
pub use core::{
    SubtitleEntry,
    ZimuError,
};
pub use sync::ModeController;
