pub mod errors;
pub mod models;
pub mod title;

pub use errors::ZimuError;
pub use models::{ SegmentedWord, SubtitleEntry, WordMeaning };
pub use title::normalize_title;
