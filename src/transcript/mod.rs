use std::{
    fs,
    path::PathBuf,
};

use crate::{
    core::{
        SubtitleEntry,
        ZimuError,
    },
    sync::index::normalize_entries,
};

/// Suffix the enrichment pipeline gives every transcript it writes.
pub const TRANSCRIPT_SUFFIX: &str = ".enriched.json";

/// Locator and existence checks for enriched transcripts, keyed by
/// normalized media title. Whether a transcript exists decides Preprocessed
/// vs Live mode; a failing `load` does not.
pub trait TranscriptStore {
    fn exists(&self, key: &str) -> bool;

    /// Resource locator for diagnostics and mode selection.
    fn filename(&self, key: &str) -> String {
        format!("{}{}", key, TRANSCRIPT_SUFFIX)
    }

    fn load(&self, key: &str) -> Result<Vec<SubtitleEntry>, ZimuError>;
}

/// Transcript store over a directory of `<key>.enriched.json` files, the
/// layout the enrichment pipeline produces.
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{}", key, TRANSCRIPT_SUFFIX))
    }
}

impl TranscriptStore for DirectoryStore {
    fn exists(&self, key: &str) -> bool {
        !key.is_empty() && self.path_for(key).is_file()
    }

    fn load(&self, key: &str) -> Result<Vec<SubtitleEntry>, ZimuError> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Err(ZimuError::MissingTranscript(key.to_string()));
        }

        let raw = fs::read_to_string(&path)?;
        let entries: Vec<SubtitleEntry> = serde_json::from_str(&raw).map_err(|e| {
            ZimuError::MalformedTranscript(self.filename(key), e.to_string())
        })?;

        let total = entries.len();
        let entries = normalize_entries(entries);
        if entries.len() < total {
            log::warn!(
                "Transcript {}: kept {} of {} entries after normalization",
                self.filename(key),
                entries.len(),
                total
            );
        }

        log::info!("Loaded transcript {} ({} entries)", self.filename(key), entries.len());
        Ok(entries)
    }
}
