use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{
        Arc,
        RwLock,
    },
};

use serde::Deserialize;

use crate::core::ZimuError;

/// Raw familiarity record for one word, as the vocabulary service stores
/// it. `status` runs 0..=3; words at status 3 split into Learned and Known
/// through `extended_status`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WordStatus {
    pub status: u8,
    #[serde(default)]
    pub extended_status: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Word -> status table, refreshed from outside the engine and only ever
/// read here.
pub type VocabularyTable = HashMap<String, WordStatus>;

pub type SharedVocabulary = Arc<RwLock<VocabularyTable>>;

/// Display-facing familiarity tier. `Unseen` is the absence of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTier {
    Unseen,
    New,
    Recognized,
    Familiar,
    Learned,
    Known,
}

impl StatusTier {
    pub fn from_record(record: Option<&WordStatus>) -> Self {
        let Some(record) = record else {
            return StatusTier::Unseen;
        };

        match record.status {
            0 => StatusTier::New,
            1 => StatusTier::Recognized,
            2 => StatusTier::Familiar,
            _ => {
                if record.extended_status == Some(3) {
                    StatusTier::Known
                } else {
                    StatusTier::Learned
                }
            }
        }
    }

    pub fn of(table: &VocabularyTable, word: &str) -> Self {
        Self::from_record(table.get(word))
    }

    /// Whether the word still counts as unknown for `unknown-only` display
    /// gates. Status 3 in either flavor is known enough.
    pub fn is_unknown(self) -> bool {
        !matches!(self, StatusTier::Learned | StatusTier::Known)
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusTier::Unseen => "Unseen",
            StatusTier::New => "New",
            StatusTier::Recognized => "Recognized",
            StatusTier::Familiar => "Familiar",
            StatusTier::Learned => "Learned",
            StatusTier::Known => "Known",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExportRow {
    term: Option<String>,
    #[serde(default)]
    status: u8,
    #[serde(default)]
    extended_status: Option<u8>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parses a raw vocabulary-service export (JSON array of cards) into the
/// lookup table. Rows without a term are skipped.
pub fn parse_vocabulary_export(json: &str) -> Result<VocabularyTable, ZimuError> {
    let rows: Vec<ExportRow> = serde_json::from_str(json)?;

    let mut table = VocabularyTable::with_capacity(rows.len());
    for row in rows {
        let Some(term) = row.term else {
            continue;
        };
        table.insert(
            term,
            WordStatus {
                status: row.status,
                extended_status: row.extended_status,
                tags: row.tags,
            },
        );
    }

    Ok(table)
}

pub fn load_vocabulary_export(path: &Path) -> Result<VocabularyTable, ZimuError> {
    let table = parse_vocabulary_export(&fs::read_to_string(path)?)?;
    log::info!("Loaded {} vocabulary entries from {:?}", table.len(), path);
    Ok(table)
}
