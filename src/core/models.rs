use serde::Deserialize;

/// One segmented word of a subtitle line, as produced by the enrichment
/// pipeline. `pinyin` carries tone marks ("nǐ hǎo"), one syllable per
/// character, space separated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SegmentedWord {
    pub word: String,
    #[serde(default)]
    pub pinyin: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WordMeaning {
    pub word: String,
    #[serde(default)]
    pub meaning: String,
}

/// One timed line of an enriched transcript. Entries are ordered by `start`
/// within a transcript and `start < end` holds after normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubtitleEntry {
    pub start: f64, // Seconds
    pub end: f64,   // Seconds
    pub text: String,
    #[serde(default)]
    pub segmented: Vec<SegmentedWord>,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub word_meanings: Vec<WordMeaning>,
}

impl SubtitleEntry {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Contextual meaning for a word of this line, first match wins.
    pub fn meaning_for(&self, word: &str) -> Option<&str> {
        self.word_meanings
            .iter()
            .find(|m| m.word == word && !m.meaning.is_empty())
            .map(|m| m.meaning.as_str())
    }
}
