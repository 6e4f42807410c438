use serde::{
    Deserialize,
    Serialize,
};

/// Three-way gate shared by pronunciation display and tone coloring.
/// `UnknownOnly` is evaluated per word against the vocabulary table, never
/// per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationGate {
    Off,
    UnknownOnly,
    All,
}

impl AnnotationGate {
    pub fn applies(self, word_is_unknown: bool) -> bool {
        match self {
            AnnotationGate::Off => false,
            AnnotationGate::UnknownOnly => word_is_unknown,
            AnnotationGate::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyOverlay {
    Off,
    UnknownOnly,
    On,
}

/// Process-wide subtitle settings. The external UI owns and mutates this;
/// the engine reads a fresh snapshot every tick so changes take effect on
/// the next render without a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleConfig {
    pub show_overlay: bool,
    pub font_size: f32,
    /// Vertical offset of the overlay, percent of player height from bottom.
    pub position_offset: f32,
    pub line_height: f32,
    pub vocabulary_overlay: VocabularyOverlay,
    pub pronunciation: AnnotationGate,
    pub tone_coloring: AnnotationGate,
    pub show_translation: bool,
    /// Keep the last-started line visible through gaps between lines.
    pub continuous_display: bool,
    pub auto_pause: bool,
    /// Seconds past a line's end before auto-pause fires, measured in video
    /// time. Silence skipping reuses the same delay so the two never race.
    pub auto_pause_delay: f64,
    pub skip_silence: bool,
    /// Minimum gap between lines, in seconds, before a skip is considered.
    pub min_silence_gap: f64,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            show_overlay: true,
            font_size: 28.0,
            position_offset: 12.0,
            line_height: 1.4,
            vocabulary_overlay: VocabularyOverlay::On,
            pronunciation: AnnotationGate::UnknownOnly,
            tone_coloring: AnnotationGate::Off,
            show_translation: true,
            continuous_display: false,
            auto_pause: false,
            auto_pause_delay: 0.5,
            skip_silence: false,
            min_silence_gap: 2.0,
        }
    }
}
