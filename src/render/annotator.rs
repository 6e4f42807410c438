use super::surface::{
    LineStyle,
    RenderedLine,
    RenderedWord,
};
use crate::{
    config::{
        SubtitleConfig,
        VocabularyOverlay,
    },
    core::SubtitleEntry,
    segmentation::{
        contains_han,
        Pronouncer,
    },
    vocab::{
        StatusTier,
        VocabularyTable,
    },
};

/// Mandarin tone of one pinyin syllable, read off its tone-marked vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
    Neutral,
}

const TONE1_MARKS: &str = "āēīōūǖ";
const TONE2_MARKS: &str = "áéíóúǘ";
const TONE3_MARKS: &str = "ǎěǐǒǔǚ";
const TONE4_MARKS: &str = "àèìòùǜ";

impl Tone {
    pub fn from_syllable(syllable: &str) -> Self {
        for c in syllable.chars() {
            if TONE1_MARKS.contains(c) {
                return Tone::First;
            }
            if TONE2_MARKS.contains(c) {
                return Tone::Second;
            }
            if TONE3_MARKS.contains(c) {
                return Tone::Third;
            }
            if TONE4_MARKS.contains(c) {
                return Tone::Fourth;
            }
        }
        Tone::Neutral
    }

    pub fn color(self) -> &'static str {
        match self {
            Tone::First => "#e30000",
            Tone::Second => "#02b31c",
            Tone::Third => "#1510f0",
            Tone::Fourth => "#8900bf",
            Tone::Neutral => "#777777",
        }
    }
}

/// Tones of a space-separated tone-marked pinyin string, one per syllable.
pub fn parse_tones(pinyin: &str) -> Vec<Tone> {
    pinyin.split_whitespace().map(Tone::from_syllable).collect()
}

const UNSEEN_COLOR: &str = "#4a90d9";
const NEW_COLOR: &str = "#e0a500";
const RECOGNIZED_COLOR: &str = "#e8bc4a";
const FAMILIAR_COLOR: &str = "#f2d88f";
const LEARNED_COLOR: &str = "#7bb661";

/// Underline color for a word. Words outside the target script are never
/// underlined; Known words carry none either.
fn underline_color(
    tier: StatusTier,
    overlay: VocabularyOverlay,
    is_target_word: bool,
) -> Option<&'static str> {
    if !is_target_word || overlay == VocabularyOverlay::Off {
        return None;
    }
    if overlay == VocabularyOverlay::UnknownOnly && !tier.is_unknown() {
        return None;
    }

    match tier {
        StatusTier::Unseen => Some(UNSEEN_COLOR),
        StatusTier::New => Some(NEW_COLOR),
        StatusTier::Recognized => Some(RECOGNIZED_COLOR),
        StatusTier::Familiar => Some(FAMILIAR_COLOR),
        StatusTier::Learned => Some(LEARNED_COLOR),
        StatusTier::Known => None,
    }
}

/// Annotates a single word. Pure in its inputs: the word, its optional
/// tone-marked pinyin, an optional contextual meaning, the config snapshot
/// and the vocabulary table.
pub fn render_word(
    word: &str,
    pinyin: Option<&str>,
    meaning: Option<&str>,
    config: &SubtitleConfig,
    vocabulary: &VocabularyTable,
) -> RenderedWord {
    let is_target_word = contains_han(word);
    let tier =
        if is_target_word { StatusTier::of(vocabulary, word) } else { StatusTier::Unseen };
    let unknown = tier.is_unknown();

    let pronunciation = if is_target_word && config.pronunciation.applies(unknown) {
        pinyin.filter(|p| !p.is_empty()).map(str::to_string)
    } else {
        None
    };

    let tones = if is_target_word && config.tone_coloring.applies(unknown) {
        pinyin.map(parse_tones).unwrap_or_default()
    } else {
        Vec::new()
    };

    RenderedWord {
        text: word.to_string(),
        pronunciation,
        tones,
        underline: underline_color(tier, config.vocabulary_overlay, is_target_word),
        meaning: meaning.filter(|m| !m.is_empty()).map(str::to_string),
        status: tier,
    }
}

fn line_style(config: &SubtitleConfig) -> LineStyle {
    LineStyle {
        font_size: config.font_size,
        position_offset: config.position_offset,
        line_height: config.line_height,
    }
}

/// Renders a preprocessed transcript entry: segmentation, pinyin and
/// meanings all come from the entry itself.
pub fn render_entry(
    entry: &SubtitleEntry,
    config: &SubtitleConfig,
    vocabulary: &VocabularyTable,
) -> RenderedLine {
    let words = entry
        .segmented
        .iter()
        .map(|seg| {
            let pinyin = if seg.pinyin.is_empty() { None } else { Some(seg.pinyin.as_str()) };
            render_word(&seg.word, pinyin, entry.meaning_for(&seg.word), config, vocabulary)
        })
        .collect();

    RenderedLine {
        words,
        translation: (config.show_translation && !entry.translation.is_empty())
            .then(|| entry.translation.clone()),
        explanation: (!entry.explanation.is_empty()).then(|| entry.explanation.clone()),
        style: line_style(config),
    }
}

/// Renders a live caption from bare segmented words: no timing, no
/// translation, pronunciation only as far as the pronouncer can provide it.
pub fn render_live_line(
    words: &[String],
    pronouncer: Option<&dyn Pronouncer>,
    config: &SubtitleConfig,
    vocabulary: &VocabularyTable,
) -> RenderedLine {
    let words = words
        .iter()
        .map(|word| {
            let pinyin = pronouncer.and_then(|p| p.pronounce(word));
            render_word(word, pinyin.as_deref(), None, config, vocabulary)
        })
        .collect();

    RenderedLine {
        words,
        translation: None,
        explanation: None,
        style: line_style(config),
    }
}
