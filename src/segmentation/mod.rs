/// Word segmentation capability for live captions. The engine never
/// segments text itself; the host injects an implementation (or none, in
/// which case raw lines render unsegmented).
pub trait Segmenter {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Pronunciation capability: pinyin with tone marks for a single word, when
/// the host can provide it.
pub trait Pronouncer {
    fn pronounce(&self, word: &str) -> Option<String>;
}

/// Whether a char is a Han ideograph (URO block).
pub fn is_han_char(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Words outside the target script (numbers, latin fragments, punctuation)
/// carry no vocabulary status and are never underlined or annotated.
pub fn contains_han(text: &str) -> bool {
    text.chars().any(is_han_char)
}
