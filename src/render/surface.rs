use super::annotator::Tone;
use crate::vocab::StatusTier;

/// Style snapshot copied into every rendered line, so a config change is
/// visible on the very next render.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub font_size: f32,
    pub position_offset: f32,
    pub line_height: f32,
}

/// One annotated word, ready for the host to materialize as an element.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedWord {
    pub text: String,
    /// Pinyin shown above the word, already gated by config.
    pub pronunciation: Option<String>,
    /// Per-syllable tones for character coloring; empty when tone coloring
    /// does not apply to this word.
    pub tones: Vec<Tone>,
    /// Underline CSS color keyed to vocabulary status, `None` for no
    /// underline.
    pub underline: Option<&'static str>,
    /// Contextual meaning for the hover tooltip.
    pub meaning: Option<String>,
    /// Current familiarity tier, for the host's click-driven status editor.
    pub status: StatusTier,
}

/// A fully annotated subtitle line. Built completely before the surface
/// sees it; a partially annotated line is never observable.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub words: Vec<RenderedWord>,
    pub translation: Option<String>,
    pub explanation: Option<String>,
    pub style: LineStyle,
}

impl RenderedLine {
    pub fn text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

/// The overlay container the engine owns exclusively while a mode runs.
/// Lines are discarded and rebuilt wholesale; no incremental patching.
pub trait RenderSurface {
    fn show_line(&mut self, line: RenderedLine);
    fn clear(&mut self);
}
