pub mod controller;
pub mod index;
pub mod live;
pub mod preprocessed;

#[cfg(test)]
mod test_support;



pub use controller::{
    select_mode,
    Capabilities,
    ModeController,
    SubtitleSourceKind,
};
pub use live::{
    CaptionSource,
    CaptionSubscription,
    LiveMode,
};
pub use preprocessed::PreprocessedMode;

use crate::{
    config::SubtitleConfig,
    render::RenderSurface,
    segmentation::{
        Pronouncer,
        Segmenter,
    },
    vocab::VocabularyTable,
};

/// Everything a mode may touch during one tick. Config and vocabulary are
/// per-tick snapshots of externally owned state; modes must not cache them
/// across ticks.
pub struct TickContext<'a> {
    pub config: &'a SubtitleConfig,
    pub vocabulary: &'a VocabularyTable,
    pub surface: &'a mut dyn RenderSurface,
    pub segmenter: Option<&'a dyn Segmenter>,
    pub pronouncer: Option<&'a dyn Pronouncer>,
}

/// Capability every rendering mode implements. The controller holds exactly
/// one running mode at a time; presence of `stop` is a type-level
/// guarantee, not a runtime lookup.
pub trait SubtitleMode {
    fn update(&mut self, ctx: &mut TickContext<'_>);

    /// Redraws the currently displayed line (if any) under the current
    /// config, without waiting for the next natural subtitle change.
    fn re_render(&mut self, ctx: &mut TickContext<'_>);

    /// Stops the mode and releases its timers/subscriptions. Idempotent;
    /// also safe on a mode that never got to render.
    fn stop(&mut self, surface: &mut dyn RenderSurface);

    fn name(&self) -> &'static str;
}
