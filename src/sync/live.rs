use std::sync::mpsc::{
    channel,
    Receiver,
    Sender,
};

use super::{
    SubtitleMode,
    TickContext,
};
use crate::render::{
    render_live_line,
    RenderSurface,
};

/// Handle onto an active caption observation. `unsubscribe` is idempotent
/// and also runs on drop, so a dropped mode never leaves an observer
/// connected.
pub struct CaptionSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl CaptionSubscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Subscription that needs no teardown (callers that manage cleanup
    /// through the sender side).
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for CaptionSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Host capability over the native caption container: every caption text
/// the host page renders is sent into the sink until the subscription is
/// cancelled.
pub trait CaptionSource {
    fn observe(&mut self, sink: Sender<String>) -> CaptionSubscription;
}

/// Fallback mode for titles without an enriched transcript: segments and
/// annotates captions scraped from the host page in real time. No timing
/// metadata, so no translation, auto-pause or skip.
pub struct LiveMode {
    receiver: Receiver<String>,
    subscription: CaptionSubscription,
    /// Last caption text already processed; mutations repeating it are
    /// ignored, and `re_render` redraws it on config changes.
    last_caption: Option<String>,
    shown: bool,
    stopped: bool,
}

impl LiveMode {
    pub fn start(source: &mut dyn CaptionSource) -> Self {
        let (sender, receiver) = channel();
        let subscription = source.observe(sender);
        Self { receiver, subscription, last_caption: None, shown: false, stopped: false }
    }

    /// Drains queued caption events, keeping only whether something new
    /// arrived; intermediate captions that queued up between ticks are
    /// superseded by the newest one.
    fn drain_captions(&mut self) -> bool {
        let mut dirty = false;
        while let Ok(text) = self.receiver.try_recv() {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            if self.last_caption.as_deref() != Some(trimmed) {
                self.last_caption = Some(trimmed.to_string());
                dirty = true;
            }
        }
        dirty
    }

    fn render_caption(&mut self, ctx: &mut TickContext<'_>) {
        let Some(text) = self.last_caption.as_deref() else {
            return;
        };

        // Degrade to the raw, unsegmented line when no segmenter is
        // available or it produces nothing.
        let words = match ctx.segmenter.map(|s| s.segment(text)) {
            Some(words) if !words.is_empty() => words,
            _ => vec![text.to_string()],
        };

        let line = render_live_line(&words, ctx.pronouncer, ctx.config, ctx.vocabulary);
        ctx.surface.show_line(line);
        self.shown = true;
    }

    fn clear_if_shown(&mut self, surface: &mut dyn RenderSurface) {
        if self.shown {
            surface.clear();
            self.shown = false;
        }
    }
}

impl SubtitleMode for LiveMode {
    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if self.stopped {
            return;
        }

        let dirty = self.drain_captions();

        if !ctx.config.show_overlay {
            self.clear_if_shown(ctx.surface);
            return;
        }

        if dirty {
            self.render_caption(ctx);
        }
    }

    fn re_render(&mut self, ctx: &mut TickContext<'_>) {
        if self.stopped {
            return;
        }
        if !ctx.config.show_overlay {
            self.clear_if_shown(ctx.surface);
            return;
        }
        self.render_caption(ctx);
    }

    fn stop(&mut self, surface: &mut dyn RenderSurface) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.subscription.unsubscribe();
        self.last_caption = None;
        self.shown = false;
        surface.clear();
        log::debug!("Live mode stopped");
    }

    fn name(&self) -> &'static str {
        "live"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SubtitleConfig,
        sync::test_support::{
            FakeCaptions,
            RecordingSurface,
            WhitespaceSegmenter,
            vocabulary,
        },
        vocab::VocabularyTable,
    };

    fn tick(
        mode: &mut LiveMode,
        surface: &mut RecordingSurface,
        config: &SubtitleConfig,
        vocab: &VocabularyTable,
        segmented: bool,
    ) {
        let segmenter = WhitespaceSegmenter;
        let mut ctx = TickContext {
            config,
            vocabulary: vocab,
            surface,
            segmenter: segmented.then_some(&segmenter as &dyn crate::segmentation::Segmenter),
            pronouncer: None,
        };
        mode.update(&mut ctx);
    }

    #[test]
    fn renders_new_captions_and_ignores_repeats() {
        let mut captions = FakeCaptions::default();
        let mut mode = LiveMode::start(&mut captions);
        let mut surface = RecordingSurface::default();
        let config = SubtitleConfig::default();
        let vocab = vocabulary();

        captions.push("你好 世界");
        tick(&mut mode, &mut surface, &config, &vocab, true);
        assert_eq!(surface.shown_text().as_deref(), Some("你好世界"));
        assert_eq!(surface.current.as_ref().unwrap().words.len(), 2);

        // The host page re-emitting the same text is not a new caption.
        captions.push("你好 世界");
        captions.push("  你好 世界  ");
        tick(&mut mode, &mut surface, &config, &vocab, true);
        assert_eq!(surface.shows, 1);

        captions.push("再见");
        tick(&mut mode, &mut surface, &config, &vocab, true);
        assert_eq!(surface.shown_text().as_deref(), Some("再见"));
        assert_eq!(surface.shows, 2);
    }

    #[test]
    fn queued_captions_collapse_to_the_newest() {
        let mut captions = FakeCaptions::default();
        let mut mode = LiveMode::start(&mut captions);
        let mut surface = RecordingSurface::default();
        let config = SubtitleConfig::default();
        let vocab = vocabulary();

        captions.push("一");
        captions.push("二");
        captions.push("三");
        tick(&mut mode, &mut surface, &config, &vocab, true);
        assert_eq!(surface.shown_text().as_deref(), Some("三"));
        assert_eq!(surface.shows, 1);
    }

    #[test]
    fn missing_segmenter_renders_raw_line() {
        let mut captions = FakeCaptions::default();
        let mut mode = LiveMode::start(&mut captions);
        let mut surface = RecordingSurface::default();
        let config = SubtitleConfig::default();
        let vocab = vocabulary();

        captions.push("你好 世界");
        tick(&mut mode, &mut surface, &config, &vocab, false);
        let line = surface.current.as_ref().unwrap();
        assert_eq!(line.words.len(), 1);
        assert_eq!(line.words[0].text, "你好 世界");
        assert_eq!(line.translation, None);
    }

    #[test]
    fn re_render_redraws_last_caption_under_new_config() {
        let mut captions = FakeCaptions::default();
        let mut mode = LiveMode::start(&mut captions);
        let mut surface = RecordingSurface::default();
        let mut config = SubtitleConfig::default();
        let vocab = vocabulary();

        captions.push("你好");
        tick(&mut mode, &mut surface, &config, &vocab, true);
        assert_eq!(surface.current.as_ref().unwrap().style.font_size, config.font_size);

        config.font_size = 44.0;
        let segmenter = WhitespaceSegmenter;
        let mut ctx = TickContext {
            config: &config,
            vocabulary: &vocab,
            surface: &mut surface,
            segmenter: Some(&segmenter),
            pronouncer: None,
        };
        mode.re_render(&mut ctx);
        assert_eq!(surface.current.as_ref().unwrap().style.font_size, 44.0);
        assert_eq!(surface.shows, 2);
    }

    #[test]
    fn stop_unsubscribes_once_and_clears() {
        let mut captions = FakeCaptions::default();
        let mut mode = LiveMode::start(&mut captions);
        let mut surface = RecordingSurface::default();
        let config = SubtitleConfig::default();
        let vocab = vocabulary();

        captions.push("你好");
        tick(&mut mode, &mut surface, &config, &vocab, true);
        assert_eq!(captions.active_subscriptions(), 1);

        mode.stop(&mut surface);
        assert_eq!(captions.active_subscriptions(), 0);
        assert_eq!(surface.current, None);

        mode.stop(&mut surface);
        assert_eq!(captions.active_subscriptions(), 0);

        // Stopped modes ignore later captions.
        captions.push("再见");
        tick(&mut mode, &mut surface, &config, &vocab, true);
        assert_eq!(surface.current, None);
    }

    #[test]
    fn dropping_the_mode_releases_the_observer() {
        let mut captions = FakeCaptions::default();
        let mode = LiveMode::start(&mut captions);
        assert_eq!(captions.active_subscriptions(), 1);
        drop(mode);
        assert_eq!(captions.active_subscriptions(), 0);
    }
}
