use super::{
    index,
    SubtitleMode,
    TickContext,
};
use crate::{
    config::SubtitleConfig,
    core::SubtitleEntry,
    player::{
        seek_preserving_state,
        SharedVideo,
    },
    render::{
        render_entry,
        RenderSurface,
    },
};

/// Auto-pause deadline, measured in video time so it stays correct across
/// variable poll latency.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingPause {
    fire_at: f64,
    entry_start: f64,
}

/// Renders a fixed, pre-sorted transcript against the video clock, and owns
/// the auto-pause / silence-skip scheduling around subtitle boundaries.
pub struct PreprocessedMode {
    entries: Vec<SubtitleEntry>,
    video: SharedVideo,
    /// `start` of the last rendered entry; unique within one transcript.
    last_rendered: Option<f64>,
    pending_pause: Option<PendingPause>,
    /// `start` of the entry whose pause already fired, so a replayed entry
    /// does not pause twice.
    last_auto_paused: Option<f64>,
    stopped: bool,
}

impl PreprocessedMode {
    pub fn new(entries: Vec<SubtitleEntry>, video: SharedVideo) -> Self {
        if entries.is_empty() {
            // Degraded but non-fatal: the poller runs and never renders.
            log::warn!("Preprocessed mode starting with an empty transcript");
        }
        Self {
            entries,
            video,
            last_rendered: None,
            pending_pause: None,
            last_auto_paused: None,
            stopped: false,
        }
    }

    fn current_time(&self) -> Option<f64> {
        self.video.lock().ok().map(|video| video.current_time())
    }

    fn clear_if_shown(&mut self, surface: &mut dyn RenderSurface) {
        if self.last_rendered.take().is_some() {
            surface.clear();
        }
    }

    fn entry_by_start(&self, start: f64) -> Option<&SubtitleEntry> {
        self.entries.iter().find(|entry| entry.start == start)
    }

    /// Cancels any previously scheduled pause and schedules one for the
    /// just-rendered entry, unless the entry already paused once or the
    /// next line repeats this line's text verbatim.
    fn schedule_auto_pause(&mut self, idx: usize, config: &SubtitleConfig) {
        self.pending_pause = None;

        if !config.auto_pause {
            return;
        }

        let entry = &self.entries[idx];
        if self.last_auto_paused == Some(entry.start) {
            return;
        }
        if let Some(next) = self.entries.get(idx + 1) {
            if next.text == entry.text {
                log::debug!("Auto-pause suppressed for repeated line at {:.3}", entry.start);
                return;
            }
        }

        self.pending_pause = Some(PendingPause {
            fire_at: entry.end + config.auto_pause_delay,
            entry_start: entry.start,
        });
    }

    fn fire_pending_pause(&mut self, t: f64) {
        let Some(pending) = self.pending_pause else {
            return;
        };
        if t < pending.fire_at {
            return;
        }

        self.pending_pause = None;
        self.last_auto_paused = Some(pending.entry_start);

        // Harmless against a video the user already paused.
        if let Ok(mut video) = self.video.lock() {
            video.pause();
            log::debug!("Auto-paused at {:.3}", t);
        }
    }

    /// Seeks over a silent gap once playback is `auto_pause_delay` past the
    /// current entry's end. Reusing the pause delay, and refusing to run
    /// while a pause is pending, keeps skip and pause from racing on the
    /// same boundary.
    fn check_silence_skip(&mut self, t: f64, config: &SubtitleConfig) {
        if !config.skip_silence || self.pending_pause.is_some() {
            return;
        }

        let Some(idx) = index::most_recent_index(t, &self.entries) else {
            return;
        };
        let Some(next) = self.entries.get(idx + 1) else {
            return;
        };
        let current = &self.entries[idx];

        if next.start - current.end < config.min_silence_gap {
            return;
        }
        if t < current.end + config.auto_pause_delay || t >= next.start {
            return;
        }

        if let Ok(mut video) = self.video.lock() {
            if video.paused() {
                return;
            }
            seek_preserving_state(&mut *video, next.start);
            log::debug!("Skipped silence {:.3} -> {:.3}", t, next.start);
        }
    }

    fn render_index(&mut self, idx: usize, ctx: &mut TickContext<'_>) {
        let line = render_entry(&self.entries[idx], ctx.config, ctx.vocabulary);
        ctx.surface.show_line(line);
        self.last_rendered = Some(self.entries[idx].start);
    }
}

impl SubtitleMode for PreprocessedMode {
    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if self.stopped {
            return;
        }
        let Some(t) = self.current_time() else {
            return;
        };

        if !ctx.config.show_overlay {
            self.clear_if_shown(ctx.surface);
            self.pending_pause = None;
            return;
        }

        let selected = if ctx.config.continuous_display {
            index::most_recent_index(t, &self.entries)
        } else {
            index::active_index(t, &self.entries)
        };

        match selected {
            Some(idx) if self.last_rendered != Some(self.entries[idx].start) => {
                self.render_index(idx, ctx);
                self.schedule_auto_pause(idx, ctx.config);
            }
            Some(_) => {} // Same entry as last tick; nothing to rebuild.
            None => self.clear_if_shown(ctx.surface),
        }

        self.fire_pending_pause(t);
        self.check_silence_skip(t, ctx.config);
    }

    fn re_render(&mut self, ctx: &mut TickContext<'_>) {
        if self.stopped {
            return;
        }
        if !ctx.config.show_overlay {
            self.clear_if_shown(ctx.surface);
            return;
        }

        let Some(start) = self.last_rendered else {
            return;
        };
        if let Some(entry) = self.entry_by_start(start) {
            let line = render_entry(entry, ctx.config, ctx.vocabulary);
            ctx.surface.show_line(line);
        }
    }

    fn stop(&mut self, surface: &mut dyn RenderSurface) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.pending_pause = None;
        self.last_rendered = None;
        surface.clear();
        log::debug!("Preprocessed mode stopped");
    }

    fn name(&self) -> &'static str {
        "preprocessed"
    }
}
