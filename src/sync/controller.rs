use std::{
    sync::{
        Arc,
        RwLock,
    },
    time::{
        Duration,
        Instant,
    },
};

use super::{
    live::{
        CaptionSource,
        LiveMode,
    },
    preprocessed::PreprocessedMode,
    SubtitleMode,
    TickContext,
};
use crate::{
    config::SubtitleConfig,
    core::normalize_title,
    player::{
        DetectedVideo,
        VideoSource,
        READY_TO_PLAY,
    },
    render::RenderSurface,
    segmentation::{
        Pronouncer,
        Segmenter,
    },
    transcript::TranscriptStore,
    vocab::SharedVocabulary,
};

/// How often the host page is polled for video presence/source changes.
pub const DETECTION_INTERVAL_MS: u64 = 1000;
/// Subtitle poll period: finer than typical line durations, coarse enough
/// to avoid excess rendering.
pub const SUBTITLE_POLL_INTERVAL_MS: u64 = 250;
/// Title lookups tolerated before giving up and running live.
pub const TITLE_RETRY_LIMIT: u32 = 20;

/// Outcome of mode selection for a detected title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleSourceKind {
    Preprocessed { key: String, filename: String },
    Live,
}

/// Decides the rendering mode for a media title: Preprocessed when an
/// enriched transcript resource exists for the normalized title, Live
/// otherwise.
pub fn select_mode(store: &dyn TranscriptStore, title: &str) -> SubtitleSourceKind {
    let key = normalize_title(title);
    if !key.is_empty() && store.exists(&key) {
        let filename = store.filename(&key);
        SubtitleSourceKind::Preprocessed { key, filename }
    } else {
        SubtitleSourceKind::Live
    }
}

/// Host-provided capabilities the engine acts through.
pub struct Capabilities {
    pub video_source: Box<dyn VideoSource>,
    pub captions: Box<dyn CaptionSource>,
    pub transcripts: Box<dyn TranscriptStore>,
    pub segmenter: Option<Box<dyn Segmenter>>,
    pub pronouncer: Option<Box<dyn Pronouncer>>,
    pub surface: Box<dyn RenderSurface>,
}

enum ControllerState {
    NoVideo,
    WaitingReady { video: DetectedVideo, title_attempts: u32 },
    Running { video: DetectedVideo, mode: Box<dyn SubtitleMode> },
}

/// Owns video detection and the lifecycle of the active subtitle mode.
/// Driven by host `update()` calls on any cadence; rate-limits itself with
/// internal interval gates.
pub struct ModeController {
    video_source: Box<dyn VideoSource>,
    captions: Box<dyn CaptionSource>,
    transcripts: Box<dyn TranscriptStore>,
    segmenter: Option<Box<dyn Segmenter>>,
    pronouncer: Option<Box<dyn Pronouncer>>,
    surface: Box<dyn RenderSurface>,
    config: Arc<RwLock<SubtitleConfig>>,
    vocabulary: SharedVocabulary,
    state: ControllerState,
    detection_interval: Duration,
    poll_interval: Duration,
    last_detection: Option<Instant>,
    last_poll: Option<Instant>,
}

impl ModeController {
    pub fn new(
        capabilities: Capabilities,
        config: Arc<RwLock<SubtitleConfig>>,
        vocabulary: SharedVocabulary,
    ) -> Self {
        Self {
            video_source: capabilities.video_source,
            captions: capabilities.captions,
            transcripts: capabilities.transcripts,
            segmenter: capabilities.segmenter,
            pronouncer: capabilities.pronouncer,
            surface: capabilities.surface,
            config,
            vocabulary,
            state: ControllerState::NoVideo,
            detection_interval: Duration::from_millis(DETECTION_INTERVAL_MS),
            poll_interval: Duration::from_millis(SUBTITLE_POLL_INTERVAL_MS),
            last_detection: None,
            last_poll: None,
        }
    }

    /// Overrides the built-in poll cadences (hosts with their own frame
    /// budget, tests driving ticks directly).
    pub fn with_intervals(mut self, detection: Duration, poll: Duration) -> Self {
        self.detection_interval = detection;
        self.poll_interval = poll;
        self
    }

    /// One cooperative tick. Cheap to call often: detection and subtitle
    /// polling each run only once their interval has elapsed.
    pub fn update(&mut self) {
        if interval_elapsed(&mut self.last_detection, self.detection_interval) {
            self.run_detection();
        }
        if interval_elapsed(&mut self.last_poll, self.poll_interval) {
            self.tick();
        }
    }

    /// Re-render hook for the external UI: redraws the currently displayed
    /// line under the current config, immediately.
    pub fn re_render(&mut self) {
        self.with_tick_context(|mode, ctx| mode.re_render(ctx));
    }

    /// Stops whatever runs and clears the overlay. Idempotent; also safe
    /// when no mode ever started.
    pub fn stop(&mut self) {
        self.stop_current();
        self.state = ControllerState::NoVideo;
    }

    /// Name of the running mode, if one is running.
    pub fn active_mode(&self) -> Option<&'static str> {
        match &self.state {
            ControllerState::Running { mode, .. } => Some(mode.name()),
            _ => None,
        }
    }

    fn run_detection(&mut self) {
        match self.video_source.detect_video() {
            None => {
                if !matches!(self.state, ControllerState::NoVideo) {
                    log::info!("Video removed; stopping subtitle rendering");
                    self.stop_current();
                    self.state = ControllerState::NoVideo;
                }
            }
            Some(video) => {
                let is_new = match &self.state {
                    ControllerState::NoVideo => true,
                    ControllerState::WaitingReady { video: current, .. }
                    | ControllerState::Running { video: current, .. } => {
                        current.source_id != video.source_id
                    }
                };

                if is_new {
                    log::info!("Video source {:?}; waiting until ready", video.source_id);
                    self.stop_current();
                    self.state = ControllerState::WaitingReady { video, title_attempts: 0 };
                }
            }
        }
    }

    fn tick(&mut self) {
        match &self.state {
            ControllerState::NoVideo => {}
            ControllerState::WaitingReady { .. } => self.try_start(),
            ControllerState::Running { .. } => {
                self.with_tick_context(|mode, ctx| mode.update(ctx));
            }
        }
    }

    /// Starts the right mode once the waiting video reports itself ready to
    /// play. Title detection gets bounded retries (one per tick); when they
    /// exhaust, live mode runs rather than blocking forever.
    fn try_start(&mut self) {
        let ControllerState::WaitingReady { video, title_attempts } = &mut self.state else {
            return;
        };

        let ready = video
            .handle
            .lock()
            .map(|v| v.ready_state() >= READY_TO_PLAY)
            .unwrap_or(false);
        if !ready {
            return;
        }

        let kind = match self.video_source.media_title() {
            Some(title) => select_mode(self.transcripts.as_ref(), &title),
            None => {
                *title_attempts += 1;
                if *title_attempts < TITLE_RETRY_LIMIT {
                    return;
                }
                log::warn!(
                    "No media title after {} attempts; falling back to live mode",
                    TITLE_RETRY_LIMIT
                );
                SubtitleSourceKind::Live
            }
        };

        let video = video.clone();
        self.start_mode(video, kind);
    }

    fn start_mode(&mut self, video: DetectedVideo, kind: SubtitleSourceKind) {
        let mode: Box<dyn SubtitleMode> = match kind {
            SubtitleSourceKind::Preprocessed { key, filename } => {
                // A transcript that exists but fails to load still runs
                // preprocessed, with nothing to show. Only non-existence
                // selects live mode, and that was decided above.
                let entries = match self.transcripts.load(&key) {
                    Ok(entries) => entries,
                    Err(e) => {
                        log::warn!("Failed to load transcript {}: {}", filename, e);
                        Vec::new()
                    }
                };
                log::info!(
                    "Starting preprocessed mode from {} ({} entries)",
                    filename,
                    entries.len()
                );
                Box::new(PreprocessedMode::new(entries, video.handle.clone()))
            }
            SubtitleSourceKind::Live => {
                log::info!("Starting live caption mode");
                Box::new(LiveMode::start(self.captions.as_mut()))
            }
        };

        self.state = ControllerState::Running { video, mode };
    }

    /// Stops the running mode (idempotent through the mode's own guard) and
    /// leaves the overlay empty, whatever state we were in.
    fn stop_current(&mut self) {
        if let ControllerState::Running { mode, .. } = &mut self.state {
            mode.stop(self.surface.as_mut());
        }
        self.surface.clear();
    }

    fn with_tick_context(
        &mut self,
        f: impl FnOnce(&mut Box<dyn SubtitleMode>, &mut TickContext<'_>),
    ) {
        let config = match self.config.read() {
            Ok(config) => config.clone(),
            Err(_) => return,
        };
        let Ok(vocabulary) = self.vocabulary.read() else {
            return;
        };
        let ControllerState::Running { mode, .. } = &mut self.state else {
            return;
        };

        let mut ctx = TickContext {
            config: &config,
            vocabulary: &vocabulary,
            surface: self.surface.as_mut(),
            segmenter: self.segmenter.as_deref(),
            pronouncer: self.pronouncer.as_deref(),
        };
        f(mode, &mut ctx);
    }
}

fn interval_elapsed(last: &mut Option<Instant>, interval: Duration) -> bool {
    let now = Instant::now();
    match *last {
        Some(prev) if now.duration_since(prev) < interval => false,
        _ => {
            *last = Some(now);
            true
        }
    }
}
