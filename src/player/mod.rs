use std::sync::{
    Arc,
    Mutex,
};

/// HTMLMediaElement readyState values, as reported by the host player.
pub const HAVE_NOTHING: u8 = 0;
pub const HAVE_METADATA: u8 = 1;
pub const HAVE_CURRENT_DATA: u8 = 2;
pub const HAVE_FUTURE_DATA: u8 = 3;
pub const HAVE_ENOUGH_DATA: u8 = 4;

/// Threshold at which a detected video is considered playable and a
/// subtitle mode may start.
pub const READY_TO_PLAY: u8 = HAVE_FUTURE_DATA;

/// Narrow handle onto the host page's video element. All times are seconds
/// of video time.
pub trait VideoHandle: Send {
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, t: f64);
    fn paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn ready_state(&self) -> u8;
    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);
}

pub type SharedVideo = Arc<Mutex<dyn VideoHandle>>;

/// A video the host page currently exposes. `source_id` identifies the
/// loaded media; a changed id means a new video even if the element itself
/// was reused.
#[derive(Clone)]
pub struct DetectedVideo {
    pub handle: SharedVideo,
    pub source_id: String,
}

/// Host-page capability the controller polls for video presence and the
/// media title. Polled, not event-driven: the host page emits no reliable
/// "video changed" event.
pub trait VideoSource {
    fn detect_video(&mut self) -> Option<DetectedVideo>;

    /// The current media title, once the host page has settled on one.
    fn media_title(&mut self) -> Option<String>;
}

/// Seeks to `target`, keeping the play/pause state and playback rate the
/// video had before the jump.
pub fn seek_preserving_state(video: &mut dyn VideoHandle, target: f64) {
    let was_paused = video.paused();
    let rate = video.playback_rate();

    video.set_current_time(target);
    video.set_playback_rate(rate);

    if was_paused {
        video.pause();
    } else {
        video.play();
    }
}
