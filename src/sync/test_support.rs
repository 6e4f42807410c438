use std::sync::{
    atomic::{
        AtomicUsize,
        Ordering,
    },
    mpsc::Sender,
    Arc,
    Mutex,
};

use super::live::{
    CaptionSource,
    CaptionSubscription,
};
use crate::{
    core::{
        SegmentedWord,
        SubtitleEntry,
    },
    player::{
        DetectedVideo,
        SharedVideo,
        VideoHandle,
        VideoSource,
        HAVE_ENOUGH_DATA,
    },
    render::{
        RenderSurface,
        RenderedLine,
    },
    segmentation::Segmenter,
    transcript::TranscriptStore,
    vocab::VocabularyTable,
};

pub fn entry(start: f64, end: f64, text: &str) -> SubtitleEntry {
    SubtitleEntry {
        start,
        end,
        text: text.to_string(),
        segmented: text
            .split_whitespace()
            .map(|word| SegmentedWord { word: word.to_string(), pinyin: String::new() })
            .collect(),
        translation: String::new(),
        explanation: String::new(),
        word_meanings: Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeVideoState {
    pub time: f64,
    pub paused: bool,
    pub ready_state: u8,
    pub rate: f64,
    pub pause_calls: usize,
    pub play_calls: usize,
    pub seeks: usize,
}

/// Scriptable stand-in for the host video element.
pub struct FakeVideo {
    state: Mutex<FakeVideoState>,
}

impl FakeVideo {
    pub fn shared(time: f64) -> Arc<FakeVideo> {
        Arc::new(FakeVideo {
            state: Mutex::new(FakeVideoState {
                time,
                paused: false,
                ready_state: HAVE_ENOUGH_DATA,
                rate: 1.0,
                pause_calls: 0,
                play_calls: 0,
                seeks: 0,
            }),
        })
    }

    pub fn handle(self: &Arc<Self>) -> SharedVideo {
        Arc::new(Mutex::new(FakeVideoHandle { video: self.clone() }))
    }

    pub fn snapshot(&self) -> FakeVideoState {
        *self.state.lock().unwrap()
    }

    pub fn set_time(&self, t: f64) {
        self.state.lock().unwrap().time = t;
    }

    pub fn set_paused(&self, paused: bool) {
        self.state.lock().unwrap().paused = paused;
    }

    pub fn set_ready_state(&self, ready_state: u8) {
        self.state.lock().unwrap().ready_state = ready_state;
    }
}

struct FakeVideoHandle {
    video: Arc<FakeVideo>,
}

impl VideoHandle for FakeVideoHandle {
    fn current_time(&self) -> f64 {
        self.video.state.lock().unwrap().time
    }

    fn set_current_time(&mut self, t: f64) {
        let mut state = self.video.state.lock().unwrap();
        state.time = t;
        state.seeks += 1;
    }

    fn paused(&self) -> bool {
        self.video.state.lock().unwrap().paused
    }

    fn play(&mut self) {
        let mut state = self.video.state.lock().unwrap();
        state.paused = false;
        state.play_calls += 1;
    }

    fn pause(&mut self) {
        let mut state = self.video.state.lock().unwrap();
        state.paused = true;
        state.pause_calls += 1;
    }

    fn ready_state(&self) -> u8 {
        self.video.state.lock().unwrap().ready_state
    }

    fn playback_rate(&self) -> f64 {
        self.video.state.lock().unwrap().rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.video.state.lock().unwrap().rate = rate;
    }
}

/// Records every overlay operation; `current` is what the user would see.
#[derive(Default)]
pub struct RecordingSurface {
    pub current: Option<RenderedLine>,
    pub shows: usize,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn shown_text(&self) -> Option<String> {
        self.current.as_ref().map(|line| line.text())
    }
}

impl RenderSurface for RecordingSurface {
    fn show_line(&mut self, line: RenderedLine) {
        self.current = Some(line);
        self.shows += 1;
    }

    fn clear(&mut self) {
        self.current = None;
        self.clears += 1;
    }
}

/// Surface handle that can outlive the controller borrowing it.
#[derive(Clone, Default)]
pub struct SharedSurface(pub Arc<Mutex<RecordingSurface>>);

impl RenderSurface for SharedSurface {
    fn show_line(&mut self, line: RenderedLine) {
        self.0.lock().unwrap().show_line(line);
    }

    fn clear(&mut self) {
        self.0.lock().unwrap().clear();
    }
}

/// Scripted host page: a video that can appear, change source or vanish,
/// and a title that may take a while to settle.
#[derive(Clone, Default)]
pub struct ScriptedPage {
    pub video: Arc<Mutex<Option<(Arc<FakeVideo>, String)>>>,
    pub title: Arc<Mutex<Option<String>>>,
}

impl ScriptedPage {
    pub fn show_video(&self, video: &Arc<FakeVideo>, source_id: &str) {
        *self.video.lock().unwrap() = Some((video.clone(), source_id.to_string()));
    }

    pub fn remove_video(&self) {
        *self.video.lock().unwrap() = None;
    }

    pub fn set_title(&self, title: Option<&str>) {
        *self.title.lock().unwrap() = title.map(str::to_string);
    }
}

impl VideoSource for ScriptedPage {
    fn detect_video(&mut self) -> Option<DetectedVideo> {
        self.video.lock().unwrap().as_ref().map(|(video, source_id)| DetectedVideo {
            handle: video.handle(),
            source_id: source_id.clone(),
        })
    }

    fn media_title(&mut self) -> Option<String> {
        self.title.lock().unwrap().clone()
    }
}

/// Caption source that hands out its sink and counts open subscriptions.
#[derive(Clone, Default)]
pub struct FakeCaptions {
    pub sink: Arc<Mutex<Option<Sender<String>>>>,
    pub active: Arc<AtomicUsize>,
}

impl FakeCaptions {
    pub fn push(&self, text: &str) {
        if let Some(sink) = self.sink.lock().unwrap().as_ref() {
            let _ = sink.send(text.to_string());
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

impl CaptionSource for FakeCaptions {
    fn observe(&mut self, sink: Sender<String>) -> CaptionSubscription {
        *self.sink.lock().unwrap() = Some(sink);
        self.active.fetch_add(1, Ordering::SeqCst);
        let active = self.active.clone();
        CaptionSubscription::new(move || {
            active.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

/// In-memory transcript store.
#[derive(Clone, Default)]
pub struct MapStore {
    pub transcripts: std::collections::HashMap<String, Vec<SubtitleEntry>>,
    pub broken_keys: Vec<String>,
}

impl MapStore {
    pub fn with(key: &str, entries: Vec<SubtitleEntry>) -> Self {
        let mut store = Self::default();
        store.transcripts.insert(key.to_string(), entries);
        store
    }

    pub fn broken(key: &str) -> Self {
        Self { transcripts: Default::default(), broken_keys: vec![key.to_string()] }
    }
}

impl TranscriptStore for MapStore {
    fn exists(&self, key: &str) -> bool {
        self.transcripts.contains_key(key) || self.broken_keys.iter().any(|k| k == key)
    }

    fn load(&self, key: &str) -> Result<Vec<SubtitleEntry>, crate::core::ZimuError> {
        if self.broken_keys.iter().any(|k| k == key) {
            return Err(crate::core::ZimuError::MalformedTranscript(
                self.filename(key),
                "unusable shape".to_string(),
            ));
        }
        self.transcripts
            .get(key)
            .cloned()
            .ok_or_else(|| crate::core::ZimuError::MissingTranscript(key.to_string()))
    }
}

/// Splits on whitespace, like the segmented fixtures in these tests.
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

pub fn vocabulary() -> VocabularyTable {
    VocabularyTable::new()
}
