#![allow(dead_code)]

use parking_lot::Mutex;
use sharedheader_core::{PagerConfig, ScrollAnimation, ScrollTarget};
use sharedheader_pager::{PagerController, ScrollChannel};
use std::sync::{Arc, Weak};
use std::time::Duration;

pub const PAGE_WIDTH: f32 = 400.0;

/// Records every scroll command it receives.
#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<(f32, ScrollAnimation)>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<(f32, ScrollAnimation)> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<(f32, ScrollAnimation)> {
        self.calls.lock().last().copied()
    }
}

impl ScrollTarget for RecordingView {
    fn scroll_to(&self, offset: f32, animation: ScrollAnimation) {
        self.calls.lock().push((offset, animation));
    }
}

/// A page scroll view that echoes programmatic jumps back as scroll reports.
pub struct EchoView {
    channel: Weak<ScrollChannel>,
    jumps: Mutex<Vec<(f32, ScrollAnimation)>>,
}

impl EchoView {
    pub fn attach(channel: &Arc<ScrollChannel>) -> Arc<Self> {
        let view = Arc::new(Self {
            channel: Arc::downgrade(channel),
            jumps: Mutex::new(Vec::new()),
        });
        channel.attach_scroll_target(view.clone()).unwrap();
        view
    }

    pub fn jumps(&self) -> Vec<f32> {
        self.jumps.lock().iter().map(|(offset, _)| *offset).collect()
    }

    pub fn all_immediate(&self) -> bool {
        self.jumps
            .lock()
            .iter()
            .all(|(_, animation)| *animation == ScrollAnimation::Immediate)
    }
}

impl ScrollTarget for EchoView {
    fn scroll_to(&self, offset: f32, animation: ScrollAnimation) {
        self.jumps.lock().push((offset, animation));
        if let Some(channel) = self.channel.upgrade() {
            channel.report(offset);
        }
    }
}

pub struct Harness {
    pub controller: PagerController,
    pub pager_view: Arc<RecordingView>,
    pub selects: Arc<Mutex<Vec<usize>>>,
}

pub fn config() -> PagerConfig {
    PagerConfig::default()
        .with_header_height(250.0)
        .with_page_count(3)
        .with_page_width(PAGE_WIDTH)
}

pub fn harness(config: PagerConfig) -> Harness {
    let pager_view = Arc::new(RecordingView::default());
    let selects = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&selects);
    let controller = PagerController::new(config, pager_view.clone(), move |index| {
        sink.lock().push(index);
    })
    .unwrap();
    Harness {
        controller,
        pager_view,
        selects,
    }
}

impl Harness {
    pub fn selects(&self) -> Vec<usize> {
        self.selects.lock().clone()
    }

    /// Drag the page strip through intermediate frames to `to` and settle there.
    pub fn swipe(&self, to: f32) {
        let from = self.controller.pager_offset();
        for step in 1..=4 {
            let t = step as f32 / 4.0;
            self.controller.on_pager_scroll(from + (to - from) * t);
        }
        self.controller.on_momentum_end();
    }

    /// Play the last animated pager scroll the way a host does: frames, then momentum end.
    pub fn play_animation(&self) {
        if let Some((offset, ScrollAnimation::Animated)) = self.pager_view.last() {
            self.swipe(offset);
        }
    }

    pub fn swipe_to_page(&self, page: usize) {
        self.swipe(page as f32 * PAGE_WIDTH);
    }
}

/// Let reaction tasks run and the debounce window elapse.
pub async fn quiesce() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

/// Let reaction tasks run without reaching any debounce deadline.
pub async fn yield_briefly() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
