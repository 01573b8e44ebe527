//! Terminal stand-ins for the host framework's scroll views.
//!
//! Offsets are in terminal cells: rows for page lists, columns for the
//! page strip.

use parking_lot::Mutex;
use sharedheader_core::{clamp, PagerResult, ScrollAnimation, ScrollTarget};
use sharedheader_pager::ScrollChannel;
use std::sync::Arc;

pub const ITEMS_PER_PAGE: usize = 50;

/// Vertical list for one page. Content starts below a header-sized gap.
pub struct ListView {
    channel: Arc<ScrollChannel>,
    offset: Mutex<f32>,
    content_rows: f32,
}

impl ListView {
    pub fn new(channel: Arc<ScrollChannel>, header_rows: f32) -> PagerResult<Arc<Self>> {
        let view = Arc::new(Self {
            channel: Arc::clone(&channel),
            offset: Mutex::new(0.0),
            content_rows: header_rows + ITEMS_PER_PAGE as f32,
        });
        channel.attach_scroll_target(view.clone())?;
        Ok(view)
    }

    pub fn index(&self) -> usize {
        self.channel.index()
    }

    pub fn offset(&self) -> f32 {
        *self.offset.lock()
    }

    /// User scroll by `rows`, reported like any gesture-driven scroll event.
    pub fn scroll_by(&self, rows: f32) {
        let offset = {
            let mut offset = self.offset.lock();
            *offset = clamp(*offset + rows, 0.0, self.content_rows);
            *offset
        };
        self.channel.report(offset);
    }

    /// Text of content row `row`, or `None` inside the header gap and past the end.
    pub fn row_text(&self, row: usize, header_rows: usize) -> Option<String> {
        let item = row.checked_sub(header_rows)?;
        (item < ITEMS_PER_PAGE).then(|| format!("List: {} - Item: {}", self.index(), item))
    }
}

impl ScrollTarget for ListView {
    fn scroll_to(&self, offset: f32, _animation: ScrollAnimation) {
        let offset = clamp(offset, 0.0, self.content_rows);
        *self.offset.lock() = offset;
        self.channel.report(offset);
    }
}

/// One frame of page strip motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripFrame {
    pub offset: f32,
    pub settled: bool,
}

#[derive(Debug, Default)]
struct StripState {
    offset: f32,
    target: Option<f32>,
}

/// Horizontal page strip. Animated scrolls and flings advance one step per tick.
#[derive(Default)]
pub struct StripView {
    state: Mutex<StripState>,
}

/// Fraction of the remaining distance covered per frame.
const EASING: f32 = 0.35;

impl StripView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn offset(&self) -> f32 {
        self.state.lock().offset
    }

    pub fn is_moving(&self) -> bool {
        self.state.lock().target.is_some()
    }

    /// Start a user swipe toward `offset`.
    pub fn fling_to(&self, offset: f32) {
        self.state.lock().target = Some(offset);
    }

    /// Advance the running motion by one frame.
    pub fn tick(&self) -> Option<StripFrame> {
        let mut state = self.state.lock();
        let target = state.target?;
        let distance = target - state.offset;
        if distance.abs() <= 1.0 {
            state.offset = target;
            state.target = None;
            return Some(StripFrame {
                offset: target,
                settled: true,
            });
        }
        let step = distance * EASING;
        state.offset += if step.abs() < 1.0 {
            distance.signum()
        } else {
            step
        };
        Some(StripFrame {
            offset: state.offset,
            settled: false,
        })
    }
}

impl ScrollTarget for StripView {
    fn scroll_to(&self, offset: f32, animation: ScrollAnimation) {
        let mut state = self.state.lock();
        match animation {
            ScrollAnimation::Animated => {
                if state.offset != offset || state.target.is_some() {
                    state.target = Some(offset);
                }
            }
            ScrollAnimation::Immediate => {
                state.offset = offset;
                state.target = None;
            }
        }
    }
}
