//! The single shared header offset and the index that decides who may write it.

use crate::value::SharedValue;
use sharedheader_core::clamp;
use tokio::sync::watch;

/// Shared header state with rotating single-writer ownership.
///
/// Only the page whose index equals the selected index pushes offsets here.
/// The check happens at the call site in [`crate::ScrollChannel::report`];
/// no lock guards the header itself.
pub struct HeaderSource {
    header_height: f32,
    selected: SharedValue<usize>,
    current_page_offset: SharedValue<f32>,
    header_offset: SharedValue<f32>,
}

impl HeaderSource {
    pub fn new(header_height: f32, initial_index: usize) -> Self {
        Self {
            header_height,
            selected: SharedValue::new(initial_index),
            current_page_offset: SharedValue::new(0.0),
            header_offset: SharedValue::new(0.0),
        }
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn selected(&self) -> usize {
        self.selected.get()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.selected.get() == index
    }

    /// Raw scroll offset last reported by the active page.
    pub fn current_page_offset(&self) -> f32 {
        self.current_page_offset.get()
    }

    /// Collapse offset of the header, always within `[0, header_height]`.
    pub fn header_offset(&self) -> f32 {
        self.header_offset.get()
    }

    pub fn subscribe_header(&self) -> watch::Receiver<f32> {
        self.header_offset.subscribe()
    }

    pub fn subscribe_selected(&self) -> watch::Receiver<usize> {
        self.selected.subscribe()
    }

    /// Take a new offset from the active page. Returns true if the header moved.
    pub(crate) fn push(&self, offset: f32) -> bool {
        self.current_page_offset.set(offset);
        self.header_offset
            .set(clamp(offset, 0.0, self.header_height))
    }

    pub(crate) fn select(&self, index: usize) -> bool {
        self.selected.set(index)
    }
}
