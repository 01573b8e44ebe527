use crate::source::HeaderSource;
use crate::value::SharedValue;
use parking_lot::Mutex;
use sharedheader_core::{clamp, PagerError, PagerResult, ScrollAnimation, ScrollTarget};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Per-page scroll state handed to a page at construction.
///
/// Carries the page's own vertical offset, the one-shot pending adjustment
/// slot, and a read view of the shared header.
pub struct ScrollChannel {
    index: usize,
    scroll_offset: SharedValue<f32>,
    pending: SharedValue<Option<f32>>,
    source: Arc<HeaderSource>,
    commits: AtomicU64,
    runtime: Option<Handle>,
    attached: Mutex<Option<JoinHandle<()>>>,
}

impl ScrollChannel {
    /// Uses the current tokio runtime, if any, for the scroll target reaction.
    pub fn new(index: usize, source: Arc<HeaderSource>) -> Self {
        Self::build(index, source, Handle::try_current().ok())
    }

    /// Spawns the scroll target reaction on `runtime`, so attaching works from any thread.
    pub fn with_runtime(index: usize, source: Arc<HeaderSource>, runtime: Handle) -> Self {
        Self::build(index, source, Some(runtime))
    }

    fn build(index: usize, source: Arc<HeaderSource>, runtime: Option<Handle>) -> Self {
        Self {
            index,
            scroll_offset: SharedValue::new(0.0),
            pending: SharedValue::new(None),
            source,
            commits: AtomicU64::new(0),
            runtime,
            attached: Mutex::new(None),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_active(&self) -> bool {
        self.source.is_active(self.index)
    }

    pub fn source(&self) -> &Arc<HeaderSource> {
        &self.source
    }

    /// This page's own vertical offset.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset.get()
    }

    /// Shared header offset, for pages that position content relative to the header.
    pub fn header_offset(&self) -> f32 {
        self.source.header_offset()
    }

    /// Whether this page's own offset already puts the header at `header_offset`.
    pub fn reflects_header(&self, header_offset: f32) -> bool {
        clamp(self.scroll_offset(), 0.0, self.source.header_height()) == header_offset
    }

    pub fn subscribe_header(&self) -> watch::Receiver<f32> {
        self.source.subscribe_header()
    }

    /// Record a scroll position from the page's own scroll view.
    ///
    /// Only the active page drives the header; reports from inactive pages,
    /// including the echo of an applied adjustment, update this page alone.
    pub fn report(&self, offset: f32) {
        self.scroll_offset.set(clamp(offset, 0.0, f32::INFINITY));
        if self.is_active() && self.source.push(offset) {
            tracing::trace!(page = self.index, offset, "header offset updated");
        }
    }

    /// Read and clear the pending adjustment.
    pub fn consume_pending_adjustment(&self) -> Option<f32> {
        let mut taken = None;
        self.pending.update(|slot| {
            taken = slot.take();
            taken.is_some()
        });
        taken
    }

    /// Peek at the pending adjustment without consuming it.
    pub fn pending_adjustment(&self) -> Option<f32> {
        self.pending.get()
    }

    pub fn subscribe_pending(&self) -> watch::Receiver<Option<f32>> {
        self.pending.subscribe()
    }

    /// Number of adjustments committed to this page since it was mounted.
    pub fn committed_adjustments(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    /// Overwrites any unconsumed adjustment.
    pub(crate) fn commit_adjustment(&self, offset: f32) {
        let previous = self.pending.replace(Some(offset));
        self.commits.fetch_add(1, Ordering::Relaxed);
        if let Some(stale) = previous {
            tracing::debug!(page = self.index, stale, offset, "replaced unconsumed adjustment");
        } else {
            tracing::debug!(page = self.index, offset, "committed adjustment");
        }
    }

    /// Apply every committed adjustment to `target` as an immediate jump.
    ///
    /// Any adjustment already pending is applied right away. Replaces a
    /// previously attached target. Fails when the channel has no runtime.
    pub fn attach_scroll_target(self: &Arc<Self>, target: Arc<dyn ScrollTarget>) -> PagerResult<()> {
        let runtime = self.runtime.as_ref().ok_or_else(|| {
            PagerError::Runtime(format!("page {} has no runtime for its scroll target", self.index))
        })?;
        let channel = Arc::downgrade(self);
        let mut rx = self.pending.subscribe();
        let handle = runtime.spawn(async move {
            loop {
                let Some(ch) = channel.upgrade() else {
                    break;
                };
                if let Some(offset) = ch.consume_pending_adjustment() {
                    tracing::debug!(page = ch.index, offset, "offscreen scroll");
                    target.scroll_to(offset, ScrollAnimation::Immediate);
                }
                drop(ch);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });
        if let Some(previous) = self.attached.lock().replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    /// Stop applying adjustments to the attached target.
    pub fn detach_scroll_target(&self) {
        if let Some(handle) = self.attached.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for ScrollChannel {
    fn drop(&mut self) {
        if let Some(handle) = self.attached.get_mut().take() {
            handle.abort();
        }
    }
}
