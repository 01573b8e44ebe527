use crate::broker::ActivationBroker;
use crate::channel::ScrollChannel;
use crate::observer::IndexObserver;
use crate::source::HeaderSource;
use crate::value::SharedValue;
use parking_lot::Mutex;
use sharedheader_core::{
    GesturePhase, PageGeometry, PagerConfig, PagerError, PagerResult, ScrollAnimation,
    ScrollTarget, SelectCause, SelectionLog, SelectionRecord, SelectionRequest, SelectionState,
    Settle,
};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub type SelectCallback = Box<dyn Fn(usize) + Send + Sync>;

/// Visual transform of the header for the current offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderTransform {
    pub height: f32,
    pub translate_y: f32,
}

struct PageSlot {
    channel: Arc<ScrollChannel>,
    reaction: JoinHandle<()>,
}

impl PageSlot {
    fn spawn(index: usize, source: &Arc<HeaderSource>, config: &PagerConfig, runtime: &Handle) -> Self {
        let channel = Arc::new(ScrollChannel::with_runtime(
            index,
            Arc::clone(source),
            runtime.clone(),
        ));
        let broker = ActivationBroker::new(Arc::clone(&channel), config.adjustment_delay());
        let reaction = runtime.spawn(broker.run());
        Self { channel, reaction }
    }

    fn shutdown(&self) {
        self.reaction.abort();
        self.channel.detach_scroll_target();
    }
}

struct ControllerState {
    selection: SelectionState,
    geometry: PageGeometry,
    pager_offset: f32,
    /// Page the strip is being snapped back to after a clamped fling.
    snapping_to: Option<usize>,
    log: SelectionLog,
}

struct Inner {
    config: PagerConfig,
    source: Arc<HeaderSource>,
    fractional_index: SharedValue<f32>,
    state: Mutex<ControllerState>,
    pages: Mutex<Vec<PageSlot>>,
    pager_view: Arc<dyn ScrollTarget>,
    on_select: SelectCallback,
    runtime: Handle,
}

impl Drop for Inner {
    fn drop(&mut self) {
        for slot in self.pages.get_mut().iter() {
            slot.shutdown();
        }
    }
}

/// Owns the selected index and the shared header offset.
///
/// Pages receive their [`ScrollChannel`] from [`PagerController::page`]; the
/// host forwards horizontal scroll frames and momentum-end events for the
/// page strip. Cloning is cheap and all clones share state.
#[derive(Clone)]
pub struct PagerController {
    inner: Arc<Inner>,
}

impl PagerController {
    /// Build a controller and start one activation broker per page.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<F>(config: PagerConfig, pager_view: Arc<dyn ScrollTarget>, on_select: F) -> PagerResult<Self>
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|e| PagerError::Runtime(e.to_string()))?;

        let source = Arc::new(HeaderSource::new(config.header_height, config.initial_index));
        let geometry = PageGeometry::new(config.page_width, config.page_count);
        let pager_offset = geometry.offset_for_page(config.initial_index);
        let pages = (0..config.page_count)
            .map(|index| PageSlot::spawn(index, &source, &config, &runtime))
            .collect();

        tracing::info!(
            pages = config.page_count,
            initial = config.initial_index,
            header_height = config.header_height,
            "pager controller started"
        );

        let controller = Self {
            inner: Arc::new(Inner {
                source,
                fractional_index: SharedValue::new(geometry.fractional_index(pager_offset)),
                state: Mutex::new(ControllerState {
                    selection: SelectionState::new(config.initial_index, config.page_count),
                    geometry,
                    pager_offset,
                    snapping_to: None,
                    log: SelectionLog::default(),
                }),
                pages: Mutex::new(pages),
                pager_view,
                on_select: Box::new(on_select),
                runtime,
                config,
            }),
        };
        controller
            .inner
            .pager_view
            .scroll_to(pager_offset, ScrollAnimation::Immediate);
        Ok(controller)
    }

    pub fn config(&self) -> &PagerConfig {
        &self.inner.config
    }

    pub fn page_count(&self) -> usize {
        self.inner.config.page_count
    }

    pub fn header_height(&self) -> f32 {
        self.inner.config.header_height
    }

    pub fn selected_index(&self) -> usize {
        self.inner.source.selected()
    }

    pub fn header_offset(&self) -> f32 {
        self.inner.source.header_offset()
    }

    /// Unclamped offset last reported by the active page.
    pub fn current_page_offset(&self) -> f32 {
        self.inner.source.current_page_offset()
    }

    pub fn header_transform(&self) -> HeaderTransform {
        HeaderTransform {
            height: self.inner.config.header_height,
            translate_y: -self.header_offset(),
        }
    }

    pub fn subscribe_header(&self) -> watch::Receiver<f32> {
        self.inner.source.subscribe_header()
    }

    pub fn fractional_index(&self) -> f32 {
        self.inner.fractional_index.get()
    }

    pub fn index_observer(&self) -> IndexObserver {
        IndexObserver::new(
            self.inner.fractional_index.subscribe(),
            self.inner.runtime.clone(),
        )
    }

    /// Current page width, which follows [`PagerController::resize`].
    pub fn page_width(&self) -> f32 {
        self.inner.state.lock().geometry.page_width
    }

    pub fn pager_offset(&self) -> f32 {
        self.inner.state.lock().pager_offset
    }

    pub fn phase(&self) -> GesturePhase {
        self.inner.state.lock().selection.phase()
    }

    pub fn is_gesture_in_flight(&self) -> bool {
        self.inner.state.lock().selection.is_gesture_in_flight()
    }

    pub fn selection_log(&self) -> Vec<SelectionRecord> {
        self.inner.state.lock().log.records()
    }

    /// Channel for page `index`, to be injected into that page's view.
    pub fn page(&self, index: usize) -> PagerResult<Arc<ScrollChannel>> {
        self.inner
            .pages
            .lock()
            .get(index)
            .map(|slot| Arc::clone(&slot.channel))
            .ok_or(PagerError::PageOutOfRange {
                index,
                page_count: self.page_count(),
            })
    }

    pub fn pages(&self) -> Vec<Arc<ScrollChannel>> {
        self.inner
            .pages
            .lock()
            .iter()
            .map(|slot| Arc::clone(&slot.channel))
            .collect()
    }

    /// Replace page `index` with a fresh channel and broker, as when its view remounts.
    pub fn remount_page(&self, index: usize) -> PagerResult<Arc<ScrollChannel>> {
        let mut pages = self.inner.pages.lock();
        let page_count = pages.len();
        let slot = pages
            .get_mut(index)
            .ok_or(PagerError::PageOutOfRange { index, page_count })?;
        slot.shutdown();
        *slot = PageSlot::spawn(index, &self.inner.source, &self.inner.config, &self.inner.runtime);
        tracing::debug!(page = index, "page remounted");
        Ok(Arc::clone(&slot.channel))
    }

    /// Horizontal scroll frame from the page strip.
    pub fn on_pager_scroll(&self, offset_x: f32) {
        let (fraction, began) = {
            let mut state = self.inner.state.lock();
            let began = state.selection.scroll_frame();
            state.pager_offset = offset_x;
            (state.geometry.fractional_index(offset_x), began)
        };
        if began {
            tracing::debug!(offset_x, "pager gesture started");
        }
        self.inner.fractional_index.replace(fraction);
    }

    /// Horizontal momentum ended; commit the page the strip settled on.
    ///
    /// The end of a snap issued by an earlier settle completes that settle
    /// and does not notify again.
    pub fn on_momentum_end(&self) -> Settle {
        let (settle, snap_to, snap_completed) = {
            let mut state = self.inner.state.lock();
            let origin = state.selection.gesture_origin();
            let nearest = state.geometry.nearest_page(state.pager_offset);
            let candidate = state.geometry.settle_page(
                state.pager_offset,
                origin,
                self.inner.config.disable_interval_momentum,
            );
            let snapping_to = state.snapping_to.take();
            let settle = state.selection.settle(candidate);
            let snap_completed = snapping_to == Some(candidate) && !settle.changed();
            if !snap_completed {
                state.log.record(settle.selected, SelectCause::Settle);
                self.inner.source.select(settle.selected);
            }
            let snap_to = (candidate != nearest).then(|| state.geometry.offset_for_page(candidate));
            if snap_to.is_some() {
                state.snapping_to = Some(candidate);
            }
            (settle, snap_to, snap_completed)
        };

        if snap_completed {
            tracing::debug!(selected = settle.selected, "snap settled");
            return settle;
        }
        tracing::info!(
            previous = settle.previous,
            selected = settle.selected,
            "pager settled"
        );
        if let Some(offset) = snap_to {
            self.inner.pager_view.scroll_to(offset, ScrollAnimation::Animated);
        }
        (self.inner.on_select)(settle.selected);
        settle
    }

    /// Programmatic selection, e.g. from a tab bar.
    ///
    /// Dropped while a horizontal gesture is in flight.
    pub fn set_selected_index(&self, index: usize) -> SelectionRequest {
        let (request, target) = {
            let mut state = self.inner.state.lock();
            let request = state.selection.request(index);
            let target = match request {
                SelectionRequest::Accepted { .. } => {
                    state.snapping_to = None;
                    let selected = state.selection.selected();
                    state.log.record(selected, SelectCause::External);
                    self.inner.source.select(selected);
                    Some(state.geometry.offset_for_page(selected))
                }
                SelectionRequest::Superseded | SelectionRequest::Unchanged => None,
            };
            (request, target)
        };

        match request {
            SelectionRequest::Superseded => {
                tracing::debug!(index, "selection superseded by active gesture");
            }
            SelectionRequest::Unchanged => {}
            SelectionRequest::Accepted { previous } => {
                tracing::info!(previous, selected = self.selected_index(), "page selected");
            }
        }
        if let Some(offset) = target {
            self.inner.pager_view.scroll_to(offset, ScrollAnimation::Animated);
        }
        request
    }

    /// New page width, e.g. after a window resize.
    pub fn resize(&self, page_width: f32) -> PagerResult<()> {
        if !page_width.is_finite() || page_width <= 0.0 {
            return Err(PagerError::InvalidConfig(format!(
                "page_width must be positive, got {}",
                page_width
            )));
        }
        let realign = {
            let mut state = self.inner.state.lock();
            state.geometry.page_width = page_width;
            if state.selection.is_gesture_in_flight() {
                None
            } else {
                state.snapping_to = None;
                let offset = state.geometry.offset_for_page(state.selection.selected());
                state.pager_offset = offset;
                Some((offset, state.geometry.fractional_index(offset)))
            }
        };
        if let Some((offset, fraction)) = realign {
            self.inner.pager_view.scroll_to(offset, ScrollAnimation::Immediate);
            self.inner.fractional_index.replace(fraction);
        }
        Ok(())
    }
}
