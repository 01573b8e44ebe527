//! Per-page activation broker.
//!
//! Each page runs one broker. While the page is inactive, header movement
//! produced by the active page leaves this page's own scroll view stale. The
//! broker debounces that movement and commits a single adjustment once the
//! header has been quiet for the configured delay. A newer header value
//! restarts the delay, so at most one commit lands per quiet period.

use crate::channel::ScrollChannel;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdjustmentState {
    /// Nothing waiting to be committed.
    Idle,
    /// `target` is committed at `deadline` unless superseded first.
    Scheduled { target: f32, deadline: Instant },
}

pub struct ActivationBroker {
    channel: Arc<ScrollChannel>,
    delay: Duration,
    active: bool,
    state: AdjustmentState,
    header_rx: watch::Receiver<f32>,
    selected_rx: watch::Receiver<usize>,
}

impl ActivationBroker {
    /// Subscribes immediately, so changes made before [`ActivationBroker::run`]
    /// is first polled are still observed.
    ///
    /// A page mounted inactive under a collapsed header starts with an
    /// adjustment scheduled, since its fresh scroll view rests at zero.
    pub fn new(channel: Arc<ScrollChannel>, delay: Duration) -> Self {
        let source = channel.source();
        let header_rx = source.subscribe_header();
        let selected_rx = source.subscribe_selected();
        let header = *header_rx.borrow();
        let mut broker = Self {
            active: channel.is_active(),
            channel,
            delay,
            state: AdjustmentState::Idle,
            header_rx,
            selected_rx,
        };
        if header != 0.0 {
            broker.on_header_offset(header, Instant::now());
        }
        broker
    }

    pub fn state(&self) -> AdjustmentState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            AdjustmentState::Scheduled { deadline, .. } => Some(deadline),
            AdjustmentState::Idle => None,
        }
    }

    /// The header moved. The active page is the source of truth and is left alone.
    pub fn on_header_offset(&mut self, offset: f32, now: Instant) {
        if self.active {
            return;
        }
        self.schedule(offset, now);
    }

    /// The selected index changed.
    ///
    /// Losing activation schedules an adjustment to the header as it stands.
    /// Gaining it flushes any scheduled adjustment so the page catches up
    /// before it starts driving the header, unless the page's own offset
    /// already maps onto that header position.
    pub fn on_selected(&mut self, selected: usize, header_offset: f32, now: Instant) {
        let active = selected == self.channel.index();
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            if let AdjustmentState::Scheduled { target, .. } = self.state {
                if !self.channel.reflects_header(target) {
                    tracing::debug!(page = self.channel.index(), target, "flushing on activation");
                    self.channel.commit_adjustment(target);
                }
            }
            self.state = AdjustmentState::Idle;
        } else {
            self.schedule(header_offset, now);
        }
    }

    /// Commit the scheduled adjustment if its deadline has passed.
    pub fn on_deadline(&mut self, now: Instant) -> bool {
        match self.state {
            AdjustmentState::Scheduled { target, deadline } if now >= deadline => {
                self.channel.commit_adjustment(target);
                self.state = AdjustmentState::Idle;
                true
            }
            _ => false,
        }
    }

    fn schedule(&mut self, target: f32, now: Instant) {
        if let AdjustmentState::Scheduled { target: superseded, .. } = self.state {
            tracing::trace!(page = self.channel.index(), superseded, target, "rescheduled adjustment");
        }
        self.state = AdjustmentState::Scheduled {
            target,
            deadline: now + self.delay,
        };
    }

    /// Drive the broker from header and selection changes until the source goes away.
    pub async fn run(mut self) {
        loop {
            let deadline = self.deadline();
            tokio::select! {
                // Header first: movement that raced a selection change is
                // scheduled while still inactive, then flushed on activation.
                biased;

                changed = self.header_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let header = *self.header_rx.borrow_and_update();
                    self.on_header_offset(header, Instant::now());
                }
                changed = self.selected_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let selected = *self.selected_rx.borrow_and_update();
                    let header = *self.header_rx.borrow();
                    self.on_selected(selected, header, Instant::now());
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_deadline(Instant::now());
                }
            }
        }
    }
}
