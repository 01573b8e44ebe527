//! Selected-index state machine.
//!
//! Owns the canonical selected page and whether a horizontal gesture is in
//! flight. Only a settle may change the index while a gesture is running;
//! programmatic requests arriving mid-gesture are superseded.

/// Horizontal gesture phase of the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No horizontal gesture in progress.
    Idle,
    /// Pager is scrolling; `origin` is the page selected when it started.
    Dragging { origin: usize },
}

/// Outcome of an external selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRequest {
    /// A gesture is in flight; the request was dropped.
    Superseded,
    /// Already selected; nothing to do.
    Unchanged,
    /// The selected index moved from `previous`.
    Accepted { previous: usize },
}

/// Result of a settle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settle {
    pub previous: usize,
    pub selected: usize,
}

impl Settle {
    pub fn changed(&self) -> bool {
        self.previous != self.selected
    }
}

#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: usize,
    page_count: usize,
    phase: GesturePhase,
}

impl SelectionState {
    /// Create a state selecting `initial`, clamped into `0..page_count`.
    pub fn new(initial: usize, page_count: usize) -> Self {
        Self {
            selected: initial.min(page_count.saturating_sub(1)),
            page_count,
            phase: GesturePhase::Idle,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_gesture_in_flight(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == index
    }

    /// Record a horizontal scroll frame. Returns true when this frame started a gesture.
    pub fn scroll_frame(&mut self) -> bool {
        match self.phase {
            GesturePhase::Idle => {
                self.phase = GesturePhase::Dragging {
                    origin: self.selected,
                };
                true
            }
            GesturePhase::Dragging { .. } => false,
        }
    }

    /// Page selected when the current gesture began, or the selected page when idle.
    pub fn gesture_origin(&self) -> usize {
        match self.phase {
            GesturePhase::Dragging { origin } => origin,
            GesturePhase::Idle => self.selected,
        }
    }

    /// Commit `candidate` as the selected page and return to idle.
    pub fn settle(&mut self, candidate: usize) -> Settle {
        let previous = self.selected;
        self.selected = candidate.min(self.page_count.saturating_sub(1));
        self.phase = GesturePhase::Idle;
        Settle {
            previous,
            selected: self.selected,
        }
    }

    /// Apply an external selection request. Out-of-range indices are clamped.
    pub fn request(&mut self, index: usize) -> SelectionRequest {
        if self.is_gesture_in_flight() {
            return SelectionRequest::Superseded;
        }
        let index = index.min(self.page_count.saturating_sub(1));
        if index == self.selected {
            return SelectionRequest::Unchanged;
        }
        let previous = self.selected;
        self.selected = index;
        SelectionRequest::Accepted { previous }
    }
}
