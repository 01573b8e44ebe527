/// How a host scroll view should move to a requested offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAnimation {
    /// Eased, abortable scroll. Used for programmatic page selection.
    Animated,
    /// Jump without easing. Used for offscreen adjustments.
    Immediate,
}

/// A scrollable view supplied by the host UI framework.
///
/// Pages implement this for their vertical list, the pager owner for the
/// horizontal page strip. Offsets are along the view's scroll axis.
pub trait ScrollTarget: Send + Sync {
    fn scroll_to(&self, offset: f32, animation: ScrollAnimation);
}
