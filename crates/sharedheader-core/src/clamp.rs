//! Bounded offset derivation.
//!
//! Every offset that reaches the header transform or the page index passes
//! through here first. The functions are pure and allocation free so they can
//! run on every animation frame.

/// Clamp `value` into `[lo, hi]`.
///
/// Values already in range pass through unchanged. `NaN` maps to `lo` so a
/// malformed scroll event can never escape the bound.
#[inline]
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    if value.is_nan() {
        return lo;
    }
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Clamp a signed index into `[0, count - 1]`.
///
/// Returns 0 when `count` is 0.
#[inline]
pub fn clamp_index(index: i64, count: usize) -> usize {
    if count == 0 || index <= 0 {
        return 0;
    }
    (index as u64).min(count as u64 - 1) as usize
}
