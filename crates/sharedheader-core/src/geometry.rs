//! Horizontal page geometry.
//!
//! Converts between the pager's horizontal scroll offset and page indices.
//! Pure data, no knowledge of rendering or gestures.

use crate::clamp::clamp_index;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Width of one page. Always positive once validated.
    pub page_width: f32,
    /// Number of pages in the pager.
    pub page_count: usize,
}

impl PageGeometry {
    pub fn new(page_width: f32, page_count: usize) -> Self {
        Self {
            page_width,
            page_count,
        }
    }

    /// Horizontal offset at which `page` rests.
    pub fn offset_for_page(&self, page: usize) -> f32 {
        page as f32 * self.page_width
    }

    /// Largest horizontal offset the pager can rest at.
    pub fn max_offset(&self) -> f32 {
        self.offset_for_page(self.page_count.saturating_sub(1))
    }

    /// Continuous position across pages. Not clamped, overscroll shows through.
    pub fn fractional_index(&self, offset_x: f32) -> f32 {
        if self.page_width <= 0.0 {
            return 0.0;
        }
        offset_x / self.page_width
    }

    /// Page nearest to `offset_x`, clamped to the valid index range.
    pub fn nearest_page(&self, offset_x: f32) -> usize {
        let fraction = self.fractional_index(offset_x);
        if !fraction.is_finite() {
            return if fraction > 0.0 {
                self.page_count.saturating_sub(1)
            } else {
                0
            };
        }
        clamp_index(fraction.round() as i64, self.page_count)
    }

    /// Page the pager settles on when momentum ends at `offset_x`.
    ///
    /// With `single_page` set the result stays within one page of `origin`.
    pub fn settle_page(&self, offset_x: f32, origin: usize, single_page: bool) -> usize {
        let candidate = self.nearest_page(offset_x);
        if !single_page {
            return candidate;
        }
        let lo = origin.saturating_sub(1);
        let hi = (origin + 1).min(self.page_count.saturating_sub(1));
        candidate.clamp(lo, hi.max(lo))
    }

    /// Whether `offset_x` rests exactly on `page`.
    pub fn is_at_page(&self, offset_x: f32, page: usize) -> bool {
        (offset_x - self.offset_for_page(page)).abs() <= f32::EPSILON * self.page_width.max(1.0)
    }
}
