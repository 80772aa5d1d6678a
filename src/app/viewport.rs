//! Scroll window of the entry list.
//!
//! The window is `height` rows starting at `top`. Its bottom may point past the last entry,
//! trailing rows are simply left blank.

use std::ops::Range;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    height: usize,
    width: usize,
}

impl Viewport {
    #[inline]
    pub fn top(&self) -> usize {
        self.top
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of the last row of the window.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.top + self.height.saturating_sub(1)
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.height > 0 && idx >= self.top && idx <= self.bottom()
    }

    pub(crate) fn resize(&mut self, height: usize, width: usize) {
        self.height = height;
        self.width = width;
    }

    pub(crate) fn reset(&mut self) {
        self.top = 0;
    }

    /// Puts `selected` near the vertical middle of the window.
    ///
    /// `top = max(0, selected - height / 2)`, which always leaves `selected` inside the window
    /// for any `height >= 1`.
    pub(crate) fn recenter(&mut self, selected: usize) {
        self.top = selected.saturating_sub(self.height / 2);
    }

    /// Recenters only if `selected` has left the window.
    pub(crate) fn follow(&mut self, selected: usize) {
        if !self.contains(selected) {
            self.recenter(selected);
        }
    }

    /// Indices of the rows that are both inside the window and backed by an entry.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.top.min(len);
        let end = (self.top + self.height).min(len);
        start..end
    }
}
