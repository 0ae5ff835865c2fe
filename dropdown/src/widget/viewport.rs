//! Scroll position of the result list.

/// Visible window over the result rows.
///
/// Scrolling is minimal: a row already inside the window never moves it, and a
/// row outside it scrolls it just far enough to bring the row to the nearest
/// edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewport {
    /// First visible row
    offset: usize,
    /// Number of visible rows
    height: usize,
}

impl ListViewport {
    /// Create a viewport showing `height` rows.
    pub fn new(height: usize) -> Self {
        Self { offset: 0, height }
    }

    /// First visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of visible rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Change the viewport height, keeping `focused` in view.
    pub fn set_height(&mut self, height: usize, focused: Option<usize>) {
        self.height = height;
        if let Some(index) = focused {
            self.scroll_to_item(index);
        }
    }

    /// Scroll back to the top.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Scroll just enough to make `index` visible.
    ///
    /// Returns true if the offset changed.
    pub fn scroll_to_item(&mut self, index: usize) -> bool {
        if self.height == 0 {
            return false;
        }
        let before = self.offset;
        if index < self.offset {
            // Above viewport
            self.offset = index;
        } else if index >= self.offset + self.height {
            // Below viewport
            self.offset = index + 1 - self.height;
        }
        self.offset != before
    }

    /// Visible row range for a list of `len` rows.
    pub fn visible_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = (self.offset + self.height).min(len);
        start..end
    }

    /// Whether `index` is inside the window.
    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_row_does_not_scroll() {
        let mut viewport = ListViewport::new(3);
        assert!(!viewport.scroll_to_item(2));
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_row_below_scrolls_to_bottom_edge() {
        let mut viewport = ListViewport::new(3);
        assert!(viewport.scroll_to_item(5));
        assert_eq!(viewport.offset(), 3);
        assert_eq!(viewport.visible_range(10), 3..6);
    }

    #[test]
    fn test_row_above_scrolls_to_top_edge() {
        let mut viewport = ListViewport::new(3);
        viewport.scroll_to_item(8);
        assert!(viewport.scroll_to_item(4));
        assert_eq!(viewport.offset(), 4);
    }

    #[test]
    fn test_zero_height_never_scrolls() {
        let mut viewport = ListViewport::new(0);
        assert!(!viewport.scroll_to_item(4));
        assert_eq!(viewport.visible_range(10), 0..0);
    }

    #[test]
    fn test_range_clamped_to_len() {
        let viewport = ListViewport::new(8);
        assert_eq!(viewport.visible_range(3), 0..3);
    }
}
