//! Scroll window over a menu's item list
//!
//! Derives the contiguous range of items that is drawn, keeping the
//! selection inside the window with configurable slack above and below.

/// Indicator lines drawn above and below the visible items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollIndicators {
    /// Shown above the items when earlier items are hidden
    pub top_continued: Option<String>,
    /// Shown above the items when the first item is visible
    pub top_ended: Option<String>,
    /// Shown below the items when later items are hidden
    pub bottom_continued: Option<String>,
    /// Shown below the items when the last item is visible
    pub bottom_ended: Option<String>,
}

/// Scrolling behaviour of a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSettings {
    /// Maximum number of item slots drawn; `None` draws every item
    pub max_visible: Option<usize>,
    /// Items kept visible above the selection
    pub up_margin: usize,
    /// Items kept visible below the selection
    pub down_margin: usize,
    pub indicators: ScrollIndicators,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            max_visible: None,
            up_margin: 1,
            down_margin: 1,
            indicators: ScrollIndicators::default(),
        }
    }
}

impl ScrollSettings {
    /// Bounded window of `max_visible` slots
    pub fn bounded(max_visible: usize) -> Self {
        Self {
            max_visible: Some(max_visible),
            ..Self::default()
        }
    }

    pub fn with_margins(mut self, up: usize, down: usize) -> Self {
        self.up_margin = up;
        self.down_margin = down;
        self
    }

    pub fn with_indicators(mut self, indicators: ScrollIndicators) -> Self {
        self.indicators = indicators;
        self
    }
}

/// Visible item range, `start` inclusive, `end` exclusive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollWindow {
    pub start: usize,
    pub end: usize,
}

impl ScrollWindow {
    /// Recompute the window for `selected` given the previous window start.
    ///
    /// Clamp order:
    /// 1. pull the start up so `up_margin` items show above the selection
    /// 2. push the start down so `down_margin` items show below it
    /// 3. keep the selection itself inside the window, which overrides
    ///    margins that do not fit in `max_visible`
    /// 4. clamp the start into the list, derive the end, then re-derive the
    ///    start from the end so a short tail still fills the window
    pub fn compute(
        total: usize,
        selected: usize,
        current_start: usize,
        settings: &ScrollSettings,
    ) -> Self {
        let max_visible = match settings.max_visible {
            Some(max) if max < total => max.max(1),
            _ => return Self { start: 0, end: total },
        };

        let total = total as isize;
        let max = max_visible as isize;
        let selected = (selected as isize).clamp(0, total - 1);
        let up = settings.up_margin as isize;
        let down = settings.down_margin as isize;

        let mut start = current_start as isize;
        if start > selected - up {
            start = selected - up;
        }
        if start + max - 1 < selected + down {
            start = selected + down - (max - 1);
        }
        start = start.clamp(selected - (max - 1), selected);

        start = start.clamp(0, total - 1);
        let end = (start + max).clamp(0, total);
        start = (end - max).clamp(0, total - 1);

        Self {
            start: start as usize,
            end: end as usize,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    /// Items are hidden above the window
    pub fn has_hidden_above(&self) -> bool {
        self.start > 0
    }

    /// Items are hidden below the window
    pub fn has_hidden_below(&self, total: usize) -> bool {
        self.end < total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(total: usize, selected: usize, start: usize, settings: &ScrollSettings) -> (usize, usize) {
        let w = ScrollWindow::compute(total, selected, start, settings);
        (w.start, w.end)
    }

    #[test]
    fn test_unbounded_shows_everything() {
        let settings = ScrollSettings::default();
        assert_eq!(window(12, 7, 3, &settings), (0, 12));
    }

    #[test]
    fn test_max_visible_at_least_total_shows_everything() {
        let settings = ScrollSettings::bounded(5);
        assert_eq!(window(5, 4, 0, &settings), (0, 5));
        assert_eq!(window(3, 2, 0, &settings), (0, 3));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(window(0, 0, 0, &ScrollSettings::bounded(3)), (0, 0));
    }

    #[test]
    fn test_scrolls_down_keeping_down_margin() {
        let settings = ScrollSettings::bounded(4).with_margins(1, 1);
        // window 0..4, selected 3 needs item 4 visible
        assert_eq!(window(10, 3, 0, &settings), (1, 5));
        assert_eq!(window(10, 2, 0, &settings), (0, 4));
    }

    #[test]
    fn test_scrolls_up_keeping_up_margin() {
        let settings = ScrollSettings::bounded(4).with_margins(1, 1);
        assert_eq!(window(10, 5, 5, &settings), (4, 8));
        assert_eq!(window(10, 6, 5, &settings), (5, 9));
    }

    #[test]
    fn test_clamped_at_list_ends() {
        let settings = ScrollSettings::bounded(4).with_margins(2, 2);
        assert_eq!(window(10, 0, 6, &settings), (0, 4));
        assert_eq!(window(10, 9, 0, &settings), (6, 10));
    }

    #[test]
    fn test_wrap_from_bottom_to_top() {
        let settings = ScrollSettings::bounded(3).with_margins(1, 1);
        assert_eq!(window(8, 0, 5, &settings), (0, 3));
    }

    #[test]
    fn test_margins_larger_than_window_keep_selection_visible() {
        let settings = ScrollSettings::bounded(3).with_margins(5, 5);
        for selected in 0..10 {
            for start in 0..10 {
                let w = ScrollWindow::compute(10, selected, start, &settings);
                assert!(w.contains(selected), "selected {} not in {:?}", selected, w);
                assert_eq!(w.len(), 3);
            }
        }
    }

    #[test]
    fn test_zero_max_visible_treated_as_one() {
        let settings = ScrollSettings::bounded(0);
        assert_eq!(window(4, 2, 0, &settings), (2, 3));
    }

    #[test]
    fn test_window_invariants_exhaustive() {
        for total in 1..14 {
            for max in 1..total + 2 {
                for (up, down) in [(0, 0), (1, 1), (2, 0), (0, 3), (4, 4)] {
                    let settings = ScrollSettings::bounded(max).with_margins(up, down);
                    for selected in 0..total {
                        for start in 0..total {
                            let w = ScrollWindow::compute(total, selected, start, &settings);
                            assert!(w.start <= w.end && w.end <= total);
                            assert!(w.len() <= max);
                            assert!(w.contains(selected));
                            if max < total {
                                assert_eq!(w.len(), max);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_margins_honoured_away_from_ends() {
        let settings = ScrollSettings::bounded(7).with_margins(2, 2);
        for selected in 2..18 {
            for start in 0..20 {
                let w = ScrollWindow::compute(20, selected, start, &settings);
                assert!(selected >= w.start + 2);
                assert!(selected + 2 < w.end);
            }
        }
    }

    #[test]
    fn test_hidden_flags() {
        let w = ScrollWindow { start: 2, end: 5 };
        assert!(w.has_hidden_above());
        assert!(w.has_hidden_below(8));
        assert!(!w.has_hidden_below(5));
        assert!(!ScrollWindow { start: 0, end: 3 }.has_hidden_above());
    }
}
