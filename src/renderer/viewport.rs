//! Visible window over the entry list.
//!
//! The screen is a title block of `title_height` rows followed by `rows`
//! entry rows. When there are more entries than entry rows, only the
//! window starting at `window_start` is drawn, and the window follows the
//! selection so it stays near the vertical middle.

use std::ops::Range;

/// Direction of the last selection move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// What has to be repainted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawPlan {
    /// Nothing changed on screen.
    None,
    /// Title and every visible entry.
    Full,
    /// The previously and newly selected lines only.
    Partial { old: usize, new: usize },
    /// One entry's line.
    Line(usize),
}

/// `clamp(selected - rows/2, 0, count - rows)` when the entries overflow
/// `rows`, else 0.
#[must_use]
pub fn window_start_for(selected: usize, count: usize, rows: usize) -> usize {
    if count > rows {
        selected.saturating_sub(rows / 2).min(count - rows)
    } else {
        0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    columns: usize,
    screen_rows: usize,
    title_height: usize,
    rows: usize,
    window_start: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24, 0)
    }
}

impl Viewport {
    /// Lay out a `columns` x `screen_rows` screen whose title needs
    /// `title_height` rows.
    ///
    /// At least one row is always left for entries, so a tall title is cut
    /// on a short terminal.
    #[must_use]
    pub fn new(columns: usize, screen_rows: usize, title_height: usize) -> Self {
        let screen_rows = screen_rows.max(1);
        let title_height = title_height.min(screen_rows - 1);
        Self {
            columns,
            screen_rows,
            title_height,
            rows: screen_rows - title_height,
            window_start: 0,
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Entry rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    #[must_use]
    pub fn title_height(&self) -> usize {
        self.title_height
    }

    #[must_use]
    pub fn window_start(&self) -> usize {
        self.window_start
    }

    /// Move the window so `selected` is visible. Returns whether it moved.
    pub fn scroll_to(&mut self, selected: usize, count: usize) -> bool {
        let start = window_start_for(selected, count, self.rows);
        let moved = start != self.window_start;
        self.window_start = start;
        moved
    }

    /// Indices of the entries on screen.
    #[must_use]
    pub fn visible_range(&self, count: usize) -> Range<usize> {
        let start = self.window_start.min(count);
        start..count.min(self.window_start + self.rows)
    }

    /// Screen row of entry `index`, if it is inside the window.
    #[must_use]
    pub fn screen_row(&self, index: usize) -> Option<u16> {
        let offset = index.checked_sub(self.window_start)?;
        if offset >= self.rows {
            return None;
        }
        u16::try_from(self.title_height + offset).ok()
    }

    /// Decide how to repaint after the selection moved from `old` to `new`.
    ///
    /// Scrolls the window as needed. A partial redraw is only possible when
    /// the window stayed put.
    pub fn plan_move(&mut self, old: usize, new: usize, count: usize) -> RedrawPlan {
        if old == new {
            return RedrawPlan::None;
        }
        if self.scroll_to(new, count) {
            RedrawPlan::Full
        } else {
            RedrawPlan::Partial { old, new }
        }
    }

    /// Where to leave the terminal cursor after a move.
    ///
    /// Aims half a screen past the selection in the direction of travel,
    /// `title_height + selected +/- rows/2` clamped to the content height,
    /// then maps that into the rows actually drawn.
    #[must_use]
    pub fn cursor_target(&self, selected: usize, count: usize, direction: MoveDirection) -> u16 {
        let content_height = self.title_height + count;
        let line = self.title_height + selected;
        let target = match direction {
            MoveDirection::Down => line + self.rows / 2,
            MoveDirection::Up => line.saturating_sub(self.rows / 2),
        }
        .min(content_height);

        let drawn = self.title_height + self.visible_range(count).len();
        let last = drawn.min(self.screen_rows).saturating_sub(1);
        let row = if target < self.title_height {
            target
        } else {
            target.saturating_sub(self.window_start).max(self.title_height)
        };
        u16::try_from(row.min(last)).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ============================================
    // Window Start
    // ============================================

    #[test]
    fn test_window_start_centers_selection() {
        assert_eq!(window_start_for(50, 100, 20), 40);
        assert_eq!(window_start_for(3, 100, 20), 0);
        assert_eq!(window_start_for(99, 100, 20), 80);
    }

    #[test]
    fn test_window_start_zero_when_everything_fits() {
        assert_eq!(window_start_for(9, 10, 10), 0);
        assert_eq!(window_start_for(2, 3, 10), 0);
        assert_eq!(window_start_for(0, 0, 10), 0);
    }

    #[test]
    fn test_scroll_walk_clamps_at_tail() {
        let mut viewport = Viewport::new(80, 12, 2);
        assert_eq!(viewport.rows(), 10);
        let mut starts = Vec::new();
        for selected in 0..50 {
            viewport.scroll_to(selected, 50);
            starts.push(viewport.window_start());
        }
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(starts[44], 39);
        assert!(starts[45..].iter().all(|&s| s == 40));
    }

    // ============================================
    // Layout
    // ============================================

    #[test]
    fn test_title_never_takes_every_row() {
        let viewport = Viewport::new(40, 3, 5);
        assert_eq!(viewport.title_height(), 2);
        assert_eq!(viewport.rows(), 1);

        let tiny = Viewport::new(40, 0, 4);
        assert_eq!(tiny.screen_rows(), 1);
        assert_eq!(tiny.title_height(), 0);
        assert_eq!(tiny.rows(), 1);
    }

    #[test]
    fn test_screen_rows_follow_window() {
        let mut viewport = Viewport::new(80, 6, 2);
        viewport.scroll_to(10, 20);
        // rows = 4, start = 8
        assert_eq!(viewport.window_start(), 8);
        assert_eq!(viewport.visible_range(20), 8..12);
        assert_eq!(viewport.screen_row(7), None);
        assert_eq!(viewport.screen_row(8), Some(2));
        assert_eq!(viewport.screen_row(11), Some(5));
        assert_eq!(viewport.screen_row(12), None);
    }

    #[test]
    fn test_visible_range_short_list() {
        let viewport = Viewport::new(80, 24, 4);
        assert_eq!(viewport.visible_range(3), 0..3);
        assert_eq!(viewport.visible_range(0), 0..0);
    }

    // ============================================
    // Redraw Planning
    // ============================================

    #[test]
    fn test_plan_move() {
        let mut viewport = Viewport::new(80, 10, 2);
        assert_eq!(viewport.plan_move(0, 0, 5), RedrawPlan::None);
        assert_eq!(
            viewport.plan_move(0, 1, 5),
            RedrawPlan::Partial { old: 0, new: 1 }
        );

        // 8 entry rows, 30 entries: moving to 5 scrolls the window
        assert_eq!(viewport.plan_move(4, 5, 30), RedrawPlan::Full);
        assert_eq!(viewport.window_start(), 1);
    }

    #[test]
    fn test_cursor_target_stays_in_drawn_rows() {
        let viewport = Viewport::new(80, 24, 2);
        // Three entries: rows 2..5 are drawn
        assert_eq!(viewport.cursor_target(1, 3, MoveDirection::Down), 4);
        assert_eq!(viewport.cursor_target(1, 3, MoveDirection::Up), 0);
    }

    #[test]
    fn test_cursor_target_with_scrolled_window() {
        let mut viewport = Viewport::new(80, 12, 2);
        viewport.scroll_to(20, 50);
        // rows = 10, start = 15, line = 22, +5 = 27 -> screen 12 -> last row 11
        assert_eq!(viewport.cursor_target(20, 50, MoveDirection::Down), 11);
        // 22 - 5 = 17 -> screen 2
        assert_eq!(viewport.cursor_target(20, 50, MoveDirection::Up), 2);
    }

    // ============================================
    // Properties
    // ============================================

    proptest! {
        #[test]
        fn prop_selection_always_visible(
            count in 1usize..500,
            screen in 1usize..80,
            title in 0usize..10,
            seed in any::<usize>(),
        ) {
            let selected = seed % count;
            let mut viewport = Viewport::new(80, screen, title);
            viewport.scroll_to(selected, count);
            let start = viewport.window_start();
            prop_assert!(start <= selected);
            prop_assert!(selected < start + viewport.rows());
            prop_assert!(viewport.screen_row(selected).is_some());
            prop_assert!(viewport.visible_range(count).contains(&selected));
        }

        #[test]
        fn prop_cursor_target_on_screen(
            count in 0usize..300,
            screen in 1usize..60,
            title in 0usize..6,
            seed in any::<usize>(),
            down in any::<bool>(),
        ) {
            let selected = if count == 0 { 0 } else { seed % count };
            let mut viewport = Viewport::new(80, screen, title);
            viewport.scroll_to(selected, count);
            let direction = if down { MoveDirection::Down } else { MoveDirection::Up };
            let row = usize::from(viewport.cursor_target(selected, count, direction));
            prop_assert!(row < viewport.screen_rows());
        }
    }
}
