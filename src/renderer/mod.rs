//! Menu renderer with partial-redraw support.
//!
//! [`Renderer`] draws a menu onto any [`Console`]. A full redraw paints the
//! title block and every visible entry and rebuilds the hit grid. When only
//! the selection moved and the [`Viewport`] window stayed put, a partial
//! redraw rewrites just the two affected lines.
//!
//! # Screen Layout
//!
//! ```text
//! row 0                 ┌──────┐        title block
//!                       │ Main │
//!                       └──────┘
//!                                       blank separator
//! title_height          Sound    [X]    first visible entry
//!                  >> Volume    <5> <<  ...
//! ```
//!
//! # Hit Testing
//!
//! Every full redraw registers each visible entry's text span in the
//! [`HitGrid`]; [`hit_test`](Renderer::hit_test) resolves a screen cell to
//! an entry position.

mod hitgrid;
mod title;
mod viewport;

pub use hitgrid::{HitArea, HitGrid};
pub use title::{BannerTitle, PlainTitle, TitleRenderer};
pub use viewport::{MoveDirection, RedrawPlan, Viewport, window_start_for};

use crate::color::{AnsiColors, ColorFormatter};
use crate::entry::Entry;
use crate::position::PositionIndex;
use crate::terminal::Console;
use crate::unicode::fit_to_width;
use std::io;

/// Redraw counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub full_redraws: u64,
    pub partial_redraws: u64,
    pub line_redraws: u64,
}

/// Draws a title and a list of entries.
pub struct Renderer {
    title: Box<dyn TitleRenderer>,
    colors: Box<dyn ColorFormatter>,
    center_title: bool,
    viewport: Viewport,
    hit_grid: HitGrid,
    stats: RenderStats,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Box::new(BannerTitle), true)
    }
}

impl Renderer {
    pub fn new(title: Box<dyn TitleRenderer>, center_title: bool) -> Self {
        Self {
            title,
            colors: Box::new(AnsiColors::default()),
            center_title,
            viewport: Viewport::default(),
            hit_grid: HitGrid::new(),
            stats: RenderStats::default(),
        }
    }

    pub fn set_title_renderer(&mut self, title: Box<dyn TitleRenderer>) {
        self.title = title;
    }

    pub fn set_color_formatter(&mut self, colors: Box<dyn ColorFormatter>) {
        self.colors = colors;
    }

    /// Layout of the last full redraw.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Entry at screen cell `x`, `y`.
    #[must_use]
    pub fn hit_test(&self, x: u32, y: u32) -> Option<usize> {
        self.hit_grid.test(x, y)
    }

    #[must_use]
    pub fn hit_grid(&self) -> &HitGrid {
        &self.hit_grid
    }

    /// Plan the redraw for a selection move, scrolling if needed.
    pub fn plan_move(&mut self, old: usize, new: usize, count: usize) -> RedrawPlan {
        self.viewport.plan_move(old, new, count)
    }

    /// Carry out `plan`.
    pub fn apply(
        &mut self,
        console: &mut dyn Console,
        plan: RedrawPlan,
        geometry: (u16, u16),
        title: &str,
        entries: &PositionIndex<Entry>,
        selected: usize,
    ) -> io::Result<()> {
        match plan {
            RedrawPlan::None => Ok(()),
            RedrawPlan::Full => self.full_redraw(console, geometry, title, entries, selected),
            RedrawPlan::Partial { old, new } => self.partial_redraw(console, entries, old, new),
            RedrawPlan::Line(index) => self.redraw_line(console, entries, index, index == selected),
        }
    }

    /// Clear the screen and paint everything for a `geometry` terminal.
    pub fn full_redraw(
        &mut self,
        console: &mut dyn Console,
        geometry: (u16, u16),
        title: &str,
        entries: &PositionIndex<Entry>,
        selected: usize,
    ) -> io::Result<()> {
        let (cols, rows) = geometry;
        let columns = usize::from(cols);
        let (block, line_count) = self.title.render(title, columns, self.center_title);

        self.viewport = Viewport::new(columns, usize::from(rows), line_count + 1);
        self.viewport.scroll_to(selected, entries.len());

        console.begin_sync()?;
        console.hide_cursor()?;
        console.clear()?;

        for (row, line) in block.lines().take(self.viewport.title_height()).enumerate() {
            console.move_cursor(0, u16::try_from(row).unwrap_or(u16::MAX))?;
            console.write_str(&fit_to_width(line, columns))?;
        }

        self.hit_grid.clear();
        for index in self.viewport.visible_range(entries.len()) {
            let Ok(entry) = entries.get(index) else {
                continue;
            };
            if let Some(row) = self.viewport.screen_row(index) {
                self.draw_entry(console, entry, row, index == selected)?;
                self.hit_grid.register(entry.hit_area(columns, row), index);
            }
        }

        if let Some(row) = self.viewport.screen_row(selected) {
            console.move_cursor(0, row)?;
        }
        console.end_sync()?;
        console.flush()?;
        self.stats.full_redraws += 1;
        Ok(())
    }

    /// Repaint the lines of `old` (deselected) and `new` (selected), then
    /// park the cursor at the centering target.
    pub fn partial_redraw(
        &mut self,
        console: &mut dyn Console,
        entries: &PositionIndex<Entry>,
        old: usize,
        new: usize,
    ) -> io::Result<()> {
        for (index, selected) in [(old, false), (new, true)] {
            if let (Ok(entry), Some(row)) = (entries.get(index), self.viewport.screen_row(index)) {
                self.draw_entry(console, entry, row, selected)?;
            }
        }

        let direction = if new > old {
            MoveDirection::Down
        } else {
            MoveDirection::Up
        };
        let target = self.viewport.cursor_target(new, entries.len(), direction);
        console.move_cursor(0, target)?;
        console.flush()?;
        self.stats.partial_redraws += 1;
        Ok(())
    }

    /// Repaint one entry's line in place.
    pub fn redraw_line(
        &mut self,
        console: &mut dyn Console,
        entries: &PositionIndex<Entry>,
        index: usize,
        selected: bool,
    ) -> io::Result<()> {
        if let (Ok(entry), Some(row)) = (entries.get(index), self.viewport.screen_row(index)) {
            self.draw_entry(console, entry, row, selected)?;
            console.flush()?;
            self.stats.line_redraws += 1;
        }
        Ok(())
    }

    fn draw_entry(
        &self,
        console: &mut dyn Console,
        entry: &Entry,
        row: u16,
        selected: bool,
    ) -> io::Result<()> {
        console.move_cursor(0, row)?;
        console.write_str(&entry.paint(selected, self.viewport.columns(), self.colors.as_ref()))
    }
}
