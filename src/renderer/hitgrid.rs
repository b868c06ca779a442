//! Pointer hit testing.
//!
//! The grid holds the on-screen rectangle of every visible entry, tagged
//! with the entry's position. It is rebuilt on each full redraw, so it
//! always describes what the terminal currently shows.

/// A rectangle of terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl HitArea {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the cell at `x`, `y` lies inside.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && x - self.x < self.width
            && y - self.y < self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Maps screen cells to entry positions.
#[derive(Clone, Debug, Default)]
pub struct HitGrid {
    areas: Vec<(HitArea, usize)>,
}

impl HitGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every area.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    /// Register `area` for entry `id`. Empty areas are ignored.
    ///
    /// Where areas overlap, the latest registration wins.
    pub fn register(&mut self, area: HitArea, id: usize) {
        if !area.is_empty() {
            self.areas.push((area, id));
        }
    }

    /// The entry whose area contains `x`, `y`.
    #[must_use]
    pub fn test(&self, x: u32, y: u32) -> Option<usize> {
        self.areas
            .iter()
            .rev()
            .find(|(area, _)| area.contains(x, y))
            .map(|&(_, id)| id)
    }

    /// The area registered for `id`, if it is visible.
    #[must_use]
    pub fn area_of(&self, id: usize) -> Option<HitArea> {
        self.areas
            .iter()
            .rev()
            .find(|&&(_, entry)| entry == id)
            .map(|&(area, _)| area)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
