//! Tracked cursor state.

/// Where the terminal cursor was last placed and whether it is shown.
///
/// Coordinates are 0-indexed cells: `col` from the left edge, `row` from
/// the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorState {
    pub col: u16,
    pub row: u16,
    pub visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            col: 0,
            row: 0,
            visible: true,
        }
    }
}

impl CursorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, col: u16, row: u16) {
        self.col = col;
        self.row = row;
    }

    /// Position as `(col, row)`.
    #[must_use]
    pub fn position(&self) -> (u16, u16) {
        (self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_state() {
        let mut cursor = CursorState::new();
        assert!(cursor.visible);
        assert_eq!(cursor.position(), (0, 0));

        cursor.set_position(10, 5);
        assert_eq!(cursor.position(), (10, 5));
    }
}
