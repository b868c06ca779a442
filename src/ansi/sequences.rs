//! Fixed escape sequences the menu writes, grouped by what they act on.

/// Drop every SGR attribute, including colors.
pub const RESET: &str = "\x1b[0m";

pub mod screen {
    /// Erase the whole display. Leaves the cursor where it was.
    pub const ERASE: &str = "\x1b[2J";
    /// Erase the row the cursor is on.
    pub const ERASE_ROW: &str = "\x1b[2K";
    /// Top-left cell.
    pub const HOME: &str = "\x1b[H";
}

pub mod cursor {
    pub const HIDE: &str = "\x1b[?25l";
    pub const SHOW: &str = "\x1b[?25h";
}

/// Pointer reporting: any-motion tracking (1003) with SGR coordinates (1006),
/// so hover reaches the menu as well as clicks.
pub mod mouse {
    pub const ENABLE: &str = "\x1b[?1003h\x1b[?1006h";
    pub const DISABLE: &str = "\x1b[?1003l\x1b[?1006l";
}

/// Synchronized output (mode 2026). A full redraw is bracketed by these so
/// the terminal never shows a half-painted menu.
pub mod sync {
    pub const BEGIN: &str = "\x1b[?2026h";
    pub const END: &str = "\x1b[?2026l";
}
