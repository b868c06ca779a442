//! Terminal primitives consumed by the menu.
//!
//! The menu only needs row/column addressing: query the geometry, place the
//! cursor, show or hide it, write text and clear. [`Console`] names exactly
//! that surface so the run loop can drive a real terminal or an in-memory
//! one in tests.

mod cursor;
mod mouse;
mod raw;

pub use cursor::CursorState;
pub use mouse::{MouseButton, MouseEvent, MouseEventKind};
pub use raw::{RawModeGuard, enable_raw_mode, is_tty, terminal_size, wait_readable};

#[cfg(test)]
pub(crate) use raw::pipe_pair;

use crate::ansi::{self, sequences};
use std::io::{self, Write};

/// Row/column terminal surface.
///
/// Coordinates are 0-indexed cells. Implementations may buffer; callers
/// [`flush`](Console::flush) once per redraw.
pub trait Console {
    /// Current geometry as `(columns, rows)`.
    fn size(&mut self) -> io::Result<(u16, u16)>;

    /// Place the cursor at `col`, `row`.
    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;

    /// Clear the whole screen and home the cursor.
    fn clear(&mut self) -> io::Result<()>;

    /// Clear the line the cursor is on.
    fn clear_line(&mut self) -> io::Result<()>;

    /// Write text at the cursor. The text may contain color escapes.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Begin a synchronized update, so a full redraw appears at once.
    fn begin_sync(&mut self) -> io::Result<()> {
        self.write_str(sequences::sync::BEGIN)
    }

    /// End a synchronized update.
    fn end_sync(&mut self) -> io::Result<()> {
        self.write_str(sequences::sync::END)
    }
}

/// ANSI terminal writing to `W`.
///
/// Geometry comes from the controlling terminal unless a fixed size was set
/// with [`Terminal::set_size`], which is how the menu runs headless.
pub struct Terminal<W: Write> {
    writer: W,
    cursor: CursorState,
    fixed_size: Option<(u16, u16)>,
    mouse_enabled: bool,
    raw_mode_guard: Option<RawModeGuard>,
}

impl<W: Write> Terminal<W> {
    /// Create a terminal sized by the controlling TTY.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            cursor: CursorState::default(),
            fixed_size: None,
            mouse_enabled: false,
            raw_mode_guard: None,
        }
    }

    /// Create a terminal with a fixed geometry.
    pub fn headless(writer: W, cols: u16, rows: u16) -> Self {
        let mut terminal = Self::new(writer);
        terminal.set_size(cols, rows);
        terminal
    }

    /// Report `cols` x `rows` from now on instead of querying the TTY.
    pub fn set_size(&mut self, cols: u16, rows: u16) {
        self.fixed_size = Some((cols.max(1), rows.max(1)));
    }

    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_guard.is_some()
    }

    /// Enter raw mode on stdin.
    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(enable_raw_mode()?);
        }
        Ok(())
    }

    /// Restore stdin's original mode.
    pub fn exit_raw_mode(&mut self) {
        self.raw_mode_guard = None;
    }

    #[must_use]
    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Turn on mouse motion and button reporting.
    pub fn enable_mouse(&mut self) -> io::Result<()> {
        if !self.mouse_enabled {
            self.writer.write_all(sequences::mouse::ENABLE.as_bytes())?;
            self.mouse_enabled = true;
        }
        Ok(())
    }

    pub fn disable_mouse(&mut self) -> io::Result<()> {
        if self.mouse_enabled {
            self.writer.write_all(sequences::mouse::DISABLE.as_bytes())?;
            self.mouse_enabled = false;
        }
        Ok(())
    }

    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Restore cursor, mouse, attributes and termios.
    pub fn cleanup(&mut self) -> io::Result<()> {
        self.show_cursor()?;
        self.disable_mouse()?;
        self.writer.write_all(sequences::RESET.as_bytes())?;
        self.exit_raw_mode();
        self.writer.flush()
    }
}

impl<W: Write> Console for Terminal<W> {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        match self.fixed_size {
            Some(size) => Ok(size),
            None => terminal_size(),
        }
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        ansi::write_cursor_position(&mut self.writer, u32::from(row), u32::from(col))?;
        self.cursor.set_position(col, row);
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        if self.cursor.visible {
            self.writer.write_all(sequences::cursor::HIDE.as_bytes())?;
            self.cursor.visible = false;
        }
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        if !self.cursor.visible {
            self.writer.write_all(sequences::cursor::SHOW.as_bytes())?;
            self.cursor.visible = true;
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::screen::ERASE.as_bytes())?;
        self.writer.write_all(sequences::screen::HOME.as_bytes())?;
        self.cursor.set_position(0, 0);
        Ok(())
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::screen::ERASE_ROW.as_bytes())
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(terminal: &Terminal<Vec<u8>>) -> String {
        String::from_utf8_lossy(terminal.writer()).into_owned()
    }

    #[test]
    fn test_headless_size() {
        let mut terminal = Terminal::headless(Vec::new(), 80, 24);
        assert_eq!(terminal.size().unwrap(), (80, 24));
        terminal.set_size(40, 10);
        assert_eq!(terminal.size().unwrap(), (40, 10));
    }

    #[test]
    fn test_zero_size_is_floored() {
        let mut terminal = Terminal::headless(Vec::new(), 0, 0);
        assert_eq!(terminal.size().unwrap(), (1, 1));
    }

    #[test]
    fn test_move_cursor_writes_one_indexed_sequence() {
        let mut terminal = Terminal::headless(Vec::new(), 80, 24);
        terminal.move_cursor(9, 4).unwrap();
        assert_eq!(output(&terminal), "\x1b[5;10H");
        assert_eq!(terminal.cursor().position(), (9, 4));
    }

    #[test]
    fn test_hide_show_cursor_only_on_change() {
        let mut terminal = Terminal::headless(Vec::new(), 80, 24);
        terminal.hide_cursor().unwrap();
        terminal.hide_cursor().unwrap();
        terminal.show_cursor().unwrap();
        terminal.show_cursor().unwrap();
        assert_eq!(output(&terminal), "\x1b[?25l\x1b[?25h");
    }

    #[test]
    fn test_clear_homes_cursor() {
        let mut terminal = Terminal::headless(Vec::new(), 80, 24);
        terminal.move_cursor(3, 3).unwrap();
        terminal.writer_mut().clear();
        terminal.clear().unwrap();
        assert_eq!(output(&terminal), "\x1b[2J\x1b[H");
        assert_eq!(terminal.cursor().position(), (0, 0));
    }

    #[test]
    fn test_sync_defaults_write_through() {
        let mut terminal = Terminal::headless(Vec::new(), 80, 24);
        terminal.begin_sync().unwrap();
        terminal.write_str("x").unwrap();
        terminal.end_sync().unwrap();
        assert_eq!(output(&terminal), "\x1b[?2026hx\x1b[?2026l");
    }

    #[test]
    fn test_mouse_toggle_is_idempotent() {
        let mut terminal = Terminal::headless(Vec::new(), 80, 24);
        terminal.enable_mouse().unwrap();
        terminal.enable_mouse().unwrap();
        assert_eq!(output(&terminal), sequences::mouse::ENABLE);
        terminal.writer_mut().clear();
        terminal.disable_mouse().unwrap();
        terminal.disable_mouse().unwrap();
        assert_eq!(output(&terminal), sequences::mouse::DISABLE);
    }

    #[test]
    fn test_cleanup_restores_cursor_on_drop() {
        let mut buf = Vec::new();
        {
            let mut terminal = Terminal::headless(&mut buf, 80, 24);
            terminal.hide_cursor().unwrap();
        }
        let s = String::from_utf8_lossy(&buf);
        assert!(s.ends_with("\x1b[?25h\x1b[0m"), "got {s:?}");
    }
}
