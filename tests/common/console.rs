//! Headless console with a geometry tests can change mid-run.
//!
//! Output is captured in memory and can be replayed through `vt100` to see
//! what a real terminal would display.

#![allow(dead_code)] // Shared test helper; not every integration test uses every method

use dynmenu::terminal::{Console, Terminal};
use std::cell::Cell;
use std::io;
use std::rc::Rc;

/// Bytes the menu writes when its run loop returns.
pub const EXIT_SEQUENCE: &str = "\x1b[2J\x1b[H\x1b[?25h";

/// Shared handle to a console's reported size.
#[derive(Clone, Debug)]
pub struct SizeHandle(Rc<Cell<(u16, u16)>>);

impl SizeHandle {
    pub fn set(&self, cols: u16, rows: u16) {
        self.0.set((cols, rows));
    }

    pub fn get(&self) -> (u16, u16) {
        self.0.get()
    }
}

pub struct ResizableConsole {
    terminal: Terminal<Vec<u8>>,
    size: SizeHandle,
}

impl ResizableConsole {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            terminal: Terminal::headless(Vec::new(), cols, rows),
            size: SizeHandle(Rc::new(Cell::new((cols, rows)))),
        }
    }

    /// Handle that resizes this console when set.
    pub fn size_handle(&self) -> SizeHandle {
        self.size.clone()
    }

    pub fn output(&self) -> &[u8] {
        self.terminal.writer()
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(self.output()).into_owned()
    }

    pub fn clear_output(&mut self) {
        self.terminal.writer_mut().clear();
    }

    pub fn cursor_visible(&self) -> bool {
        self.terminal.cursor().visible
    }

    /// The screen as a terminal of the current size would show it.
    pub fn screen(&self) -> vt100::Parser {
        self.replay(self.output())
    }

    /// The screen just before the run loop's final clear.
    pub fn screen_before_exit(&self) -> vt100::Parser {
        let out = self.output();
        let cut = out
            .strip_suffix(EXIT_SEQUENCE.as_bytes())
            .unwrap_or(out);
        self.replay(cut)
    }

    fn replay(&self, bytes: &[u8]) -> vt100::Parser {
        let (cols, rows) = self.size.get();
        let mut parser = vt100::Parser::new(rows, cols, 0);
        parser.process(bytes);
        parser
    }
}

impl Console for ResizableConsole {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.size.get())
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.terminal.move_cursor(col, row)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.terminal.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.terminal.show_cursor()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.terminal.clear_line()
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.terminal.write_str(text)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.terminal.flush()
    }
}

/// Text of screen row `row`, trailing blanks removed.
pub fn row_text(parser: &vt100::Parser, row: u16) -> String {
    let screen = parser.screen();
    let (_, cols) = screen.size();
    let mut line = String::new();
    for col in 0..cols {
        let contents = screen
            .cell(row, col)
            .map(|cell| cell.contents())
            .unwrap_or_default();
        if contents.is_empty() {
            line.push(' ');
        } else {
            line.push_str(&contents);
        }
    }
    line.trim_end().to_string()
}

/// Every row of the screen, trailing blanks removed.
pub fn screen_rows(parser: &vt100::Parser) -> Vec<String> {
    let (rows, _) = parser.screen().size();
    (0..rows).map(|row| row_text(parser, row)).collect()
}
