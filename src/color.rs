//! Colors and the color-formatting collaborator.
//!
//! Color is purely cosmetic in the menu engine: it never affects control
//! flow or layout. Formatters wrap an already laid-out span, so widths are
//! always measured on the plain text.

use crate::ansi::{self, sequences};

/// An opaque 24-bit color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Gold used for submenu links.
    pub const SUBMENU: Self = Self::new(212, 155, 55);

    /// Create a color from components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Map to the nearest entry of the xterm 256-color palette.
    #[must_use]
    pub fn to_256_color(self) -> u8 {
        let Self { r, g, b } = self;

        let gray = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
        let near = |c: u8| (i16::from(c) - i16::from(gray)).abs() < 10;
        if near(r) && near(g) && near(b) {
            // 232..=255 is a 24-step grayscale ramp
            let gray_idx = (u16::from(gray) * 24 / 256) as u8;
            return 232 + gray_idx.min(23);
        }

        // 6x6x6 cube at 16..=231; component levels 0, 95, 135, 175, 215, 255
        let cube = |c: u8| -> u8 {
            match c {
                0..=47 => 0,
                48..=114 => 1,
                115..=154 => 2,
                155..=194 => 3,
                195..=234 => 4,
                _ => 5,
            }
        };
        16 + 36 * cube(r) + 6 * cube(g) + cube(b)
    }
}

/// Color output mode for ANSI sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// True color (24-bit RGB).
    #[default]
    TrueColor,
    /// 256-color palette.
    Color256,
    /// No color output.
    NoColor,
}

/// Wraps a text span with foreground/background color escapes.
pub trait ColorFormatter {
    /// Return `text` painted with the given colors. `None` leaves that
    /// channel at the terminal default.
    fn paint(&self, text: &str, fg: Option<Rgb>, bg: Option<Rgb>) -> String;
}

/// ANSI SGR color formatter.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiColors {
    mode: ColorMode,
}

impl AnsiColors {
    /// Create a formatter emitting sequences for `mode`.
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self { mode }
    }

    /// The color mode in use.
    #[must_use]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }
}

impl ColorFormatter for AnsiColors {
    fn paint(&self, text: &str, fg: Option<Rgb>, bg: Option<Rgb>) -> String {
        if self.mode == ColorMode::NoColor || (fg.is_none() && bg.is_none()) {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + 40);
        if let Some(fg) = fg {
            out.push_str(&ansi::fg_color(fg, self.mode));
        }
        if let Some(bg) = bg {
            out.push_str(&ansi::bg_color(bg, self.mode));
        }
        out.push_str(text);
        out.push_str(sequences::RESET);
        out
    }
}

/// Formatter that leaves text untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoColors;

impl ColorFormatter for NoColors {
    fn paint(&self, text: &str, _fg: Option<Rgb>, _bg: Option<Rgb>) -> String {
        text.to_string()
    }
}
