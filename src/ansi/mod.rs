//! ANSI escape sequence generation.

pub mod sequences;

pub use sequences::*;

use crate::color::{ColorMode, Rgb};
use std::io::{self, Write};

/// Write a u8 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    if n < 100 {
        return w.write_all(&[b'0' + (n / 10) as u8, b'0' + (n % 10) as u8]);
    }

    // max u32 is 4294967295 (10 digits)
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

fn into_string(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap_or_default()
}

/// Generate SGR sequence for a foreground color.
#[must_use]
pub fn fg_color(color: Rgb, mode: ColorMode) -> String {
    let mut buf = Vec::new();
    let _ = write_fg_color(&mut buf, color, mode);
    into_string(buf)
}

/// Generate SGR sequence for a background color.
#[must_use]
pub fn bg_color(color: Rgb, mode: ColorMode) -> String {
    let mut buf = Vec::new();
    let _ = write_bg_color(&mut buf, color, mode);
    into_string(buf)
}

/// Write SGR sequence for a foreground color to a writer.
pub fn write_fg_color(w: &mut impl Write, color: Rgb, mode: ColorMode) -> io::Result<()> {
    write_color(w, color, mode, b"38")
}

/// Write SGR sequence for a background color to a writer.
pub fn write_bg_color(w: &mut impl Write, color: Rgb, mode: ColorMode) -> io::Result<()> {
    write_color(w, color, mode, b"48")
}

fn write_color(w: &mut impl Write, color: Rgb, mode: ColorMode, layer: &[u8]) -> io::Result<()> {
    match mode {
        ColorMode::TrueColor => {
            w.write_all(b"\x1b[")?;
            w.write_all(layer)?;
            w.write_all(b";2;")?;
            write_u8_decimal(w, color.r)?;
            w.write_all(b";")?;
            write_u8_decimal(w, color.g)?;
            w.write_all(b";")?;
            write_u8_decimal(w, color.b)?;
            w.write_all(b"m")
        }
        ColorMode::Color256 => {
            w.write_all(b"\x1b[")?;
            w.write_all(layer)?;
            w.write_all(b";5;")?;
            write_u8_decimal(w, color.to_256_color())?;
            w.write_all(b"m")
        }
        ColorMode::NoColor => Ok(()),
    }
}

/// Generate cursor position sequence (arguments 0-indexed, output 1-indexed).
#[must_use]
pub fn cursor_position(row: u32, col: u32) -> String {
    let mut buf = Vec::new();
    let _ = write_cursor_position(&mut buf, row, col);
    into_string(buf)
}

/// Write cursor position sequence to a writer.
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row.saturating_add(1))?;
    w.write_all(b";")?;
    write_u32_decimal(w, col.saturating_add(1))?;
    w.write_all(b"H")
}
