//! Byte parser for terminal input.
//!
//! Turns raw bytes read from the terminal into [`Event`]s. Recognizes:
//! - plain and control characters, UTF-8
//! - the two-stage extended key prefixes `ESC [` (CSI) and `ESC O` (SS3)
//! - xterm modifier parameters on cursor keys
//! - SGR (1006) and legacy X11 mouse reports
//! - XTWINOPS size reports (`CSI 8 ; rows ; cols t`)

// One arm per terminal sequence
#![allow(clippy::match_same_arms)]

use crate::event::{LogLevel, emit_log};
use crate::input::event::{Event, ResizeEvent};
use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use crate::terminal::{MouseButton, MouseEvent, MouseEventKind};

/// Why a parse produced no event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// The buffer ends inside a sequence; more bytes are needed.
    Incomplete,
    /// A complete sequence that maps to no event. Carries the bytes to skip.
    UnrecognizedSequence(Vec<u8>),
    /// A byte that cannot start or continue a UTF-8 character.
    InvalidUtf8,
}

/// Result of parsing input: the event and the number of bytes it used.
pub type ParseResult = Result<(Event, usize), ParseError>;

const ESC: u8 = 0x1b;

/// Stateless terminal input parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputParser;

impl InputParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse one event from the front of `input`.
    pub fn parse(&self, input: &[u8]) -> ParseResult {
        let Some(&first) = input.first() else {
            return Err(ParseError::Empty);
        };

        let key = |code: KeyCode| -> ParseResult { Ok((Event::Key(KeyEvent::key(code)), 1)) };
        match first {
            ESC => parse_escape(input),
            b'\r' | b'\n' => key(KeyCode::Enter),
            b'\t' => key(KeyCode::Tab),
            0x7f | 0x08 => key(KeyCode::Backspace),
            0x00 => key(KeyCode::Null),
            0x01..=0x1a => {
                let c = char::from(first - 1 + b'a');
                Ok((KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL).into(), 1))
            }
            0x1c..=0x1f => Err(ParseError::UnrecognizedSequence(vec![first])),
            0x20..=0x7e => Ok((KeyEvent::char(char::from(first)).into(), 1)),
            0x80..=0xff => parse_utf8(input),
        }
    }

    /// Pop the next complete event off the front of `buf`.
    ///
    /// Unrecognized sequences and stray bytes are discarded. Returns `None`
    /// when `buf` is empty or ends in an incomplete sequence, leaving those
    /// bytes in place for the next read.
    pub fn next_event(&self, buf: &mut Vec<u8>) -> Option<Event> {
        loop {
            match self.parse(buf) {
                Ok((event, consumed)) => {
                    buf.drain(..consumed.min(buf.len()));
                    return Some(event);
                }
                Err(ParseError::UnrecognizedSequence(seq)) => {
                    emit_log(
                        LogLevel::Debug,
                        &format!("dropping unrecognized input sequence {seq:?}"),
                    );
                    buf.drain(..seq.len().clamp(1, buf.len()));
                }
                Err(ParseError::InvalidUtf8) => {
                    buf.drain(..1);
                }
                Err(ParseError::Empty | ParseError::Incomplete) => return None,
            }
        }
    }
}

fn parse_escape(input: &[u8]) -> ParseResult {
    let Some(&second) = input.get(1) else {
        // A lone ESC may be the Esc key or the start of a sequence
        return Err(ParseError::Incomplete);
    };

    match second {
        b'[' => parse_csi(input),
        b'O' => parse_ss3(input),
        ESC => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
        0x20..=0x7e => Ok((
            KeyEvent::new(KeyCode::Char(char::from(second)), KeyModifiers::ALT).into(),
            2,
        )),
        _ => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
    }
}

/// `ESC [ params final`.
fn parse_csi(input: &[u8]) -> ParseResult {
    let Some(offset) = input[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return Err(ParseError::Incomplete);
    };
    let end = 2 + offset;
    let raw = &input[2..end];
    let consumed = end + 1;
    let unrecognized = || -> ParseResult {
        Err(ParseError::UnrecognizedSequence(input[..consumed].to_vec()))
    };

    let arrow = |code: KeyCode| -> ParseResult {
        let modifiers = params(raw)
            .get(1)
            .copied()
            .flatten()
            .map_or_else(KeyModifiers::empty, KeyModifiers::from_xterm_param);
        Ok((KeyEvent::new(code, modifiers).into(), consumed))
    };

    match input[end] {
        b'A' => arrow(KeyCode::Up),
        b'B' => arrow(KeyCode::Down),
        b'C' => arrow(KeyCode::Right),
        b'D' => arrow(KeyCode::Left),
        b'H' => arrow(KeyCode::Home),
        b'F' => arrow(KeyCode::End),
        b'~' => match tilde_key(raw) {
            Some(key) => Ok((key.into(), consumed)),
            None => unrecognized(),
        },
        b'M' if raw.is_empty() => parse_x11_mouse(input),
        b'M' | b'm' if raw.first() == Some(&b'<') => {
            match sgr_mouse(&raw[1..], input[end] == b'm') {
                Some(mouse) => Ok((mouse.into(), consumed)),
                None => unrecognized(),
            }
        }
        b't' => match params(raw).as_slice() {
            [Some(8), Some(rows), Some(cols)] => {
                let rows = u16::try_from(*rows).unwrap_or(u16::MAX);
                let cols = u16::try_from(*cols).unwrap_or(u16::MAX);
                Ok((ResizeEvent::new(cols, rows).into(), consumed))
            }
            _ => unrecognized(),
        },
        _ => unrecognized(),
    }
}

/// `ESC O final`: application-mode cursor keys.
fn parse_ss3(input: &[u8]) -> ParseResult {
    let Some(&last) = input.get(2) else {
        return Err(ParseError::Incomplete);
    };
    let code = match last {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'M' => KeyCode::Enter,
        _ => return Err(ParseError::UnrecognizedSequence(input[..3].to_vec())),
    };
    Ok((KeyEvent::key(code).into(), 3))
}

/// `CSI number [; modifiers] ~` editing keys.
fn tilde_key(raw: &[u8]) -> Option<KeyEvent> {
    let numbers = params(raw);
    let code = match numbers.first().copied().flatten()? {
        1 | 7 => KeyCode::Home,
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,
        _ => return None,
    };
    let modifiers = numbers
        .get(1)
        .copied()
        .flatten()
        .map_or_else(KeyModifiers::empty, KeyModifiers::from_xterm_param);
    Some(KeyEvent::new(code, modifiers))
}

/// `ESC [ M cb cx cy`, each byte offset by 32 and coordinates 1-indexed.
fn parse_x11_mouse(input: &[u8]) -> ParseResult {
    let [cb, cx, cy] = match input.get(3..6) {
        Some(&[cb, cx, cy]) => [cb, cx, cy],
        _ => return Err(ParseError::Incomplete),
    };
    let cb = u32::from(cb.saturating_sub(32));
    let (button, kind) = decode_button(cb, true);
    let (shift, alt, ctrl) = decode_modifiers(cb);
    let event = MouseEvent::new(
        u32::from(cx.saturating_sub(33)),
        u32::from(cy.saturating_sub(33)),
        button,
        kind,
    )
    .with_modifiers(shift, ctrl, alt);
    Ok((event.into(), 6))
}

/// `ESC [ < cb ; x ; y (M|m)` with 1-indexed coordinates.
fn sgr_mouse(raw: &[u8], release: bool) -> Option<MouseEvent> {
    let [Some(cb), Some(x), Some(y)] = params(raw)[..] else {
        return None;
    };
    let (button, mut kind) = decode_button(cb, false);
    if release {
        kind = MouseEventKind::Release;
    }
    let (shift, alt, ctrl) = decode_modifiers(cb);
    Some(
        MouseEvent::new(x.saturating_sub(1), y.saturating_sub(1), button, kind)
            .with_modifiers(shift, ctrl, alt),
    )
}

/// Button and kind from a mouse report's button code. Legacy X11 reports
/// signal release with low bits `3` since they have no release terminator.
fn decode_button(cb: u32, legacy: bool) -> (MouseButton, MouseEventKind) {
    let low = cb & 0b11;
    let button = match low {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::None,
    };

    if cb & 0b0100_0000 != 0 {
        let kind = match low {
            0 => MouseEventKind::ScrollUp,
            1 => MouseEventKind::ScrollDown,
            2 => MouseEventKind::ScrollLeft,
            _ => MouseEventKind::ScrollRight,
        };
        (MouseButton::None, kind)
    } else if cb & 0b0010_0000 != 0 {
        (button, MouseEventKind::Move)
    } else if legacy && low == 3 {
        (MouseButton::None, MouseEventKind::Release)
    } else {
        (button, MouseEventKind::Press)
    }
}

/// `(shift, alt, ctrl)` bits of a mouse button code.
fn decode_modifiers(cb: u32) -> (bool, bool, bool) {
    (cb & 0b0100 != 0, cb & 0b1000 != 0, cb & 0b1_0000 != 0)
}

/// Split `;`-separated decimal parameters. Empty or malformed fields are `None`.
fn params(raw: &[u8]) -> Vec<Option<u32>> {
    raw.split(|&b| b == b';')
        .map(|field| {
            if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
                return None;
            }
            field.iter().try_fold(0u32, |acc, &d| {
                acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
            })
        })
        .collect()
}

fn parse_utf8(input: &[u8]) -> ParseResult {
    let len = match input[0] {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Err(ParseError::InvalidUtf8),
    };
    let Some(bytes) = input.get(..len) else {
        return Err(ParseError::Incomplete);
    };
    let c = std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or(ParseError::InvalidUtf8)?;
    Ok((KeyEvent::char(c).into(), len))
}
