//! Inline value editing for counters.

use crate::entry::EntryContext;
use crate::error::Result;
use crate::input::{Event, KeyCode};
use std::num::IntErrorKind;

/// Longest text accepted: a sign and the ten digits of `i32::MIN`.
const MAX_TEXT_LEN: usize = 11;

/// Read a new value in place, starting at `column` on the entry's row.
///
/// Returns `None` on Esc or when the text typed does not hold a number.
/// Typing stops at eleven characters or at the right edge, whichever comes
/// first. Keys held with Ctrl or Alt are ignored, as are resize and pointer
/// events, until the edit ends.
pub(crate) fn read_value(ctx: &mut EntryContext<'_>, column: u16) -> Result<Option<i32>> {
    let row = ctx.row;
    let columns = u16::try_from(ctx.columns).unwrap_or(u16::MAX);

    // "name    <" stays, the old value and closing bracket go
    ctx.console.move_cursor(column, row)?;
    let blank = usize::from(columns.saturating_sub(column));
    ctx.console.write_str(&" ".repeat(blank))?;
    ctx.console.move_cursor(column, row)?;
    ctx.console.show_cursor()?;
    ctx.console.flush()?;

    let limit = MAX_TEXT_LEN.min(blank);
    let mut text = String::new();
    let committed = loop {
        let Event::Key(key) = ctx.input.read_event()? else {
            continue;
        };
        match key.code {
            KeyCode::Enter => break true,
            KeyCode::Esc => break false,
            KeyCode::Backspace => {
                if text.pop().is_some() {
                    let at = text_end(column, &text);
                    ctx.console.move_cursor(at, row)?;
                    ctx.console.write_str(" ")?;
                    ctx.console.move_cursor(at, row)?;
                }
            }
            KeyCode::Char(_) => match key.plain_char() {
                Some(c) if text.len() < limit && accepts(&text, c) => {
                    let mut buf = [0u8; 4];
                    ctx.console.write_str(c.encode_utf8(&mut buf))?;
                    text.push(c);
                }
                _ => continue,
            },
            _ => continue,
        }
        ctx.console.flush()?;
    };

    ctx.console.hide_cursor()?;
    Ok(if committed {
        parse_saturating(&text)
    } else {
        None
    })
}

/// Column just past the typed text. Text is ASCII, so bytes are columns.
fn text_end(column: u16, text: &str) -> u16 {
    column.saturating_add(u16::try_from(text.len()).unwrap_or(u16::MAX))
}

/// Digits anywhere, a sign only in front.
fn accepts(text: &str, c: char) -> bool {
    c.is_ascii_digit() || (text.is_empty() && (c == '-' || c == '+'))
}

/// Parse a decimal integer, clamping out-of-range values to the `i32`
/// bounds.
///
/// Returns `None` for empty text, a lone sign, or anything that is not a
/// number.
///
/// ```
/// use dynmenu::entry::parse_saturating;
///
/// assert_eq!(parse_saturating("-42"), Some(-42));
/// assert_eq!(parse_saturating("99999999999"), Some(i32::MAX));
/// assert_eq!(parse_saturating("-"), None);
/// ```
#[must_use]
pub fn parse_saturating(text: &str) -> Option<i32> {
    match text.parse::<i32>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i32::MAX),
            IntErrorKind::NegOverflow => Some(i32::MIN),
            _ => None,
        },
    }
}
