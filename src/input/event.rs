//! Input event types.

use crate::input::keyboard::KeyEvent;
use crate::input::pointer::PointerEvent;
use crate::terminal::MouseEvent;

/// Anything the run loop can wake up for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// A mouse report parsed from the terminal stream.
    Mouse(MouseEvent),
    /// A geometry report from the terminal.
    Resize(ResizeEvent),
    /// A click or hover delivered by a [`PointerEventSource`](crate::input::PointerEventSource).
    Pointer(PointerEvent),
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<MouseEvent> for Event {
    fn from(e: MouseEvent) -> Self {
        Self::Mouse(e)
    }
}

impl From<ResizeEvent> for Event {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

impl From<PointerEvent> for Event {
    fn from(e: PointerEvent) -> Self {
        Self::Pointer(e)
    }
}

/// Terminal resize report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl ResizeEvent {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}
