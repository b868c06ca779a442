//! Mapping input events to menu commands.

use crate::input::event::Event;
use crate::input::keyboard::KeyCode;
use crate::input::pointer::{PointerEvent, PointerKind};

/// What the run loop acts on.
///
/// `Enter`, the four directions and `Unknown` are the keyboard set;
/// `Pointer` and `Resize` carry the secondary sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Enter,
    Up,
    Down,
    Left,
    Right,
    Pointer(PointerEvent),
    /// The terminal reported a new size.
    Resize,
    /// Anything else. Dropped without a state change or redraw.
    Unknown,
}

/// Translate one event into a command.
///
/// Arrow keys map regardless of held modifiers. Terminal mouse presses of
/// the left button become clicks and motion becomes a hover probe.
#[must_use]
pub fn dispatch(event: &Event) -> Command {
    match event {
        Event::Key(key) => match key.code {
            KeyCode::Enter => Command::Enter,
            KeyCode::Up => Command::Up,
            KeyCode::Down => Command::Down,
            KeyCode::Left => Command::Left,
            KeyCode::Right => Command::Right,
            _ => Command::Unknown,
        },
        Event::Mouse(mouse) if mouse.is_click() => {
            Command::Pointer(PointerEvent::new(mouse.x, mouse.y, PointerKind::Click))
        }
        Event::Mouse(mouse) if mouse.is_motion() => {
            Command::Pointer(PointerEvent::new(mouse.x, mouse.y, PointerKind::EnterHover))
        }
        Event::Mouse(_) => Command::Unknown,
        Event::Resize(_) => Command::Resize,
        Event::Pointer(pointer) => Command::Pointer(*pointer),
    }
}
