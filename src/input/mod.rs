//! Input: bytes to events to menu commands.
//!
//! [`InputParser`] decodes terminal bytes into [`Event`]s, [`dispatch`]
//! reduces an event to a [`Command`], and an [`InputSource`] hands the run
//! loop one event per blocking read. Secondary producers
//! ([`InputPump`], [`PointerEventSource`]) run on their own threads and only
//! ever send events into a channel.

mod command;
mod event;
mod keyboard;
mod parser;
mod pointer;
mod pump;
mod source;

pub use command::{Command, dispatch};
pub use event::{Event, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError, ParseResult};
pub use pointer::{DEFAULT_POLL_INTERVAL, PointerEvent, PointerEventSource, PointerKind, RawPointer};
pub use pump::InputPump;
pub use source::{ChannelInput, InputSource, ReaderInput};

pub use crate::terminal::{MouseButton, MouseEvent, MouseEventKind};
