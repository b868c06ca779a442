//! Blocking event sources for the run loop.

use crate::error::{Error, Result};
use crate::input::event::Event;
use crate::input::keyboard::{KeyCode, KeyEvent};
use crate::input::parser::InputParser;
use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, Sender};

/// Bytes asked for per read. At least the size of stdin's own buffer, so
/// reads on stdin bypass it and readiness polling on the descriptor sees
/// every pending byte.
const READ_CHUNK: usize = 8 * 1024;

/// Where the run loop gets its next event.
///
/// `read_event` blocks until an event is available. End of input is
/// [`Error::InputClosed`].
pub trait InputSource {
    fn read_event(&mut self) -> Result<Event>;
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    fn read_event(&mut self) -> Result<Event> {
        (**self).read_event()
    }
}

impl<S: InputSource + ?Sized> InputSource for Box<S> {
    fn read_event(&mut self) -> Result<Event> {
        (**self).read_event()
    }
}

/// Parses events straight from a byte stream such as stdin.
///
/// A read that ends on a bare ESC is taken as the Esc key: escape
/// sequences arrive from the terminal in a single write.
pub struct ReaderInput<R: Read> {
    reader: R,
    parser: InputParser,
    pending: Vec<u8>,
}

impl<R: Read> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            parser: InputParser::new(),
            pending: Vec::with_capacity(64),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// An event already sitting in the buffer, without reading.
    pub(crate) fn buffered_event(&mut self) -> Option<Event> {
        if let Some(event) = self.parser.next_event(&mut self.pending) {
            return Some(event);
        }
        if self.pending == [0x1b] {
            self.pending.clear();
            return Some(KeyEvent::key(KeyCode::Esc).into());
        }
        None
    }

    /// One blocking read into the buffer. End of stream is
    /// [`Error::InputClosed`].
    pub(crate) fn fill(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.reader.read(&mut chunk) {
                Ok(0) => return Err(Error::InputClosed),
                Ok(n) => {
                    self.pending.extend_from_slice(&chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> InputSource for ReaderInput<R> {
    fn read_event(&mut self) -> Result<Event> {
        loop {
            if let Some(event) = self.buffered_event() {
                return Ok(event);
            }
            self.fill()?;
        }
    }
}

/// Events delivered over a channel, typically fed by an
/// [`InputPump`](crate::input::InputPump) and a
/// [`PointerEventSource`](crate::input::PointerEventSource).
pub struct ChannelInput {
    rx: Receiver<Event>,
}

impl ChannelInput {
    pub fn new(rx: Receiver<Event>) -> Self {
        Self { rx }
    }

    /// A fresh channel and the input reading from it.
    #[must_use]
    pub fn channel() -> (Sender<Event>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl From<Receiver<Event>> for ChannelInput {
    fn from(rx: Receiver<Event>) -> Self {
        Self::new(rx)
    }
}

impl InputSource for ChannelInput {
    fn read_event(&mut self) -> Result<Event> {
        self.rx.recv().map_err(|_| Error::InputClosed)
    }
}
