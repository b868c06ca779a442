//! Background thread feeding terminal input into a channel.
//!
//! Used when events come from more than one producer: the pump and a
//! [`PointerEventSource`](crate::input::PointerEventSource) share one
//! `Sender`, and the run loop reads the other end through
//! [`ChannelInput`](crate::input::ChannelInput).
//!
//! The pump only reads once its descriptor is readable, waiting in short
//! slices and checking its stop flag in between. A stopped pump has
//! therefore never taken bytes meant for whoever reads the stream next.

use crate::error::Error;
use crate::event::{LogLevel, emit_log};
use crate::input::event::Event;
use crate::input::source::ReaderInput;
use crate::terminal::wait_readable;
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Longest wait for input before the stop flag is checked again.
const STOP_CHECK_INTERVAL: Duration = Duration::from_millis(20);

/// Reads and parses a byte stream on its own thread.
pub struct InputPump {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputPump {
    /// Start pumping events parsed from `reader` into `tx`.
    ///
    /// The thread ends at end of stream, on a read error, once the
    /// receiving side is gone, or when the pump is stopped.
    pub fn start<R>(reader: R, tx: Sender<Event>) -> io::Result<Self>
    where
        R: Read + AsRawFd + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("dynmenu-input".to_string())
            .spawn(move || {
                let fd = reader.as_raw_fd();
                let mut input = ReaderInput::new(reader);
                while flag.load(Ordering::Acquire) {
                    if let Some(event) = input.buffered_event() {
                        if tx.send(event).is_err() {
                            break;
                        }
                        continue;
                    }
                    match wait_readable(fd, STOP_CHECK_INTERVAL) {
                        Ok(false) => continue,
                        Ok(true) => {}
                        Err(err) => {
                            emit_log(LogLevel::Error, &format!("input pump stopped: {err}"));
                            break;
                        }
                    }
                    match input.fill() {
                        Ok(()) => {}
                        Err(Error::InputClosed) => break,
                        Err(err) => {
                            emit_log(LogLevel::Error, &format!("input pump stopped: {err}"));
                            break;
                        }
                    }
                }
                flag.store(false, Ordering::Release);
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the pump and join its thread.
    ///
    /// Returns within one wait slice. Bytes that arrive afterwards stay in
    /// the stream.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                emit_log(LogLevel::Error, "input thread panicked");
            }
        }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.shutdown();
    }
}
