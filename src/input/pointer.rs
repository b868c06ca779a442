//! Pointer (click and hover) events from a device outside the terminal
//! stream.
//!
//! A [`PointerEventSource`] runs a device poll closure on its own thread
//! and forwards what it reports into the channel the run loop reads. It
//! never sees menu state: mapping coordinates to an entry happens on the
//! run loop's thread, against the hit grid of the last full redraw.
//!
//! # Usage
//!
//! ```no_run
//! use dynmenu::input::{ChannelInput, PointerEventSource};
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let mut device = vec![(12, 3, 0u8)].into_iter();
//! let source = PointerEventSource::start(tx, move || device.next())?;
//! let mut input = ChannelInput::new(rx);
//! // ... run a menu with `input`
//! source.stop();
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::input::event::Event;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Raw device report: `(screen_x, screen_y, kind_code)`.
pub type RawPointer = (u32, u32, u8);

/// How long the pointer thread sleeps when the device has nothing to report.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Recognized pointer event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Click,
    EnterHover,
    LeaveHover,
}

impl TryFrom<u8> for PointerKind {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Click),
            1 => Ok(Self::EnterHover),
            2 => Ok(Self::LeaveHover),
            other => Err(Error::UnsupportedOperation(format!(
                "pointer event kind {other}"
            ))),
        }
    }
}

impl From<PointerKind> for u8 {
    fn from(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Click => 0,
            PointerKind::EnterHover => 1,
            PointerKind::LeaveHover => 2,
        }
    }
}

/// A pointer event at 0-indexed screen cell `x`, `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: u32,
    pub y: u32,
    pub kind: PointerKind,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: u32, y: u32, kind: PointerKind) -> Self {
        Self { x, y, kind }
    }

    /// Decode a raw device report.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] for an unknown kind code.
    pub fn from_raw((x, y, code): RawPointer) -> Result<Self> {
        Ok(Self::new(x, y, PointerKind::try_from(code)?))
    }
}

/// Pointer device thread with an explicit start/stop lifecycle.
pub struct PointerEventSource {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl PointerEventSource {
    /// Start polling `poll` on a new thread, sending events into `tx`.
    ///
    /// `poll` returns `None` when the device has nothing to report.
    pub fn start<F>(tx: Sender<Event>, poll: F) -> io::Result<Self>
    where
        F: FnMut() -> Option<RawPointer> + Send + 'static,
    {
        Self::start_with_interval(tx, poll, DEFAULT_POLL_INTERVAL)
    }

    /// Like [`start`](Self::start) with a custom idle interval.
    pub fn start_with_interval<F>(
        tx: Sender<Event>,
        mut poll: F,
        interval: Duration,
    ) -> io::Result<Self>
    where
        F: FnMut() -> Option<RawPointer> + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("dynmenu-pointer".to_string())
            .spawn(move || {
                while flag.load(Ordering::Acquire) {
                    let Some(raw) = poll() else {
                        thread::sleep(interval);
                        continue;
                    };
                    let event = match PointerEvent::from_raw(raw) {
                        Ok(event) => event,
                        Err(err) => {
                            emit_log(LogLevel::Warn, &format!("ignoring pointer event: {err}"));
                            continue;
                        }
                    };
                    if tx.send(Event::Pointer(event)).is_err() {
                        // Run loop is gone
                        break;
                    }
                }
                flag.store(false, Ordering::Release);
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Whether the device thread is still polling.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop polling and join the device thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                emit_log(LogLevel::Error, "pointer thread panicked");
            }
        }
    }
}

impl Drop for PointerEventSource {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_kind_codes() {
        assert_eq!(PointerKind::try_from(0u8).unwrap(), PointerKind::Click);
        assert_eq!(PointerKind::try_from(1u8).unwrap(), PointerKind::EnterHover);
        assert_eq!(PointerKind::try_from(2u8).unwrap(), PointerKind::LeaveHover);
        for kind in [PointerKind::Click, PointerKind::EnterHover, PointerKind::LeaveHover] {
            assert_eq!(PointerKind::try_from(u8::from(kind)).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let err = PointerEvent::from_raw((1, 1, 9)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(ref m) if m.contains('9')));
    }

    #[test]
    fn test_source_forwards_and_skips_unknown() {
        let (tx, rx) = mpsc::channel();
        let mut reports = vec![(4, 2, 1u8), (4, 2, 7), (4, 2, 0)].into_iter();
        let source = PointerEventSource::start_with_interval(
            tx,
            move || reports.next(),
            Duration::from_millis(1),
        )
        .unwrap();

        let first = rx.recv().unwrap();
        let second = rx.recv().unwrap();
        source.stop();

        assert_eq!(
            first,
            Event::Pointer(PointerEvent::new(4, 2, PointerKind::EnterHover))
        );
        assert_eq!(
            second,
            Event::Pointer(PointerEvent::new(4, 2, PointerKind::Click))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_source_ends_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let source = PointerEventSource::start_with_interval(
            tx,
            || Some((0, 0, 0)),
            Duration::from_millis(1),
        )
        .unwrap();
        for _ in 0..1000 {
            if !source.is_running() {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        assert!(!source.is_running());
    }
}
