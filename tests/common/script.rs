//! Scripted input for driving the run loop.

#![allow(dead_code)] // Shared test helper; not every integration test uses every builder

use super::console::SizeHandle;
use dynmenu::input::{
    Event, InputSource, KeyCode, KeyEvent, PointerEvent, PointerKind, ResizeEvent,
};
use dynmenu::{Error, Result};
use std::collections::VecDeque;

enum Step {
    Event(Event),
    Resize(SizeHandle, u16, u16),
    SilentResize(SizeHandle, u16, u16),
}

/// Queued events handed out one per `read_event`.
///
/// Ends with [`Error::InputClosed`] once the queue is empty.
#[derive(Default)]
pub struct ScriptedInput {
    steps: VecDeque<Step>,
    consumed: usize,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, event: impl Into<Event>) -> Self {
        self.steps.push_back(Step::Event(event.into()));
        self
    }

    pub fn key(self, code: KeyCode) -> Self {
        self.event(KeyEvent::key(code))
    }

    pub fn repeat(mut self, code: KeyCode, times: usize) -> Self {
        for _ in 0..times {
            self = self.key(code);
        }
        self
    }

    pub fn down(self, times: usize) -> Self {
        self.repeat(KeyCode::Down, times)
    }

    pub fn up(self, times: usize) -> Self {
        self.repeat(KeyCode::Up, times)
    }

    pub fn enter(self) -> Self {
        self.key(KeyCode::Enter)
    }

    /// One key event per character.
    pub fn text(mut self, text: &str) -> Self {
        for c in text.chars() {
            self = self.event(KeyEvent::char(c));
        }
        self
    }

    pub fn click(self, x: u32, y: u32) -> Self {
        self.event(PointerEvent::new(x, y, PointerKind::Click))
    }

    pub fn hover(self, x: u32, y: u32) -> Self {
        self.event(PointerEvent::new(x, y, PointerKind::EnterHover))
    }

    pub fn leave(self, x: u32, y: u32) -> Self {
        self.event(PointerEvent::new(x, y, PointerKind::LeaveHover))
    }

    /// Resize the console behind `size`, then deliver a resize event.
    pub fn resize(mut self, size: &SizeHandle, cols: u16, rows: u16) -> Self {
        self.steps.push_back(Step::Resize(size.clone(), cols, rows));
        self
    }

    /// Resize the console without a resize event; the run loop only sees
    /// it by querying the geometry.
    pub fn silent_resize(mut self, size: &SizeHandle, cols: u16, rows: u16) -> Self {
        self.steps
            .push_back(Step::SilentResize(size.clone(), cols, rows));
        self
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl InputSource for ScriptedInput {
    fn read_event(&mut self) -> Result<Event> {
        loop {
            let step = self.steps.pop_front().ok_or(Error::InputClosed)?;
            self.consumed += 1;
            match step {
                Step::Event(event) => return Ok(event),
                Step::Resize(size, cols, rows) => {
                    size.set(cols, rows);
                    return Ok(ResizeEvent::new(cols, rows).into());
                }
                Step::SilentResize(size, cols, rows) => size.set(cols, rows),
            }
        }
    }
}
