//! The menu controller and its run loop.
//!
//! [`Menu::run`] is a state machine over [`RunState`]:
//!
//! ```text
//! Rendering ──► AwaitingInput ──► Dispatching(cmd) ──► AwaitingInput
//!     ▲                                 │
//!     └──────── Resizing ◄──────────────┤ geometry changed
//!                                       └──► Exiting
//! ```
//!
//! The loop is the only writer to the selection and the entries. Pointer
//! devices and input threads only ever feed events into the
//! [`InputSource`] the loop reads.
//!
//! # Example
//!
//! ```no_run
//! use dynmenu::{Entry, Menu, binding};
//!
//! fn main() -> dynmenu::Result<()> {
//!     let sound = binding(true);
//!     let volume = binding(5);
//!
//!     let mut menu = Menu::new("Settings");
//!     menu.add_entry(Entry::toggle("Sound", &sound));
//!     menu.add_entry(Entry::counter("Volume", &volume));
//!     menu.run_stdio()?;
//!
//!     println!("sound={} volume={}", sound.get(), volume.get());
//!     Ok(())
//! }
//! ```

mod options;

pub use options::MenuOptions;

use crate::color::ColorFormatter;
use crate::entry::{Entry, EntryCommand, EntryContext, Redraw};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log, names};
use crate::input::{
    ChannelInput, Command, InputPump, InputSource, PointerEvent, PointerEventSource, PointerKind,
    RawPointer, ReaderInput, dispatch,
};
use crate::position::PositionIndex;
use crate::renderer::{
    BannerTitle, MoveDirection, PlainTitle, RedrawPlan, RenderStats, Renderer, TitleRenderer,
    Viewport,
};
use crate::terminal::{Console, Terminal};
use std::cell::RefCell;
use std::fmt;
use std::io;
use std::rc::Rc;

/// Shared handle to a menu, as held by the caller of a submenu.
pub type MenuHandle = Rc<RefCell<Menu>>;

/// Run loop states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Rendering,
    AwaitingInput,
    Dispatching(Command),
    Resizing,
    Exiting,
}

/// An interactive menu.
pub struct Menu {
    title: String,
    entries: PositionIndex<Entry>,
    selected: usize,
    loop_active: bool,
    geometry: (u16, u16),
    quit_installed: bool,
    hovered: Option<usize>,
    options: MenuOptions,
    renderer: Renderer,
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("title", &self.title)
            .field("entries", &self.entries)
            .field("selected", &self.selected)
            .field("loop_active", &self.loop_active)
            .field("geometry", &self.geometry)
            .field("quit_installed", &self.quit_installed)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Menu {
    /// Create a menu with default options.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_options(title, MenuOptions::default())
    }

    pub fn with_options(title: impl Into<String>, options: MenuOptions) -> Self {
        let title_renderer: Box<dyn TitleRenderer> = if options.banner {
            Box::new(BannerTitle)
        } else {
            Box::new(PlainTitle)
        };
        Self {
            title: title.into(),
            entries: PositionIndex::new(),
            selected: 0,
            loop_active: false,
            geometry: (0, 0),
            quit_installed: false,
            hovered: None,
            renderer: Renderer::new(title_renderer, options.center_title),
            options,
        }
    }

    /// Wrap the menu in a handle that submenu links can point at.
    #[must_use]
    pub fn into_handle(self) -> MenuHandle {
        Rc::new(RefCell::new(self))
    }

    // ============================================
    // Entries
    // ============================================

    /// Append `entry` and return its position.
    pub fn add_entry(&mut self, entry: Entry) -> usize {
        self.entries.push(entry)
    }

    pub fn extend<I: IntoIterator<Item = Entry>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    /// Remove and return the entry at `position`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `position < len`.
    pub fn remove_entry(&mut self, position: usize) -> Result<Entry> {
        let removed = self.entries.remove(position)?;
        self.clamp_selection();
        Ok(removed)
    }

    /// Put `entry` at `position` and return the entry it replaced.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `position < len`.
    pub fn replace_entry(&mut self, position: usize, entry: Entry) -> Result<Entry> {
        self.entries.replace(position, entry)
    }

    /// Remove the first entry matching `pred`.
    pub fn remove_where<F>(&mut self, pred: F) -> Option<Entry>
    where
        F: FnMut(&Entry) -> bool,
    {
        let removed = self.entries.remove_where(pred);
        self.clamp_selection();
        removed
    }

    /// Remove every entry. An installed quit entry is not added back.
    pub fn clear_entries(&mut self) {
        self.entries.clear();
        self.selected = 0;
        self.hovered = None;
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `position < len`.
    pub fn entry(&self, position: usize) -> Result<&Entry> {
        self.entries.get(position)
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `position < len`.
    pub fn entry_mut(&mut self, position: usize) -> Result<&mut Entry> {
        self.entries.get_mut(position)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        if self.hovered.is_some_and(|h| h >= self.entries.len()) {
            self.hovered = None;
        }
    }

    // ============================================
    // State
    // ============================================

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Whether the run loop is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.loop_active
    }

    /// Entry under the pointer, from the last hover event.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Terminal geometry as `(columns, rows)` at the last redraw.
    #[must_use]
    pub fn geometry(&self) -> (u16, u16) {
        self.geometry
    }

    #[must_use]
    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        self.renderer.viewport()
    }

    #[must_use]
    pub fn render_stats(&self) -> &RenderStats {
        self.renderer.stats()
    }

    pub fn set_title_renderer(&mut self, title: Box<dyn TitleRenderer>) {
        self.renderer.set_title_renderer(title);
    }

    pub fn set_color_formatter(&mut self, colors: Box<dyn ColorFormatter>) {
        self.renderer.set_color_formatter(colors);
    }

    // ============================================
    // Run Loop
    // ============================================

    /// Run the menu until its quit entry is activated.
    ///
    /// Selection starts at the first entry. On return the screen is cleared
    /// and the cursor shown, whether the loop ended normally or not.
    ///
    /// # Errors
    ///
    /// Terminal I/O failures, and [`Error::InputClosed`] when `input` ends
    /// before the menu was quit.
    pub fn run(&mut self, console: &mut dyn Console, input: &mut dyn InputSource) -> Result<()> {
        self.install_quit_entry();
        self.selected = 0;
        self.hovered = None;
        self.loop_active = true;
        emit_event(names::MENU_RUN, &self.title);

        let result = self.run_loop(console, input);

        self.loop_active = false;
        let restored = console
            .clear()
            .and_then(|()| console.show_cursor())
            .and_then(|()| console.flush());
        emit_event(names::MENU_EXIT, &self.title);
        result.and(restored.map_err(Error::from))
    }

    fn install_quit_entry(&mut self) {
        if self.options.quit_entry && !self.quit_installed {
            self.entries.push(Entry::quit(self.options.quit_label.clone()));
            self.quit_installed = true;
        }
    }

    fn run_loop(&mut self, console: &mut dyn Console, input: &mut dyn InputSource) -> Result<()> {
        self.geometry = console.size()?;
        let mut state = RunState::Rendering;
        loop {
            state = match state {
                RunState::Rendering => {
                    self.observe_geometry(console)?;
                    self.renderer.full_redraw(
                        console,
                        self.geometry,
                        &self.title,
                        &self.entries,
                        self.selected,
                    )?;
                    RunState::AwaitingInput
                }
                RunState::AwaitingInput => {
                    let event = input.read_event()?;
                    RunState::Dispatching(dispatch(&event))
                }
                RunState::Dispatching(command) => {
                    let next = self.handle_command(command, console, input)?;
                    if next == RunState::AwaitingInput && console.size()? != self.geometry {
                        RunState::Resizing
                    } else {
                        next
                    }
                }
                RunState::Resizing => {
                    self.observe_geometry(console)?;
                    RunState::Rendering
                }
                RunState::Exiting => return Ok(()),
            };
        }
    }

    /// Store the console's current geometry, reporting a change.
    fn observe_geometry(&mut self, console: &mut dyn Console) -> io::Result<()> {
        let size = console.size()?;
        if size != self.geometry {
            self.geometry = size;
            emit_event(names::MENU_RESIZE, &format!("{}x{}", size.0, size.1));
        }
        Ok(())
    }

    fn handle_command(
        &mut self,
        command: Command,
        console: &mut dyn Console,
        input: &mut dyn InputSource,
    ) -> Result<RunState> {
        match command {
            Command::Up => {
                let target = self.selected.saturating_sub(1);
                self.select(target, console)?;
                Ok(RunState::AwaitingInput)
            }
            Command::Down => {
                let target = (self.selected + 1).min(self.entries.len().saturating_sub(1));
                self.select(target, console)?;
                Ok(RunState::AwaitingInput)
            }
            Command::Enter => self.forward(EntryCommand::Enter, console, input),
            Command::Left => self.forward(EntryCommand::Left, console, input),
            Command::Right => self.forward(EntryCommand::Right, console, input),
            Command::Pointer(event) => self.handle_pointer(event, console, input),
            Command::Resize => Ok(RunState::Resizing),
            Command::Unknown => {
                emit_log(LogLevel::Debug, "dropped unrecognized input");
                Ok(RunState::AwaitingInput)
            }
        }
    }

    /// Move the selection to `index` and repaint what changed.
    fn select(&mut self, index: usize, console: &mut dyn Console) -> io::Result<()> {
        let old = self.selected;
        if index >= self.entries.len() || index == old {
            return Ok(());
        }
        let plan = self.renderer.plan_move(old, index, self.entries.len());
        self.selected = index;
        self.renderer.apply(
            console,
            plan,
            self.geometry,
            &self.title,
            &self.entries,
            self.selected,
        )?;
        if plan == RedrawPlan::Full {
            // Same cursor target as a partial redraw
            let direction = if index > old {
                MoveDirection::Down
            } else {
                MoveDirection::Up
            };
            let row = self
                .renderer
                .viewport()
                .cursor_target(index, self.entries.len(), direction);
            console.move_cursor(0, row)?;
            console.flush()?;
        }
        Ok(())
    }

    /// Hand `command` to the selected entry and act on its response.
    fn forward(
        &mut self,
        command: EntryCommand,
        console: &mut dyn Console,
        input: &mut dyn InputSource,
    ) -> Result<RunState> {
        let Some(row) = self.renderer.viewport().screen_row(self.selected) else {
            return Ok(RunState::AwaitingInput);
        };
        let columns = usize::from(self.geometry.0);
        let Ok(entry) = self.entries.get_mut(self.selected) else {
            return Ok(RunState::AwaitingInput);
        };
        if command == EntryCommand::Enter {
            emit_event(names::ENTRY_ACTIVATE, entry.name());
        }

        let mut ctx = EntryContext {
            console: &mut *console,
            input: &mut *input,
            row,
            columns,
        };
        let response = match entry.handle_input(command, &mut ctx) {
            Ok(response) => response,
            Err(Error::MenuBusy) => {
                emit_log(
                    LogLevel::Warn,
                    &format!("'{}' links to a menu that is already running", entry.name()),
                );
                return Ok(RunState::AwaitingInput);
            }
            Err(err) => return Err(err),
        };

        if response.exit {
            self.loop_active = false;
            return Ok(RunState::Exiting);
        }
        match response.redraw {
            Redraw::None => Ok(RunState::AwaitingInput),
            Redraw::Line => {
                self.renderer
                    .redraw_line(console, &self.entries, self.selected, true)?;
                Ok(RunState::AwaitingInput)
            }
            Redraw::Full => Ok(RunState::Rendering),
        }
    }

    fn handle_pointer(
        &mut self,
        event: PointerEvent,
        console: &mut dyn Console,
        input: &mut dyn InputSource,
    ) -> Result<RunState> {
        let hit = self.renderer.hit_test(event.x, event.y);
        match event.kind {
            PointerKind::Click => {
                let Some(index) = hit else {
                    emit_log(
                        LogLevel::Debug,
                        &format!("click at {},{} hit no entry", event.x, event.y),
                    );
                    return Ok(RunState::AwaitingInput);
                };
                self.select(index, console)?;
                self.forward(EntryCommand::Enter, console, input)
            }
            PointerKind::EnterHover => {
                self.hovered = hit;
                if let Some(index) = hit.filter(|_| self.options.select_on_hover) {
                    self.select(index, console)?;
                }
                Ok(RunState::AwaitingInput)
            }
            PointerKind::LeaveHover => {
                if hit.is_none() || hit == self.hovered {
                    self.hovered = None;
                }
                Ok(RunState::AwaitingInput)
            }
        }
    }

    // ============================================
    // Standard I/O
    // ============================================

    /// Run on the controlling terminal: raw mode, stdout, stdin and mouse
    /// reporting.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus failures entering raw mode.
    pub fn run_stdio(&mut self) -> Result<()> {
        let mut terminal = Terminal::new(io::stdout());
        terminal.enter_raw_mode()?;
        terminal.enable_mouse()?;
        let mut input = ReaderInput::new(io::stdin());
        let result = self.run(&mut terminal, &mut input);
        let restored = terminal.cleanup();
        result.and(restored.map_err(Error::from))
    }

    /// Like [`run_stdio`](Self::run_stdio), with a pointer device polled on
    /// its own thread instead of terminal mouse reporting.
    ///
    /// `poll` returns the device's next `(x, y, kind)` report, if any.
    ///
    /// # Errors
    ///
    /// As [`run_stdio`](Self::run_stdio), plus failures spawning threads.
    pub fn run_stdio_with_pointer<F>(&mut self, poll: F) -> Result<()>
    where
        F: FnMut() -> Option<RawPointer> + Send + 'static,
    {
        let mut terminal = Terminal::new(io::stdout());
        terminal.enter_raw_mode()?;

        let (tx, mut input) = ChannelInput::channel();
        let pump = InputPump::start(io::stdin(), tx.clone())?;
        let pointer = PointerEventSource::start(tx, poll)?;

        let result = self.run(&mut terminal, &mut input);

        pointer.stop();
        pump.stop();
        let restored = terminal.cleanup();
        result.and(restored.map_err(Error::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::binding;
    use crate::input::{Event, KeyCode, KeyEvent};
    use std::collections::VecDeque;

    struct Script(VecDeque<Event>);

    impl InputSource for Script {
        fn read_event(&mut self) -> Result<Event> {
            self.0.pop_front().ok_or(Error::InputClosed)
        }
    }

    fn keys(codes: &[KeyCode]) -> Script {
        Script(codes.iter().map(|&c| KeyEvent::key(c).into()).collect())
    }

    fn labels(n: usize) -> Menu {
        let mut menu = Menu::with_options("T", MenuOptions::default().with_quit_entry(false));
        menu.extend((0..n).map(|i| Entry::label(format!("e{i}"))));
        menu
    }

    // ============================================
    // Entry Management
    // ============================================

    #[test]
    fn test_add_entry_assigns_positions() {
        let mut menu = labels(0);
        assert_eq!(menu.add_entry(Entry::label("a")), 0);
        assert_eq!(menu.add_entry(Entry::label("b")), 1);
        assert_eq!(menu.entry(1).unwrap().index(), 1);
        assert_eq!(menu.len(), 2);
    }

    #[test]
    fn test_remove_reindexes_and_clamps_selection() {
        let mut menu = labels(5);
        menu.selected = 4;
        let removed = menu.remove_entry(2).unwrap();
        assert_eq!(removed.name(), "e2");
        let indices: Vec<usize> = menu.entries().map(Entry::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(menu.selected_index(), 3);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut menu = labels(2);
        assert!(matches!(
            menu.remove_entry(2),
            Err(Error::OutOfRange { position: 2, len: 2 })
        ));
    }

    #[test]
    fn test_replace_last_entry() {
        let mut menu = labels(3);
        let old = menu.replace_entry(2, Entry::label("new")).unwrap();
        assert_eq!(old.name(), "e2");
        assert_eq!(menu.entry(2).unwrap().name(), "new");
        assert_eq!(menu.entry(2).unwrap().index(), 2);
        assert!(menu.replace_entry(3, Entry::label("x")).is_err());
    }

    #[test]
    fn test_remove_where_and_clear() {
        let mut menu = labels(3);
        assert!(menu.remove_where(|e| e.name() == "e1").is_some());
        assert!(menu.remove_where(|e| e.name() == "zz").is_none());
        assert_eq!(menu.entry(1).unwrap().name(), "e2");

        menu.selected = 1;
        menu.clear_entries();
        assert!(menu.is_empty());
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn test_entry_mut_renames() {
        let mut menu = labels(1);
        menu.entry_mut(0).unwrap().set_name("renamed");
        assert_eq!(menu.entry(0).unwrap().name(), "renamed");
        assert!(menu.entry_mut(1).is_err());
    }

    // ============================================
    // Run Loop
    // ============================================

    #[test]
    fn test_quit_entry_installed_once() {
        let mut menu = Menu::new("Main");
        let mut console = Terminal::headless(Vec::new(), 40, 10);
        menu.run(&mut console, &mut keys(&[KeyCode::Enter])).unwrap();
        menu.run(&mut console, &mut keys(&[KeyCode::Enter])).unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.entry(0).unwrap().name(), "Quit");

        menu.remove_entry(0).unwrap();
        let err = menu.run(&mut console, &mut keys(&[])).unwrap_err();
        assert!(matches!(err, Error::InputClosed));
        assert!(menu.is_empty());
    }

    #[test]
    fn test_custom_quit_label() {
        let mut menu = Menu::with_options("Sub", MenuOptions::default().with_quit_label("Back"));
        let mut console = Terminal::headless(Vec::new(), 40, 10);
        menu.run(&mut console, &mut keys(&[KeyCode::Enter])).unwrap();
        assert_eq!(menu.entry(0).unwrap().name(), "Back");
    }

    #[test]
    fn test_navigation_clamps() {
        let flag = binding(false);
        let mut menu = Menu::new("Main");
        menu.add_entry(Entry::toggle("a", &flag));
        let mut console = Terminal::headless(Vec::new(), 40, 10);
        // Up at the top and Down past the quit entry are no-ops
        let mut input = keys(&[
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Enter,
        ]);
        menu.run(&mut console, &mut input).unwrap();
        assert!(!flag.get());
        assert!(!menu.is_running());
        assert_eq!(menu.selected_index(), 1);
    }

    #[test]
    fn test_selection_resets_each_run() {
        let mut menu = labels(3);
        menu.add_entry(Entry::quit("Quit"));
        let mut console = Terminal::headless(Vec::new(), 40, 10);
        let mut input = keys(&[KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        menu.run(&mut console, &mut input).unwrap();
        assert_eq!(menu.selected_index(), 3);

        let err = menu.run(&mut console, &mut keys(&[])).unwrap_err();
        assert!(matches!(err, Error::InputClosed));
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn test_run_on_empty_menu_ignores_commands() {
        let mut menu = labels(0);
        let mut console = Terminal::headless(Vec::new(), 20, 5);
        let mut input = keys(&[KeyCode::Down, KeyCode::Enter, KeyCode::Left, KeyCode::Tab]);
        assert!(matches!(
            menu.run(&mut console, &mut input),
            Err(Error::InputClosed)
        ));
        assert_eq!(menu.render_stats().full_redraws, 1);
    }

    #[test]
    fn test_exit_clears_and_shows_cursor() {
        let mut menu = Menu::new("Main");
        let mut console = Terminal::headless(Vec::new(), 40, 10);
        menu.run(&mut console, &mut keys(&[KeyCode::Enter])).unwrap();
        let out = String::from_utf8_lossy(console.writer()).into_owned();
        assert!(out.ends_with("\x1b[2J\x1b[H\x1b[?25h"), "got {out:?}");
        assert!(console.cursor().visible);
    }

    #[test]
    fn test_debug_output() {
        let menu = labels(1);
        let debug = format!("{menu:?}");
        assert!(debug.contains("title: \"T\""));
        assert!(debug.contains(".."));
    }
}
