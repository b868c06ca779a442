//! Menu entries.
//!
//! An [`Entry`] is a name plus an [`EntryKind`] carrying only the data that
//! kind needs. Entries hold no reference to the menu that owns them: every
//! render or input call receives geometry and terminal access as arguments.
//!
//! # Line layout
//!
//! With `C` terminal columns and a name `N` columns wide, an unselected line
//! starts with `C/2 - N/2` spaces. A selected line that takes markers starts
//! three columns earlier with `">> "`, so the name itself never moves.
//!
//! | kind      | unselected        | selected                 |
//! |-----------|-------------------|--------------------------|
//! | Label     | `name`            | `name`                   |
//! | Toggle    | `name    [X]`     | `>> name    [X] <<`      |
//! | Counter   | `name    5`       | `name    <5>`            |
//! | Action    | `name`            | `>> name <<`             |
//! | SubMenu   | `name` (gold)     | `>> name <<` (gold)      |
//! | Quit      | `name`            | `>> name <<`             |

mod edit;

use crate::color::{ColorFormatter, Rgb};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::input::InputSource;
use crate::menu::{Menu, MenuHandle};
use crate::position::Positioned;
use crate::renderer::HitArea;
use crate::terminal::Console;
use crate::unicode::{center_offset, display_width, fit_to_width};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

pub use edit::parse_saturating;

/// A value shared between the caller and an entry.
pub type Binding<T> = Rc<Cell<T>>;

/// Create a [`Binding`] holding `value`.
#[must_use]
pub fn binding<T>(value: T) -> Binding<T> {
    Rc::new(Cell::new(value))
}

/// Input forwarded from the run loop to the selected entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryCommand {
    Enter,
    Left,
    Right,
}

/// How much of the screen an entry needs repainted after handling input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Redraw {
    #[default]
    None,
    /// Only the entry's own line.
    Line,
    /// The whole menu.
    Full,
}

/// An entry's answer to one input command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntryResponse {
    /// A bound value changed.
    pub mutated: bool,
    pub redraw: Redraw,
    /// The menu should stop its run loop.
    pub exit: bool,
}

impl EntryResponse {
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn line(mutated: bool) -> Self {
        Self {
            mutated,
            redraw: Redraw::Line,
            exit: false,
        }
    }

    #[must_use]
    pub fn full() -> Self {
        Self {
            mutated: false,
            redraw: Redraw::Full,
            exit: false,
        }
    }

    #[must_use]
    pub fn exit() -> Self {
        Self {
            exit: true,
            ..Self::default()
        }
    }
}

/// What an entry may touch while handling input.
pub struct EntryContext<'a> {
    pub console: &'a mut dyn Console,
    pub input: &'a mut dyn InputSource,
    /// Screen row of the entry's line.
    pub row: u16,
    /// Terminal width.
    pub columns: usize,
}

/// The behavior of an entry.
pub enum EntryKind {
    /// Display-only text.
    Label,
    /// Enter flips the bound flag.
    Toggle(Binding<bool>),
    /// Left/Right step the bound value; Enter opens edit mode.
    Counter(Binding<i32>),
    /// Enter runs the callback on a cleared screen.
    Action(Box<dyn FnMut()>),
    /// Enter runs the linked menu. The link does not keep it alive.
    SubMenu(Weak<RefCell<Menu>>),
    /// Enter stops the owning menu.
    Quit,
}

impl fmt::Debug for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => f.write_str("Label"),
            Self::Toggle(value) => f.debug_tuple("Toggle").field(&value.get()).finish(),
            Self::Counter(value) => f.debug_tuple("Counter").field(&value.get()).finish(),
            Self::Action(_) => f.write_str("Action(..)"),
            Self::SubMenu(link) => f
                .debug_tuple("SubMenu")
                .field(&if link.strong_count() > 0 { "linked" } else { "dangling" })
                .finish(),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

impl EntryKind {
    /// Whether a selected line is framed with `>> ` and ` <<`.
    fn takes_markers(&self) -> bool {
        !matches!(self, Self::Label | Self::Counter(_))
    }

    fn color(&self) -> Option<Rgb> {
        match self {
            Self::SubMenu(_) => Some(Rgb::SUBMENU),
            _ => None,
        }
    }
}

/// One row of a menu.
#[derive(Debug)]
pub struct Entry {
    index: usize,
    name: String,
    kind: EntryKind,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            index: 0,
            name: name.into(),
            kind,
        }
    }

    pub fn label(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Label)
    }

    pub fn toggle(name: impl Into<String>, value: &Binding<bool>) -> Self {
        Self::new(name, EntryKind::Toggle(Rc::clone(value)))
    }

    pub fn counter(name: impl Into<String>, value: &Binding<i32>) -> Self {
        Self::new(name, EntryKind::Counter(Rc::clone(value)))
    }

    pub fn action(name: impl Into<String>, callback: impl FnMut() + 'static) -> Self {
        Self::new(name, EntryKind::Action(Box::new(callback)))
    }

    pub fn submenu(name: impl Into<String>, menu: &MenuHandle) -> Self {
        Self::new(name, EntryKind::SubMenu(Rc::downgrade(menu)))
    }

    pub fn quit(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Quit)
    }

    /// Position in the owning menu.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    /// The entry's line as plain text, exactly `columns` wide.
    #[must_use]
    pub fn render(&self, selected: bool, columns: usize) -> String {
        let name_width = display_width(&self.name);
        let pad = center_offset(columns, name_width);
        let marked = selected && self.kind.takes_markers();

        let mut line = String::with_capacity(pad + self.name.len() + 16);
        if marked {
            line.extend(std::iter::repeat_n(' ', pad.saturating_sub(3)));
            line.push_str(">> ");
        } else {
            line.extend(std::iter::repeat_n(' ', pad));
        }
        line.push_str(&self.name);
        match &self.kind {
            EntryKind::Toggle(value) => {
                line.push_str(if value.get() { "    [X]" } else { "    [ ]" });
            }
            EntryKind::Counter(value) if selected => {
                line.push_str(&format!("    <{}>", value.get()));
            }
            EntryKind::Counter(value) => line.push_str(&format!("    {}", value.get())),
            _ => {}
        }
        if marked {
            line.push_str(" <<");
        }
        fit_to_width(&line, columns)
    }

    /// [`render`](Self::render) with the kind's color applied.
    #[must_use]
    pub fn paint(&self, selected: bool, columns: usize, colors: &dyn ColorFormatter) -> String {
        let line = self.render(selected, columns);
        match self.kind.color() {
            Some(fg) => colors.paint(&line, Some(fg), None),
            None => line,
        }
    }

    /// The cells the entry's text covers on screen row `row`.
    ///
    /// Uses the selected layout, which is the widest, so the area does not
    /// change as selection moves.
    #[must_use]
    pub fn hit_area(&self, columns: usize, row: u16) -> HitArea {
        let line = self.render(true, columns);
        let trimmed = line.trim_start();
        let start = line.len() - trimmed.len();
        let width = display_width(trimmed.trim_end());
        HitArea::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::from(row),
            u32::try_from(width).unwrap_or(u32::MAX),
            1,
        )
    }

    /// Column where a counter's value starts in edit mode.
    #[must_use]
    pub fn edit_column(&self, columns: usize) -> usize {
        let name_width = display_width(&self.name);
        center_offset(columns, name_width) + name_width + 5
    }

    /// Apply one input command.
    ///
    /// # Errors
    ///
    /// Terminal failures, [`Error::InputClosed`] from edit mode, anything a
    /// submenu's run returns, and [`Error::MenuBusy`] when a submenu is
    /// already running further up the stack.
    pub fn handle_input(
        &mut self,
        command: EntryCommand,
        ctx: &mut EntryContext<'_>,
    ) -> Result<EntryResponse> {
        let edit_column = self.edit_column(ctx.columns);
        match (&mut self.kind, command) {
            (EntryKind::Toggle(value), EntryCommand::Enter) => {
                value.set(!value.get());
                Ok(EntryResponse::line(true))
            }
            (EntryKind::Counter(value), EntryCommand::Left) => {
                value.set(value.get().saturating_sub(1));
                Ok(EntryResponse::line(true))
            }
            (EntryKind::Counter(value), EntryCommand::Right) => {
                value.set(value.get().saturating_add(1));
                Ok(EntryResponse::line(true))
            }
            (EntryKind::Counter(value), EntryCommand::Enter) => {
                let column = u16::try_from(edit_column).unwrap_or(u16::MAX);
                let before = value.get();
                if let Some(parsed) = edit::read_value(ctx, column)? {
                    value.set(parsed);
                }
                Ok(EntryResponse::line(value.get() != before))
            }
            (EntryKind::Action(callback), EntryCommand::Enter) => {
                ctx.console.clear()?;
                ctx.console.show_cursor()?;
                ctx.console.flush()?;
                callback();
                Ok(EntryResponse::full())
            }
            (EntryKind::SubMenu(link), EntryCommand::Enter) => {
                let Some(menu) = link.upgrade() else {
                    emit_log(
                        LogLevel::Debug,
                        &format!("submenu behind '{}' no longer exists", self.name),
                    );
                    return Ok(EntryResponse::unchanged());
                };
                let Ok(mut menu) = menu.try_borrow_mut() else {
                    return Err(Error::MenuBusy);
                };
                menu.run(&mut *ctx.console, &mut *ctx.input)?;
                Ok(EntryResponse::full())
            }
            (EntryKind::Quit, EntryCommand::Enter) => Ok(EntryResponse::exit()),
            _ => Ok(EntryResponse::unchanged()),
        }
    }
}

impl Positioned for Entry {
    fn position(&self) -> usize {
        self.index
    }

    fn set_position(&mut self, position: usize) {
        self.index = position;
    }
}
