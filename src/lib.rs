//! `dynmenu` - Interactive terminal menus
//!
//! A navigation and rendering state machine for terminal menus: a list of
//! selectable entries with toggles, counters, actions and nested submenus,
//! redrawn incrementally as the selection moves and fully when the
//! terminal is resized.
//!
//! # Example
//!
//! ```no_run
//! use dynmenu::{Entry, Menu, binding};
//!
//! let fast = binding(false);
//! let retries = binding(3);
//!
//! let advanced = Menu::new("Advanced").into_handle();
//! advanced
//!     .borrow_mut()
//!     .add_entry(Entry::counter("Retries", &retries));
//!
//! let mut menu = Menu::new("Settings");
//! menu.add_entry(Entry::toggle("Fast mode", &fast));
//! menu.add_entry(Entry::submenu("Advanced", &advanced));
//! menu.add_entry(Entry::action("Reset", move || retries.set(3)));
//! menu.run_stdio()?;
//! # Ok::<(), dynmenu::Error>(())
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow MenuOptions, EntryKind etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod color;
pub mod entry;
pub mod error;
pub mod event;
pub mod input;
pub mod menu;
pub mod position;
pub mod renderer;
pub mod terminal;
pub mod unicode;

// Re-export core types at crate root
pub use entry::{Binding, Entry, EntryKind, binding};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use menu::{Menu, MenuHandle, MenuOptions, RunState};
pub use position::{PositionIndex, Positioned};

// Re-export input types
pub use input::{Command, Event, InputParser, InputSource, KeyCode, KeyEvent, PointerEvent, PointerKind};

// Re-export rendering collaborators
pub use color::{AnsiColors, ColorFormatter, ColorMode, NoColors, Rgb};
pub use renderer::{BannerTitle, PlainTitle, TitleRenderer, Viewport};
pub use terminal::{Console, RawModeGuard, Terminal, enable_raw_mode, is_tty, terminal_size};
pub use unicode::{WidthMethod, set_width_method};
