#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code, unused_imports)] // Not every test binary uses every helper

pub mod console;
pub mod logging;
pub mod script;

pub use console::ResizableConsole;
pub use logging::init_logging;
pub use script::ScriptedInput;
