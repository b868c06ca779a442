//! Route library log messages into `tracing` for test output.

use dynmenu::event::{LogLevel, set_log_callback};
use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .try_init();

        set_log_callback(|level, message| match level {
            LogLevel::Debug => tracing::debug!(target: "dynmenu", "{message}"),
            LogLevel::Info => tracing::info!(target: "dynmenu", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "dynmenu", "{message}"),
            LogLevel::Error => tracing::error!(target: "dynmenu", "{message}"),
        });
    });
}
