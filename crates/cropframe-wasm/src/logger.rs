//! `log` backend that writes to the browser console.
//!
//! The core crate only talks to the `log` facade. This module installs the
//! sink for it when the WASM module starts.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn install(level: LevelFilter) {
    // set_logger fails once a logger exists; the level still applies
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Convert a u8 log level value to a LevelFilter.
///
/// Values:
/// - 0 = Off
/// - 1 = Error
/// - 2 = Warn
/// - 3 = Info
/// - 4 = Debug
/// - 5 = Trace
///
/// Any other value defaults to Warn.
pub(crate) fn level_from_u8(value: u8) -> LevelFilter {
    match value {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        5 => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Set how much of the editor's logging reaches the console.
#[wasm_bindgen]
pub fn set_log_level(level: u8) {
    install(level_from_u8(level));
}
