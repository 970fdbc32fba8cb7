use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. The terminal belongs to the renderer,
/// so nothing is ever written to stdout.
pub struct Logger {
    prefix: Option<String>,
    sink: Mutex<File>,
}

impl Logger {
    fn new(prefix: Option<String>, sink: File) -> Self {
        Self { prefix, sink: Mutex::new(sink) }
    }

    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = match self.prefix {
            Some(ref prefix) => format!("[{}][{}] {}\n", timestamp, prefix, message),
            None => format!("[{}] {}\n", timestamp, message),
        };

        if let Ok(mut sink) = self.sink.lock() {
            // A failed log write must never take the game down
            let _ = sink.write_all(line.as_bytes());
        }
    }
}

/// Opens `path` for appending and installs it as the process logger.
/// Later calls keep the first logger.
pub fn init_logger(path: &Path, prefix: Option<String>) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    LOGGER.get_or_init(|| Logger::new(prefix, file));
    Ok(())
}

pub fn is_enabled() -> bool {
    LOGGER.get().is_some()
}

/// Without an installed logger messages are dropped.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::is_enabled() {
            $crate::logger::log(&format!($($arg)*))
        }
    };
}
