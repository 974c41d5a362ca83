use std::{
    fmt,
    io::{self, Write},
};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub struct Entry {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {:<5} {}",
            self.time.format("%b %d %H:%M:%S"),
            self.level,
            self.message
        )
    }
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = Entry {
                time: Local::now(),
                level: record.level(),
                message: record.args().to_string(),
            };
            let _ = writeln!(io::stderr().lock(), "{entry}");
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
