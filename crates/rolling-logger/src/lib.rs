//! Rolling Logger
//!
//! `log` backend that keeps the newest records in a circular buffer and
//! mirrors each record to the browser console on wasm32.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// One captured log record
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// `HH:MM:SS.mmm LEVEL target: message`
    pub fn format_line(&self) -> String {
        format!(
            "{} {:<5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

pub struct RollingLogger {
    level: LevelFilter,
    capacity: usize,
    buffer: Mutex<VecDeque<LogEntry>>,
}

impl RollingLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            capacity: capacity.max(1),
            buffer: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Snapshot of buffered records, oldest first
    pub fn recent(&self) -> Vec<LogEntry> {
        self.buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        while buffer.len() >= self.capacity {
            buffer.pop_front();
        }
        buffer.push_back(entry);
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        write_console(&entry);
        self.push(entry);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(entry: &LogEntry) {
    let line = entry.format_line();
    match entry.level {
        Level::Error => web_sys::console::error_1(&line.into()),
        Level::Warn => web_sys::console::warn_1(&line.into()),
        Level::Info => web_sys::console::info_1(&line.into()),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_entry: &LogEntry) {}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Install the global logger. Fails if another logger is already set.
pub fn init(level: LevelFilter, capacity: usize) -> Result<&'static RollingLogger, SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(logger: &RollingLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("test")
                .args(format_args!("{}", msg))
                .build(),
        );
    }

    #[test]
    fn test_keeps_newest_records() {
        let logger = RollingLogger::new(LevelFilter::Trace, 3);
        for i in 0..5 {
            emit(&logger, Level::Info, &format!("msg {}", i));
        }

        let messages: Vec<_> = logger.recent().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn test_filters_by_level() {
        let logger = RollingLogger::new(LevelFilter::Warn, 10);
        emit(&logger, Level::Debug, "hidden");
        emit(&logger, Level::Error, "shown");

        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].level, Level::Error);
        assert!(recent[0].format_line().ends_with("test: shown"));
    }

    #[test]
    fn test_zero_capacity_still_keeps_one() {
        let logger = RollingLogger::new(LevelFilter::Info, 0);
        emit(&logger, Level::Info, "a");
        emit(&logger, Level::Info, "b");
        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].message, "b");
    }
}
