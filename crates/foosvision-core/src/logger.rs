//! Plain stderr backend for the `log` facade, used by the replay tool.
//!
//! One line per record, `level: message (target)`. No timestamps; replay
//! output is line-oriented JSON on stdout and interleaving clocks into the
//! diagnostics channel just makes diffs noisier.

use std::sync::OnceLock;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger {
    level: LevelFilter,
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "{}: {} ({})",
            level_tag(record.level()),
            record.args(),
            record.target()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the given level filter.
///
/// The first call wins; later calls (and their level) are ignored and return
/// `Ok`, so library consumers that already installed their own `log` backend
/// are unaffected.
pub fn init_with_level(level: LevelFilter) -> Result<(), SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger { level });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::MetadataBuilder;

    #[test]
    fn records_above_the_filter_are_disabled() {
        let logger = StderrLogger {
            level: LevelFilter::Warn,
        };
        let warn = MetadataBuilder::new().level(Level::Warn).build();
        let debug = MetadataBuilder::new().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn repeated_initialization_is_a_no_op() {
        assert!(init_with_level(LevelFilter::Info).is_ok());
        assert!(init_with_level(LevelFilter::Debug).is_ok());
    }
}
