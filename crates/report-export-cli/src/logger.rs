use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};

/// Writes log records to stderr, leaving stdout for command output
#[derive(Clone, Copy)]
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Level for `-v` / `-q` flags: warnings by default
    pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::Error;
        }
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(self.level);
        Ok(())
    }

    fn format(timestamp: DateTime<Local>, level: Level, target: &str, message: &str) -> String {
        format!(
            "{} {:<5} [{}] {}",
            timestamp.format("%H:%M:%S%.3f"),
            level,
            target,
            message
        )
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = Self::format(
                Local::now(),
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
            eprintln!("{}", line);
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use log::Log;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(ConsoleLogger::level_for(0, false), LevelFilter::Warn);
        assert_eq!(ConsoleLogger::level_for(2, false), LevelFilter::Debug);
        assert_eq!(ConsoleLogger::level_for(2, true), LevelFilter::Error);
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ConsoleLogger::new(LevelFilter::Info);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn test_format_line() {
        let timestamp = Local.with_ymd_and_hms(2026, 3, 4, 9, 5, 7).unwrap();
        let line = ConsoleLogger::format(timestamp, Level::Warn, "snapshot_layout", "Capture failed");
        assert_eq!(line, "09:05:07.000 WARN  [snapshot_layout] Capture failed");
    }
}
