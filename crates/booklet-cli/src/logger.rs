use log::{Level, LevelFilter, Metadata, Record};

/// Minimal stderr logger for the CLI
pub struct StderrLogger {
    max_level: Level,
}

impl StderrLogger {
    pub fn init(verbose: bool) -> Result<(), log::SetLoggerError> {
        let max_level = if verbose { Level::Debug } else { Level::Warn };
        log::set_boxed_logger(Box::new(StderrLogger { max_level }))?;
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{}: {}",
                record.level().to_string().to_lowercase(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
