use log::{Level, LevelFilter, Log, Metadata, Record};

pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        println!("Verbose: {}", msg);
    }
}

/// Writes `log` records to stderr, prefixed the same way as the CLI's own messages.
///
/// Filtering follows `log::max_level()`, which `init_logging` sets.
pub struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl StderrLogger {
    pub fn format(record: &Record) -> String {
        let prefix = match record.level() {
            Level::Error => "Error",
            Level::Warn => "Warning",
            Level::Info => "Info",
            Level::Debug | Level::Trace => "Verbose",
        };
        format!("{}: {}", prefix, record.args())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {}
}

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger and set the level.
///
/// The logger is installed once; later calls only change the level.
pub fn init_logging(verbose: bool) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("Logger already installed");
    }
    log::set_max_level(level_for(verbose));
}
