//! Logging setup: env_logger behind the `log` facade, routed through
//! indicatif when a spinner is on screen.

use indicatif::MultiProgress;

/// Crates whose info-level chatter drowns the harvest log.
const NOISY_MODULES: &[&str] = &["mongodb", "hyper", "hyper_util", "reqwest", "rustls"];

fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

fn level_color(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "\x1b[31m",
        log::Level::Warn => "\x1b[33m",
        log::Level::Info => "\x1b[32m",
        log::Level::Debug => "\x1b[36m",
        log::Level::Trace => "\x1b[35m",
    }
}

/// Logger that prints through indicatif MultiProgress to avoid mixing with progress bars.
pub struct IndicatifLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl IndicatifLogger {
    pub fn new(inner: env_logger::Logger, multi: MultiProgress) -> Self {
        Self { inner, multi }
    }
}

impl log::Log for IndicatifLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            let line = format!(
                "[{}{}\x1b[0m] {}",
                level_color(record.level()),
                level_label(record.level()),
                record.args()
            );
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

fn builder(debug: bool) -> env_logger::Builder {
    let default_level = if debug { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if std::env::var_os("RUST_LOG").is_none() {
        for module in NOISY_MODULES {
            builder.filter_module(module, log::LevelFilter::Warn);
        }
    }
    builder
}

/// Initialize logging.
///
/// With `multi` (TTY), lines are printed above the progress display in color;
/// otherwise plain `[LEVEL] message` lines for log aggregation.
/// `RUST_LOG` always wins over the defaults.
pub fn init_logging(debug: bool, multi: Option<&MultiProgress>) {
    use std::io::Write;

    let mut builder = builder(debug);
    if let Some(multi) = multi {
        let logger = builder.build();
        let max_level = logger.filter();
        if log::set_boxed_logger(Box::new(IndicatifLogger::new(logger, multi.clone()))).is_ok() {
            log::set_max_level(max_level);
        }
    } else {
        builder
            .format(|buf, record| writeln!(buf, "[{}] {}", level_label(record.level()), record.args()))
            .init();
    }
}
