use crate::config::{self, ENV};
#[cfg(feature = "colored-term")]
use colored::{Color, ColoredString, Colorize};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::str::FromStr;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// A simple [`log`] implimentation printing `[level] module > message` lines to stdout
pub struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    #[cfg(feature = "colored-term")]
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let color = match record.level() {
                Level::Error => Color::BrightRed,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Cyan,
                Level::Debug => Color::Magenta,
                Level::Trace => Color::Blue,
            };
            let args = format!("{}", record.args());
            let args = if record.level() == Level::Error {
                // only color error message to make them stand out
                args.color(Color::Red)
            } else {
                ColoredString::from(args.as_str())
            };
            println!(
                "{} {} {} {}",
                level_str(record.level()).color(color),
                record
                    .module_path()
                    .unwrap_or("(unknown module)")
                    .color(color),
                ">".color(color),
                args,
            );
        }
    }

    #[cfg(not(feature = "colored-term"))]
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!(
                "{} {} {} {}",
                level_str(record.level()),
                record.module_path().unwrap_or("(unknown module)"),
                ">",
                record.args(),
            );
        }
    }

    fn flush(&self) {}
}

/// Installs [`ConsoleLogger`] as the global logger. The level is read from the
/// [`ENV::LOG_LEVEL`] environment variable, falling back to [`config::DEFAULT_LOG_LEVEL`].
pub fn init_console_logger() -> Result<LevelFilter, SetLoggerError> {
    let level = std::env::var(ENV::LOG_LEVEL)
        .ok()
        .and_then(|s| LevelFilter::from_str(&s).ok())
        .unwrap_or(config::DEFAULT_LOG_LEVEL);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(level)
}

fn level_str(level: Level) -> &'static str {
    match level {
        Level::Error => "[E]",
        Level::Warn => "[W]",
        Level::Info => "[I]",
        Level::Debug => "[D]",
        Level::Trace => "[T]",
    }
}
