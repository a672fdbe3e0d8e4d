//! Sets up the `log` backend for the binary.

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use std::fs::OpenOptions;

use crate::config::STDOUT_LOGGER;
use crate::errors::QueryResult;

/// Builds the logger for a level and a destination, `stdout` or a file that is appended to.
pub fn logger_builder(level: LevelFilter, filename: &str) -> QueryResult<Builder> {
    let mut builder = Builder::new();
    builder.filter_level(level);
    if filename == STDOUT_LOGGER {
        builder.target(Target::Stdout);
    } else {
        let file = OpenOptions::new().create(true).append(true).open(filename)?;
        builder
            .target(Target::Pipe(Box::new(file)))
            .write_style(WriteStyle::Never);
    }
    Ok(builder)
}

/// Installs the global logger. Fails if one is already installed.
pub fn init_logger(level: LevelFilter, filename: &str) -> QueryResult<()> {
    logger_builder(level, filename)?.try_init()?;
    Ok(())
}
