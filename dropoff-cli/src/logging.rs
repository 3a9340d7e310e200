//! Logger installation for the `dropoff` binary.

use std::io::Write;

use env_logger::{Builder, Env, Target, WriteStyle, fmt::Formatter};
use log::{Level, LevelFilter};

use crate::CliError;

/// Install an `env_logger` backend writing to stderr.
///
/// `RUST_LOG` selects the filter and defaults to `warn`; `verbose` raises the
/// crate-wide level to `debug` regardless.
pub(crate) fn init_logger(verbose: bool) -> Result<(), CliError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        });
    builder.try_init().map_err(CliError::from)
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
