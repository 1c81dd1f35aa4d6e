//! Logger setup for the binaries.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start logging to stderr at `info`, or `debug` when verbose.
///
/// `RUST_LOG` takes precedence over both. Keep the returned handle alive for
/// the lifetime of the program.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    let level = if verbose { "debug" } else { "info" };
    Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}
