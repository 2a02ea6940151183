//! Logger bootstrap for the binary.
//!
//! The library only talks to the `log` facade. Here it gets a stderr sink:
//! `warn` by default, `debug` with `--verbose`, and `RUST_LOG` wins over both.

use flexi_logger::{Logger, LoggerHandle};

pub(super) fn level_for(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Start logging to stderr.
///
/// Returns `None` when the logger can't be started; the CLI keeps working
/// without it. The handle must be kept alive for output to be flushed.
pub(super) fn init(verbose: bool) -> Option<LoggerHandle> {
    let started = Logger::try_with_env_or_str(level_for(verbose))
        .and_then(|logger| {
            logger
                .log_to_stderr()
                .format(flexi_logger::default_format)
                .start()
        });

    match started {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Warning: logging disabled: {}", err);
            None
        }
    }
}
