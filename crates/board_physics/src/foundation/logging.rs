//! Host-side logger setup
//!
//! The kernel only emits through the `log` facade. Hosts call
//! [`init_with_filter`] once at startup.

use log::SetLoggerError;

/// Install `env_logger` with `filter` (`"info"`, `"board_physics=debug"`, ...)
///
/// `RUST_LOG` overrides the filter when set. Fails if a logger is already
/// installed.
pub fn init_with_filter(filter: &str) -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .parse_filters(filter)
        .parse_default_env()
        .try_init()
}
