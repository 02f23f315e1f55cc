//! Opt-in diagnostic logging
//!
//! The library logs through the `log` facade and never installs a logger on
//! its own. Hosts that have no logger of their own call [`init`] (or
//! `osrmc_enable_logging` from C) once to get `env_logger` output on stderr.

use crate::error::{Error, Result};
use log::LevelFilter;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Parse `error|warn|info|debug|trace|off`, case-insensitively
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| Error::invalid(format!("unknown log level '{}'", level)))
}

/// Install an `env_logger` at `level`
///
/// Only the first call per process has an effect. `RUST_LOG` still refines
/// the filter. If the host already installed another logger this is a no-op.
pub fn init(level: LevelFilter) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level);
        builder.parse_default_env();

        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[osrmc {}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        });

        let _ = builder.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("WARN").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert_eq!(parse_level("loud").unwrap_err().code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(LevelFilter::Warn);
        init(LevelFilter::Trace);
        assert!(INIT_LOGGER.is_completed());
    }
}
