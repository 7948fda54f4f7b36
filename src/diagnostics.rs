//! Logging helpers shared by the library and the host binary.

use std::fmt::Display;
use std::str::FromStr;

use log::LevelFilter;

/// Install `env_logger` with the requested level; `RUST_LOG` still applies on top.
///
/// An unknown level name falls back to `warn`.
pub fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::new()
        .filter_level(filter)
        .parse_env(env_logger::Env::default())
        .try_init()
        .ok();
}

/// Non-fatal problem worth surfacing to the user.
pub fn warn(msg: impl Display) {
    log::warn!("{msg}");
}

/// Prefix used for errors reported by the host binary.
pub fn error_message(msg: impl Display) -> String {
    format!("darknet-graph: {msg}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_can_be_initialized_twice() {
        init_logger("debug");
        init_logger("not-a-level");
        assert!(error_message("boom").ends_with("boom"));
    }
}
