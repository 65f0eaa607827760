//! Logger setup for the binary.

use env_logger::{Builder, Env};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Logger builder reading its filter from `env`, falling back to
/// [`DEFAULT_FILTER`]. A filter set in the environment always wins.
pub fn log_builder(env: Env<'_>) -> Builder {
    Builder::from_env(env.default_filter_or(DEFAULT_FILTER))
}
