//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging; `RUST_LOG` overrides the default filter.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env = Env::default().default_filter_or(level);
    // A logger may already be installed when embedded.
    let _ = env_logger::Builder::from_env(env).try_init();
}
