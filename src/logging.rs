//! Tracing setup for applications embedding the event store.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "evently=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, or `evently=info`
/// when unset.
///
/// Returns false if a global subscriber was already installed, so calling
/// this from several entry points is harmless.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
