//! Shared helpers for the unit tests.

use std::sync::Once;

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        // Read RUST_LOG, default to "debug" for this crate.
        let env = env_logger::Env::default().default_filter_or("cosine_tree=debug");

        let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
    });
}
