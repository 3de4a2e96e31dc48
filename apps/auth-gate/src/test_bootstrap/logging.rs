#![cfg(test)]

//! Logging for the crate's own unit tests.
//!
//! Installed once by the `ctor` hook in `lib.rs`. Level comes from
//! `TEST_LOG`, then `RUST_LOG`, then `warn`. Security events are warn-level,
//! so `TEST_LOG=info` is only needed to see request logs.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
