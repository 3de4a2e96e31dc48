//! Installs test logging once per integration test binary.
//!
//! Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`.

#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    gate_test_support::logging::init();
}
