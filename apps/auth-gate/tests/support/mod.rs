#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod logging;
pub mod proptest_prelude;

pub use app_builder::{create_test_app, test_security, test_state};
