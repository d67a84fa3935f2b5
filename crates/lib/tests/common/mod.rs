#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup for the `climatechat` integration tests.

use climatechat::ResponseInterpreter;
use dotenvy::dotenv;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// A freshly compiled interpreter.
pub fn interpreter() -> ResponseInterpreter {
    ResponseInterpreter::new().expect("Interpreter patterns should compile")
}
