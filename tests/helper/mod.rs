//! Shared test utilities

#![allow(dead_code)]

mod logging;

pub use logging::capture_logs;
