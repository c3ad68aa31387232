//! Version identifier encoding for application launchers
//!
//! Encodes application and runtime version strings into ordered integers and
//! persists the installed version of an artifact in a marker file.

pub mod config;
pub mod logging;
pub mod version;
