//! Version encoding for installed artifacts and bundled runtimes
//!
//! Turns version strings into comparable integers and reads/writes the on-disk
//! records a launcher keeps about what is installed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │   Release   │────▶│    Codec    │
//! │ (JVM files) │     │ (encode)    │
//! └─────────────┘     └─────────────┘
//!
//! ┌─────────────┐
//! │   Marker    │  one integer per file
//! │ (read/write)│
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`codec`]: Pattern-driven base-100 version encoding
//! - [`marker`]: Installed-version marker files
//! - [`release`]: JVM `release`, custom runtime and launcher version descriptors
//! - [`error`]: Error types for I/O and pattern compilation
//!
//! # Sentinels
//!
//! Read paths never fail. A marker read with nothing usable yields
//! [`marker::MISSING_MARKER`] (`-1`); encode and release reads yield
//! [`codec::NO_VERSION`] (`0`).

pub mod codec;
pub mod error;
pub mod marker;
pub mod release;

pub use codec::{NO_VERSION, VersionPattern, encode, encode_with, parse_segment};
pub use error::VersionError;
pub use marker::{MISSING_MARKER, read_version, write_version};
pub use release::{
    read_custom_jvm_version, read_launcher_version, read_release_version,
    read_release_version_with_key,
};
