//! Runtime release descriptors
//!
//! A bundled JVM ships a `release` file of `KEY=value` lines. The runtime version is the
//! value of the `JAVA_VERSION=` line, usually quoted:
//!
//! ```text
//! IMPLEMENTOR="Eclipse Adoptium"
//! JAVA_VERSION="17.0.2"
//! ```
//!
//! Launchers may also drop a properties-style descriptor into a runtime they installed;
//! [`read_custom_jvm_version`] reads its raw `JAVA_VERSION` property, and
//! [`read_launcher_version`] reads the launcher build recorded under `conf/`.
//!
//! Files are decoded as UTF-8 line by line; invalid bytes become U+FFFD so one bad line
//! does not hide the entry on another.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{LAUNCHER_VERSION_FILE_NAME, LAUNCHER_VERSION_PROPERTY, RELEASE_VERSION_KEY};
use crate::version::codec::{NO_VERSION, VersionPattern, encode};
use crate::version::error::VersionError;

/// Property consulted in custom runtime descriptors.
const CUSTOM_VERSION_PROPERTY: &str = "JAVA_VERSION";

/// Read the `JAVA_VERSION=` entry of a release file and encode it with `pattern`.
///
/// Returns [`NO_VERSION`] if the file cannot be read, has no such entry, or the value
/// does not match `pattern`.
pub fn read_release_version(path: &Path, pattern: &VersionPattern) -> i64 {
    read_release_version_with_key(path, RELEASE_VERSION_KEY, pattern)
}

/// Same as [`read_release_version`] with a caller-chosen key prefix such as `"JAVA_VERSION="`.
///
/// When the key occurs more than once the last entry wins.
pub fn read_release_version_with_key(path: &Path, key: &str, pattern: &VersionPattern) -> i64 {
    match find_release_value(path, key) {
        Ok(Some(value)) => encode(pattern, &value),
        Ok(None) => {
            info!("No {} line in release file {:?}", key, path);
            NO_VERSION
        }
        Err(e) => {
            warn!("Failed to read version from release file: {}", e);
            NO_VERSION
        }
    }
}

/// Read the raw `JAVA_VERSION` property from a custom runtime descriptor.
///
/// Returns an empty string if the file cannot be read or lacks the property.
///
/// Only the single-line subset of the Java properties format is understood: `=`, `:` or
/// whitespace separators, `#`/`!` comments and backslash-escaped separators in keys.
/// Line continuations (a trailing `\`) and `\uXXXX` escapes are not decoded, and the file
/// is read as UTF-8 rather than ISO-8859-1.
pub fn read_custom_jvm_version(path: &Path) -> String {
    match find_property(path, CUSTOM_VERSION_PROPERTY) {
        Ok(Some(value)) => value,
        Ok(None) => {
            warn!(
                "No {} property in custom version file {:?}",
                CUSTOM_VERSION_PROPERTY, path
            );
            String::new()
        }
        Err(e) => {
            warn!("Failed to read version from custom version file: {}", e);
            String::new()
        }
    }
}

/// Read the launcher version recorded in `<runtime_dir>/conf/launcherVersion.properties`.
///
/// Falls back to the version of this build when the file is absent, unreadable, or has
/// no `launcherVersion` value.
pub fn read_launcher_version(runtime_dir: &Path) -> String {
    let path = runtime_dir.join("conf").join(LAUNCHER_VERSION_FILE_NAME);
    if path.is_file() {
        match find_property(&path, LAUNCHER_VERSION_PROPERTY) {
            Ok(Some(value)) if !value.is_empty() => return value,
            Ok(_) => debug!(
                "No {} property in launcher version file {:?}",
                LAUNCHER_VERSION_PROPERTY, path
            ),
            Err(e) => warn!("Failed to read launcher version: {}", e),
        }
    }
    env!("CARGO_PKG_VERSION").to_string()
}

fn find_release_value(path: &Path, key: &str) -> Result<Option<String>, VersionError> {
    let mut value = None;
    for_each_line(path, |line| {
        if let Some(rest) = line.strip_prefix(key) {
            value = Some(rest.replace('"', " ").trim().to_string());
        }
    })?;
    Ok(value)
}

fn find_property(path: &Path, name: &str) -> Result<Option<String>, VersionError> {
    let mut value = None;
    for_each_line(path, |line| {
        if let Some((key, val)) = split_property(line) {
            if key == name {
                value = Some(val.to_string());
            }
        }
    })?;
    Ok(value)
}

/// Call `f` with every line of the file, without its terminator.
///
/// Invalid UTF-8 is replaced rather than reported.
fn for_each_line(path: &Path, mut f: impl FnMut(&str)) -> Result<(), VersionError> {
    let file = File::open(path).map_err(|e| VersionError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| VersionError::io(path, e))?;
        if read == 0 {
            return Ok(());
        }

        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.strip_suffix('\n').unwrap_or(&decoded);
        let line = line.strip_suffix('\r').unwrap_or(line);
        f(line);
    }
}

/// Split a properties line into key and value.
///
/// The key ends at the first unescaped `=`, `:` or whitespace. Comments (`#`, `!`) and
/// blank lines yield `None`.
fn split_property(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
        return None;
    }

    let mut escaped = false;
    let key_end = line
        .char_indices()
        .find(|&(_, c)| {
            if escaped {
                escaped = false;
                return false;
            }
            if c == '\\' {
                escaped = true;
                return false;
            }
            c == '=' || c == ':' || c.is_whitespace()
        })
        .map_or(line.len(), |(i, _)| i);

    let (key, rest) = line.split_at(key_end);
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);

    Some((key, rest.trim()))
}
