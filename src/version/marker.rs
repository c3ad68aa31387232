//! Installed-version marker files
//!
//! A marker file holds one decimal integer on its first line recording the version of
//! an installed artifact. Reading is advisory and never fails; writing is not.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::version::error::VersionError;

/// Returned by [`read_version`] when no version is recorded.
///
/// Distinct from [`NO_VERSION`](crate::version::codec::NO_VERSION): callers compare
/// against each sentinel per call site, so the two are kept apart.
pub const MISSING_MARKER: i64 = -1;

/// Read the version recorded in the marker file at `path`.
///
/// Returns [`MISSING_MARKER`] if the file is missing, unreadable, blank, or its first
/// line is not an integer.
pub fn read_version(path: &Path) -> i64 {
    match read_first_line(path) {
        Ok(Some(line)) => match line.parse::<i64>() {
            Ok(version) => version,
            Err(e) => {
                info!("Unable to read version file {:?}: '{}': {}", path, line, e);
                MISSING_MARKER
            }
        },
        Ok(None) => {
            info!("Version file {:?} is blank", path);
            MISSING_MARKER
        }
        Err(e) => {
            info!("Unable to read version file: {}", e);
            MISSING_MARKER
        }
    }
}

/// Overwrite the marker file at `path` with `version`.
pub fn write_version(path: &Path, version: i64) -> Result<(), VersionError> {
    let file = File::create(path).map_err(|e| VersionError::io(path, e))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{version}").map_err(|e| VersionError::io(path, e))?;
    out.flush().map_err(|e| VersionError::io(path, e))?;

    debug!("Wrote version {} to {:?}", version, path);
    Ok(())
}

/// First line of the file, trimmed, or `None` if it is empty or whitespace.
fn read_first_line(path: &Path) -> Result<Option<String>, VersionError> {
    let file = File::open(path).map_err(|e| VersionError::io(path, e))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| VersionError::io(path, e))?;

    let line = line.trim();
    Ok((!line.is_empty()).then(|| line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    #[case("42\n", 42)]
    #[case("42", 42)]
    #[case("  42  \n", 42)]
    #[case("0\n", 0)]
    #[case("20240101\nignored\n", 20240101)]
    #[case("-7\n", -7)]
    fn read_version_parses_first_line(#[case] content: &str, #[case] expected: i64) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("version.txt");
        fs::write(&path, content).unwrap();

        assert_eq!(read_version(&path), expected);
    }

    #[rstest]
    #[case("")]
    #[case("\n")]
    #[case("   \n42\n")] // only the first line counts
    #[case("abc\n")]
    #[case("1.2.3\n")]
    #[case("99999999999999999999\n")] // out of i64 range
    fn read_version_returns_missing_marker_for_blank_or_malformed(#[case] content: &str) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("version.txt");
        fs::write(&path, content).unwrap();

        assert_eq!(read_version(&path), MISSING_MARKER);
    }

    #[test]
    fn read_version_returns_missing_marker_when_file_does_not_exist() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.txt");

        assert_eq!(read_version(&path), MISSING_MARKER);
    }

    #[test]
    fn read_version_returns_missing_marker_for_directory() {
        let temp_dir = TempDir::new().unwrap();

        assert_eq!(read_version(temp_dir.path()), MISSING_MARKER);
    }

    #[test]
    fn write_version_overwrites_with_single_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("version.txt");
        fs::write(&path, "12345678\nstale\n").unwrap();

        write_version(&path, 43).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "43\n");
    }

    #[test]
    fn write_version_fails_when_parent_is_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("version.txt");

        let result = write_version(&path, 1);

        assert!(matches!(result, Err(VersionError::Io { .. })));
    }
}
