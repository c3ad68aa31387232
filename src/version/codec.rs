//! Pattern-driven version encoding
//!
//! A version string is turned into a single `i64` by walking the capturing groups of a
//! caller-supplied pattern, most significant group first, and packing each segment in
//! base 100:
//!
//! ```text
//! (\d+)\.(\d+)\.(\d+)   "11.0.8"   ->   11 * 100 * 100 + 0 * 100 + 8 = 110008
//! ```
//!
//! # Segment range
//!
//! Every segment is assumed to fit in `0..=99`. A larger segment spills into the digits
//! of the more significant one and the ordering between versions is no longer reliable.
//! Marker files written by earlier installs hold values packed this way, so the scheme
//! must stay base 100 for stored values to remain comparable. Very deep versions wrap
//! silently once the product leaves the `i64` range; bounding the depth is up to the
//! pattern author.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use tracing::debug;

use crate::version::error::VersionError;

/// Returned when the text does not match or no version could be derived.
pub const NO_VERSION: i64 = 0;

/// Multiplier applied per segment.
const SEGMENT_BASE: i64 = 100;

/// A compiled version pattern whose capturing groups are the version segments.
///
/// The pattern must match the whole input; it is anchored on construction so
/// `"1.2.3-beta"` does not match `(\d+)\.(\d+)\.(\d+)`. The shorthand classes `\d`,
/// `\w` and `\s` (and their negations) match ASCII only, so `"1.\u{0663}"` is not a
/// version.
#[derive(Debug, Clone)]
pub struct VersionPattern {
    source: String,
    regex: Regex,
}

impl VersionPattern {
    pub fn new(pattern: &str) -> Result<Self, VersionError> {
        let regex = Regex::new(&format!("^(?:{})$", ascii_classes(pattern)))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as supplied by the caller, without the added anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of capturing groups, i.e. the number of encoded segments.
    pub fn segment_count(&self) -> usize {
        self.regex.captures_len() - 1
    }
}

impl FromStr for VersionPattern {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for VersionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Replace the Unicode-aware shorthand classes with their ASCII equivalents.
///
/// Other escapes are copied through untouched, so `\\d` stays a literal backslash
/// followed by `d`. The replacements are bracketed classes, which the regex syntax also
/// accepts nested inside another class.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('d') => out.push_str("[0-9]"),
            Some('D') => out.push_str("[^0-9]"),
            Some('w') => out.push_str("[0-9A-Za-z_]"),
            Some('W') => out.push_str("[^0-9A-Za-z_]"),
            Some('s') => out.push_str(r"[\t\n\x0B\f\r ]"),
            Some('S') => out.push_str(r"[^\t\n\x0B\f\r ]"),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Accumulate the decimal digits of `text`, skipping anything else.
///
/// `"45"` -> 45, `"_45"` -> 45, `"1a2"` -> 12, `""` -> 0.
pub fn parse_segment(text: &str) -> i64 {
    text.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0i64, |value, digit| {
            value.wrapping_mul(10).wrapping_add(i64::from(digit))
        })
}

/// Encode `text` with `pattern` into an ordered integer.
///
/// Groups that did not participate in the match count as 0. Returns [`NO_VERSION`] when
/// the whole of `text` does not match.
pub fn encode(pattern: &VersionPattern, text: &str) -> i64 {
    let Some(captures) = pattern.regex.captures(text) else {
        debug!("'{}' does not match version pattern '{}'", text, pattern);
        return NO_VERSION;
    };

    (1..captures.len()).fold(0i64, |version, group| {
        let value = captures.get(group).map_or(0, |m| parse_segment(m.as_str()));
        version.wrapping_mul(SEGMENT_BASE).wrapping_add(value)
    })
}

/// Compile `pattern` and encode `text` with it.
pub fn encode_with(pattern: &str, text: &str) -> Result<i64, VersionError> {
    let pattern = VersionPattern::new(pattern)?;
    Ok(encode(&pattern, text))
}
