//! Version schemes and their ordering
//!
//! Every source stamps its files with versions of a single scheme. Versions are
//! only ever compared within that scheme.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use semver::Version;

/// Canonical format of date versions
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How a source's version identifiers are parsed and ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionScheme {
    /// Calendar dates in `YYYY-MM-DD` form
    Date,
    /// Dotted-numeric versions, optionally `v`-prefixed (`33`, `5.1`, `v1.2.3-rc.1`)
    Semantic,
}

/// A version identifier parsed under its scheme
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParsedVersion {
    Date(NaiveDate),
    Semantic(Version),
}

impl VersionScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionScheme::Date => "date",
            VersionScheme::Semantic => "semantic",
        }
    }

    /// Parse a version identifier, returning `None` if it is malformed.
    pub fn parse(&self, version: &str) -> Option<ParsedVersion> {
        match self {
            VersionScheme::Date => parse_date(version).map(ParsedVersion::Date),
            VersionScheme::Semantic => {
                parse_version(normalize_version(version)).map(ParsedVersion::Semantic)
            }
        }
    }

    pub fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_some()
    }

    /// Compare two versions, or `None` if either one is malformed.
    pub fn compare(&self, a: &str, b: &str) -> Option<Ordering> {
        Some(self.parse(a)?.cmp(&self.parse(b)?))
    }
}

impl fmt::Display for VersionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip a leading `v` from a version string.
pub fn normalize_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// Does NOT strip 'v' prefix (use `normalize_version` first if needed).
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    // Pad only the release part so "1-rc.1" becomes "1.0.0-rc.1"
    let (release, rest) = match version.find(['-', '+']) {
        Some(idx) => version.split_at(idx),
        None => (version, ""),
    };
    let parts: Vec<&str> = release.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0{}", parts[0], rest),
        2 => format!("{}.{}.0{}", parts[0], parts[1], rest),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Parse a canonical `YYYY-MM-DD` date.
///
/// Non-canonical spellings such as `2023-9-1` are rejected so that every date
/// has exactly one string form.
pub fn parse_date(version: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(version, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == version)
}
