//! Version-stamped cache file names
//!
//! A cached file is named `<stem>_v<version>.<extension>`, e.g. `mondo_v2023-09-12.owl`.
//! A name is only recognized when its version parses under the source's scheme.

use std::path::Path;

use crate::version::error::SourceError;
use crate::version::scheme::{ParsedVersion, VersionScheme, normalize_version};

/// Separator between the stem and the version
const VERSION_MARKER: &str = "_v";

/// File naming convention of one source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileNaming {
    stem: &'static str,
    extension: &'static str,
    scheme: VersionScheme,
}

impl FileNaming {
    pub const fn new(stem: &'static str, extension: &'static str, scheme: VersionScheme) -> Self {
        Self {
            stem,
            extension,
            scheme,
        }
    }

    pub fn stem(&self) -> &'static str {
        self.stem
    }

    pub fn extension(&self) -> &'static str {
        self.extension
    }

    pub fn scheme(&self) -> VersionScheme {
        self.scheme
    }

    /// Build the file name for a version.
    ///
    /// A leading `v` is dropped since the marker already carries it. The caller is
    /// responsible for passing a version that is valid under the scheme; otherwise
    /// the name will not be recognized by [`FileNaming::parse_version`].
    pub fn file_name(&self, version: &str) -> String {
        format!(
            "{}{}{}.{}",
            self.stem,
            VERSION_MARKER,
            normalize_version(version),
            self.extension
        )
    }

    /// Extract the version from a file name, or `None` if the name doesn't follow
    /// this convention or carries a malformed version.
    pub fn parse_version<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.parse(file_name).map(|(version, _)| version)
    }

    /// Like [`FileNaming::parse_version`], also returning the parsed version for ordering.
    ///
    /// Names produced by [`FileNaming::file_name`] never carry a second `v`, so
    /// `chembl_vv1.2.db` is rejected.
    pub fn parse<'a>(&self, file_name: &'a str) -> Option<(&'a str, ParsedVersion)> {
        let version = file_name
            .strip_prefix(self.stem)?
            .strip_prefix(VERSION_MARKER)?
            .strip_suffix(self.extension)?
            .strip_suffix('.')?;

        if normalize_version(version) != version {
            return None;
        }

        self.scheme.parse(version).map(|parsed| (version, parsed))
    }

    /// Extract the version from a path that is expected to be a cache entry.
    pub fn parse_path(&self, path: &Path) -> Result<String, SourceError> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.parse_version(name))
            .map(str::to_string)
            .ok_or_else(|| SourceError::CorruptCacheEntry(path.to_path_buf()))
    }
}
