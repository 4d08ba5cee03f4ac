//! Filesystem cache of version-stamped data files
//!
//! Each source owns one directory under the root data directory. The cache has no
//! index: the directory listing is the source of truth, and every file whose name
//! follows the source's [`FileNaming`] is an entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::version::error::SourceError;
use crate::version::filename::FileNaming;

/// One cached data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub source_name: String,
    pub version: String,
    pub path: PathBuf,
}

/// Scanner over a single source's cache directory
#[derive(Debug, Clone)]
pub struct LocalCache {
    source_name: String,
    dir: PathBuf,
    naming: FileNaming,
}

impl LocalCache {
    pub fn new(source_name: &str, dir: PathBuf, naming: FileNaming) -> Self {
        Self {
            source_name: source_name.to_string(),
            dir,
            naming,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn naming(&self) -> FileNaming {
        self.naming
    }

    /// Path a given version is (or would be) stored at
    pub fn path_for(&self, version: &str) -> PathBuf {
        self.dir.join(self.naming.file_name(version))
    }

    /// List all recognized entries, oldest first.
    ///
    /// A missing directory is an empty cache. Files with unrecognized names or
    /// malformed versions are skipped.
    pub fn entries(&self) -> Result<Vec<CacheEntry>, SourceError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Cache directory {:?} does not exist yet", self.dir);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();

        for dir_entry in read_dir {
            let path = dir_entry?.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let Some((version, parsed)) = self.naming.parse(file_name) else {
                debug!("Skipping unrecognized file {:?} in {:?}", file_name, self.dir);
                continue;
            };

            entries.push((
                parsed,
                CacheEntry {
                    source_name: self.source_name.clone(),
                    version: version.to_string(),
                    path,
                },
            ));
        }

        // "1.2" and "1.2.0" are distinct entries of equal rank; the raw string breaks the tie
        entries.sort_by(|(a, a_entry), (b, b_entry)| {
            a.cmp(b).then_with(|| a_entry.version.cmp(&b_entry.version))
        });

        Ok(entries.into_iter().map(|(_, entry)| entry).collect())
    }

    /// Most recent entry, or `None` when there is no local copy.
    pub fn latest(&self) -> Result<Option<CacheEntry>, SourceError> {
        let latest = self.entries()?.pop();
        match &latest {
            Some(entry) => debug!(
                "Most recent local {} file is {:?}",
                self.source_name, entry.path
            ),
            None => debug!("No local {} files in {:?}", self.source_name, self.dir),
        }
        Ok(latest)
    }

    /// Entry for one exact version, if cached.
    pub fn find(&self, version: &str) -> Result<Option<CacheEntry>, SourceError> {
        if !self.naming.scheme().is_valid(version) {
            return Err(SourceError::InvalidVersion {
                version: version.to_string(),
                scheme: self.naming.scheme(),
            });
        }

        let path = self.path_for(version);
        Ok(path.is_file().then(|| CacheEntry {
            source_name: self.source_name.clone(),
            version: version.to_string(),
            path,
        }))
    }

    /// Delete all but the `keep` most recent entries, returning the removed paths.
    ///
    /// Unrecognized files are left alone.
    pub fn prune(&self, keep: usize) -> Result<Vec<PathBuf>, SourceError> {
        let entries = self.entries()?;
        let remove_count = entries.len().saturating_sub(keep);

        let mut removed = Vec::with_capacity(remove_count);
        for entry in entries.into_iter().take(remove_count) {
            fs::remove_file(&entry.path)?;
            info!(
                "Pruned {} version {} ({:?})",
                self.source_name, entry.version, entry.path
            );
            removed.push(entry.path);
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::scheme::VersionScheme;
    use rstest::rstest;
    use tempfile::TempDir;

    const MONDO: FileNaming = FileNaming::new("mondo", "owl", VersionScheme::Date);
    const DRUGBANK: FileNaming = FileNaming::new("drugbank", "csv", VersionScheme::Semantic);

    fn cache_with_files(naming: FileNaming, files: &[&str]) -> (TempDir, LocalCache) {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            fs::write(temp_dir.path().join(file), "data").unwrap();
        }
        let cache = LocalCache::new(naming.stem(), temp_dir.path().to_path_buf(), naming);
        (temp_dir, cache)
    }

    fn versions(entries: &[CacheEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.version.as_str()).collect()
    }

    #[test]
    fn entries_returns_empty_for_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LocalCache::new("mondo", temp_dir.path().join("mondo"), MONDO);

        assert!(cache.entries().unwrap().is_empty());
        assert_eq!(cache.latest().unwrap(), None);
    }

    #[test]
    fn entries_are_sorted_oldest_first() {
        let (_temp_dir, cache) = cache_with_files(
            MONDO,
            &[
                "mondo_v2024-01-03.owl",
                "mondo_v2023-09-12.owl",
                "mondo_v2023-11-30.owl",
            ],
        );

        let entries = cache.entries().unwrap();

        assert_eq!(
            versions(&entries),
            vec!["2023-09-12", "2023-11-30", "2024-01-03"]
        );
        assert!(entries.iter().all(|e| e.source_name == "mondo"));
    }

    #[test]
    fn entries_use_numeric_order_for_semantic_versions() {
        let (_temp_dir, cache) = cache_with_files(
            DRUGBANK,
            &[
                "drugbank_v5.1.10.csv",
                "drugbank_v5.1.9.csv",
                "drugbank_v5.0.12.csv",
            ],
        );

        let latest = cache.latest().unwrap().unwrap();

        assert_eq!(latest.version, "5.1.10");
        assert_eq!(latest.path, cache.dir().join("drugbank_v5.1.10.csv"));
    }

    #[test]
    fn equal_semantic_versions_are_ordered_by_name() {
        let (_temp_dir, cache) = cache_with_files(
            DRUGBANK,
            &["drugbank_v1.2.0.csv", "drugbank_v1.2.csv", "drugbank_vv1.3.csv"],
        );

        let entries = cache.entries().unwrap();

        assert_eq!(versions(&entries), vec!["1.2", "1.2.0"]);
        assert_eq!(cache.latest().unwrap().unwrap().version, "1.2.0");
    }

    #[rstest]
    #[case(&["mondo_vlatest.owl", "mondo.owl", "notes.txt"])]
    #[case(&["mondo_v2023-13-01.owl", ".mondo_v2023-09-12.owl.abc.part"])]
    #[case(&[])]
    fn malformed_names_are_treated_as_empty(#[case] files: &[&str]) {
        let (_temp_dir, cache) = cache_with_files(MONDO, files);

        assert!(cache.entries().unwrap().is_empty());
        assert_eq!(cache.latest().unwrap(), None);
    }

    #[test]
    fn malformed_names_do_not_hide_valid_entries() {
        let (_temp_dir, cache) = cache_with_files(
            MONDO,
            &["mondo_vlatest.owl", "mondo_v2023-09-12.owl", "mondo_v9999.owl"],
        );

        let latest = cache.latest().unwrap().unwrap();
        assert_eq!(latest.version, "2023-09-12");
    }

    #[test]
    fn subdirectories_are_ignored() {
        let (temp_dir, cache) = cache_with_files(MONDO, &["mondo_v2023-09-12.owl"]);
        fs::create_dir(temp_dir.path().join("mondo_v2024-01-01.owl")).unwrap();

        let latest = cache.latest().unwrap().unwrap();
        assert_eq!(latest.version, "2023-09-12");
    }

    #[test]
    fn find_returns_exact_version() {
        let (_temp_dir, cache) =
            cache_with_files(MONDO, &["mondo_v2023-09-12.owl", "mondo_v2024-01-03.owl"]);

        let entry = cache.find("2023-09-12").unwrap().unwrap();
        assert_eq!(entry.path, cache.dir().join("mondo_v2023-09-12.owl"));
        assert_eq!(cache.find("2023-10-01").unwrap(), None);
    }

    #[test]
    fn find_rejects_invalid_version() {
        let (_temp_dir, cache) = cache_with_files(MONDO, &[]);

        let result = cache.find("../escape");
        assert!(matches!(result, Err(SourceError::InvalidVersion { .. })));
    }

    #[test]
    fn prune_keeps_most_recent_entries() {
        let (_temp_dir, cache) = cache_with_files(
            MONDO,
            &[
                "mondo_v2023-09-12.owl",
                "mondo_v2023-11-30.owl",
                "mondo_v2024-01-03.owl",
                "mondo_vlatest.owl",
            ],
        );

        let removed = cache.prune(1).unwrap();

        assert_eq!(
            removed,
            vec![
                cache.dir().join("mondo_v2023-09-12.owl"),
                cache.dir().join("mondo_v2023-11-30.owl"),
            ]
        );
        assert_eq!(versions(&cache.entries().unwrap()), vec!["2024-01-03"]);
        assert!(cache.dir().join("mondo_vlatest.owl").exists());
    }

    #[test]
    fn prune_with_large_keep_removes_nothing() {
        let (_temp_dir, cache) = cache_with_files(MONDO, &["mondo_v2023-09-12.owl"]);

        assert!(cache.prune(5).unwrap().is_empty());
        assert_eq!(cache.entries().unwrap().len(), 1);
    }
}
