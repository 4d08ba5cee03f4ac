//! Source test utilities

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use ontocache::version::filename::FileNaming;
use ontocache::version::scheme::VersionScheme;
use ontocache::{DataSource, DataSourceOptions, RemoteError, RemoteFile, Source};

pub const MONDO: FileNaming = FileNaming::new("mondo", "owl", VersionScheme::Date);

/// Fake source whose latest version can be changed between calls.
///
/// Data files are served from `<base_url>/files/<version>`.
pub struct FakeSource {
    naming: FileNaming,
    base_url: String,
    latest: Mutex<Option<String>>,
    checks: AtomicUsize,
}

impl FakeSource {
    pub fn new(naming: FileNaming, base_url: &str) -> Self {
        Self {
            naming,
            base_url: base_url.to_string(),
            latest: Mutex::new(None),
            checks: AtomicUsize::new(0),
        }
    }

    pub fn with_latest(self, version: &str) -> Self {
        self.set_latest(version);
        self
    }

    pub fn set_latest(&self, version: &str) {
        *self.latest.lock().unwrap() = Some(version.to_string());
    }

    /// Number of times the provider was asked for its latest release
    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for FakeSource {
    fn name(&self) -> &'static str {
        self.naming.stem()
    }

    fn naming(&self) -> FileNaming {
        self.naming
    }

    async fn latest_release(&self) -> Result<RemoteFile, RemoteError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        match self.latest.lock().unwrap().clone() {
            Some(version) => {
                let url = format!("{}/files/{}", self.base_url, version);
                Ok(RemoteFile::new(version, url))
            }
            None => Err(RemoteError::InvalidResponse("no releases".to_string())),
        }
    }
}

/// Create a data source rooted in a fresh temporary directory
pub fn create_test_data_source<S: Source>(source: S) -> (TempDir, DataSource<S>) {
    let temp_dir = TempDir::new().unwrap();
    let data_source = DataSource::new(
        source,
        DataSourceOptions {
            data_dir: Some(temp_dir.path().to_path_buf()),
            silent: true,
        },
    );
    (temp_dir, data_source)
}

/// Write cached files with the given names into `dir`
pub fn seed_cache(dir: &Path, file_names: &[&str]) {
    std::fs::create_dir_all(dir).unwrap();
    for name in file_names {
        std::fs::write(dir.join(name), format!("cached {}", name)).unwrap();
    }
}

/// Sorted names of the files currently in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
