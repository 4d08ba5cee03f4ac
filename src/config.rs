use std::path::PathBuf;

// =============================================================================
// Environment
// =============================================================================

/// Explicit override for the root data directory
pub const DATA_DIR_ENV: &str = "ONTOCACHE_DIR";

/// Log filter directives for the CLI (e.g. `ontocache=debug`)
pub const LOG_FILTER_ENV: &str = "ONTOCACHE_LOG";

/// Name of the per-application directory under XDG data locations
pub const APP_DIR_NAME: &str = "ontocache";

/// Name of the log file written under the root data directory
pub const LOG_FILE_NAME: &str = "ontocache.log";

// =============================================================================
// HTTP
// =============================================================================

pub const USER_AGENT: &str = concat!("ontocache/", env!("CARGO_PKG_VERSION"));

/// Timeout for establishing a connection (30 seconds)
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Timeout between reads of a response body (2 minutes)
pub const READ_TIMEOUT_SECS: u64 = 120;

/// Returns the root data directory under which every source keeps its files.
///
/// Resolution order:
/// 1. `$ONTOCACHE_DIR`, used as-is
/// 2. `$XDG_DATA_HOME/ontocache`
/// 3. the first entry of `$XDG_DATA_DIRS` whose `ontocache` child is not a regular file
/// 4. `~/.local/share/ontocache`
/// 5. `./ontocache` if no home directory is available
pub fn data_dir() -> PathBuf {
    data_dir_with_env(
        std::env::var(DATA_DIR_ENV).ok(),
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("XDG_DATA_DIRS").ok(),
        dirs::home_dir(),
    )
}

fn data_dir_with_env(
    explicit: Option<String>,
    xdg_data_home: Option<String>,
    xdg_data_dirs: Option<String>,
    home_dir: Option<PathBuf>,
) -> PathBuf {
    // Empty variables count as unset
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

    if let Some(dir) = non_empty(explicit) {
        return PathBuf::from(dir);
    }

    if let Some(dir) = non_empty(xdg_data_home) {
        return PathBuf::from(dir).join(APP_DIR_NAME);
    }

    let from_data_dirs = non_empty(xdg_data_dirs).and_then(|dirs| {
        dirs.split(':')
            .filter(|d| !d.is_empty())
            .map(|d| PathBuf::from(d).join(APP_DIR_NAME))
            .find(|candidate| !candidate.is_file())
    });
    if let Some(dir) = from_data_dirs {
        return dir;
    }

    home_dir
        .map(|home| home.join(".local/share"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
