//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "norpie";
const APPLICATION: &str = "artworks";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/artworks` or `~/.cache/artworks`
/// - macOS: `~/Library/Caches/dev.norpie.artworks`
/// - Windows: `C:\Users\<User>\AppData\Local\norpie\artworks\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/artworks` or `~/.config/artworks`
/// - macOS: `~/Library/Application Support/dev.norpie.artworks`
/// - Windows: `C:\Users\<User>\AppData\Roaming\norpie\artworks\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the user-level environment file.
pub fn env_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("artworks.env"))
}

/// Rotating set of session logs in one directory.
///
/// The running session writes `latest.log`. At startup the previous session's
/// file is renamed to `artworks-<timestamp>.log` and all but the newest
/// `keep` archives are removed. Other files in the directory are never touched.
#[derive(Debug, Clone)]
pub struct LogDir {
    dir: PathBuf,
    keep: usize,
}

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "artworks-";
const ARCHIVE_SUFFIX: &str = ".log";
const ARCHIVES_KEPT: usize = 25;

impl LogDir {
    /// Log directory under the user cache dir, if it can be determined.
    pub fn user() -> Option<Self> {
        cache_dir().map(|dir| Self::new(dir, ARCHIVES_KEPT))
    }

    pub fn new(dir: impl Into<PathBuf>, keep: usize) -> Self {
        Self {
            dir: dir.into(),
            keep,
        }
    }

    pub fn latest(&self) -> PathBuf {
        self.dir.join(LATEST_LOG)
    }

    /// Archives the previous session log, prunes old archives and creates a
    /// fresh `latest.log`.
    pub fn start_session(&self) -> io::Result<File> {
        fs::create_dir_all(&self.dir)?;
        self.archive_latest()?;
        self.prune()?;
        File::create(self.latest())
    }

    /// Renames `latest.log` to a timestamped archive. Returns the archive path.
    fn archive_latest(&self) -> io::Result<Option<PathBuf>> {
        let latest = self.latest();
        if !latest.exists() {
            return Ok(None);
        }
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        let archive = self
            .dir
            .join(format!("{ARCHIVE_PREFIX}{stamp}{ARCHIVE_SUFFIX}"));
        fs::rename(&latest, &archive)?;
        Ok(Some(archive))
    }

    /// Deletes the oldest archives beyond `keep`. Returns how many were removed.
    fn prune(&self) -> io::Result<usize> {
        let mut archives: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_archive(path))
            .collect();
        if archives.len() <= self.keep {
            return Ok(0);
        }

        // Timestamped names sort chronologically.
        archives.sort();
        let stale = archives.len() - self.keep;
        for path in &archives[..stale] {
            fs::remove_file(path)?;
        }
        Ok(stale)
    }
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(ARCHIVE_SUFFIX))
}
