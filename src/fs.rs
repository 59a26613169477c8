//! The filesystem operations maplink needs, behind a trait so the mapping
//! and linking logic can be exercised without touching disk.

use crate::error::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};

pub trait Filesystem {
    /// Expand a glob pattern into the existing paths it matches, sorted.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn is_symlink(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create a symbolic link at `link` pointing at `original`.
    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let entries = glob::glob(pattern).map_err(|source| Error::GlobPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?);
        }
        paths.sort();
        Ok(paths)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    #[cfg(unix)]
    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
        std::os::unix::fs::symlink(original, link)
    }

    #[cfg(windows)]
    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
        if original.is_dir() {
            std::os::windows::fs::symlink_dir(original, link)
        } else {
            std::os::windows::fs::symlink_file(original, link)
        }
    }
}
