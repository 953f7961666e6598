// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Filesystem access for link reconciliation.
//!
//! The reconciler never touches the filesystem directly. Everything goes
//! through the narrow [`LinkFs`] capability so the decision logic can be
//! driven against something other than the real disk.

use std::{
    fs::{remove_dir, remove_file, symlink_metadata},
    io,
    path::{Path, PathBuf},
};

/// Capability to observe and mutate link state on a filesystem.
///
/// None of these methods follow a symlink sitting at the given path. A
/// dangling symlink still _exists_ as far as this trait is concerned.
pub trait LinkFs {
    /// Check if anything at all occupies target path.
    fn exists(&self, path: &Path) -> bool;

    /// Check if target path is a symbolic link.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Read target of symbolic link at path.
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Remove whatever occupies target path.
    ///
    /// Only empty directories can be removed. A directory with anything in it
    /// is an error, and is left alone. Symbolic links are removed themselves,
    /// never what they point at.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Create symbolic link at `link_path` pointing at `source_path`.
    fn symlink(&self, source_path: &Path, link_path: &Path) -> io::Result<()>;
}

/// Link capability backed by the real filesystem through [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFs;

impl StdFs {
    /// Construct new standard filesystem access.
    pub fn new() -> Self {
        Self
    }
}

impl LinkFs for StdFs {
    fn exists(&self, path: &Path) -> bool {
        symlink_metadata(path).is_ok()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        let meta = symlink_metadata(path)?;
        if meta.is_dir() {
            return remove_dir(path);
        }

        remove_symlink_or_file(path)
    }

    #[cfg(unix)]
    fn symlink(&self, source_path: &Path, link_path: &Path) -> io::Result<()> {
        std::os::unix::fs::symlink(source_path, link_path)
    }

    #[cfg(windows)]
    fn symlink(&self, source_path: &Path, link_path: &Path) -> io::Result<()> {
        use std::os::windows::fs::{symlink_dir, symlink_file};

        // INVARIANT: Windows needs to know the kind of the source up front.
        if source_path.is_dir() {
            symlink_dir(source_path, link_path)
        } else {
            symlink_file(source_path, link_path)
        }
    }
}

#[cfg(unix)]
fn remove_symlink_or_file(path: &Path) -> io::Result<()> {
    remove_file(path)
}

#[cfg(windows)]
fn remove_symlink_or_file(path: &Path) -> io::Result<()> {
    // Directory symlinks on Windows must go through remove_dir.
    remove_file(path).or_else(|_| remove_dir(path))
}
