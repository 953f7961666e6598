// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Link reconciliation.
//!
//! The whole point of dotlink is to make a path in the user's home directory
//! be a symbolic link to a file in the dotfiles repository. The __reconciler__
//! takes a desired pair of source path and link path, looks at what currently
//! occupies the link path, and does the least amount of work needed to make
//! the link path point at the source path.
//!
//! # Decision Policy
//!
//! | Current link path state         | Action                          |
//! |---------------------------------|---------------------------------|
//! | Nothing there                   | Create link                     |
//! | Regular file or empty directory | Remove occupant, create link    |
//! | Symlink pointing elsewhere      | Remove old link, create link    |
//! | Symlink with unreadable target  | Remove old link, create link    |
//! | Symlink pointing at source      | Nothing                         |
//!
//! A directory with anything inside is never removed. Reconciling over it
//! fails, and the directory stays as it was.
//!
//! Reconciliation is idempotent. Running it again right after a successful
//! run never touches the filesystem.
//!
//! # See Also
//!
//! 1. [`LinkFs`]

pub mod fs;

#[cfg(test)]
pub(crate) mod memory;

pub use fs::{LinkFs, StdFs};

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

/// Observed state of a link path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing occupies the link path.
    Absent,

    /// Symbolic link with a readable target.
    Symlink(PathBuf),

    /// Symbolic link whose target could not be read.
    BrokenSymlink,

    /// Regular file or directory occupies the link path.
    Occupied,
}

impl LinkState {
    /// Check if state already satisfies a link to target source path.
    pub fn is_linked_to(&self, source_path: impl AsRef<Path>) -> bool {
        matches!(self, Self::Symlink(target) if target == source_path.as_ref())
    }
}

impl Display for LinkState {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Absent => fmt.write_str("absent"),
            Self::Symlink(target) => write!(fmt, "symlink -> {}", target.display()),
            Self::BrokenSymlink => fmt.write_str("broken symlink"),
            Self::Occupied => fmt.write_str("occupied"),
        }
    }
}

/// What the reconciler ended up doing to a link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Link path was empty, and new link was created.
    Created,

    /// Regular file or empty directory was removed to make room for the link.
    Replaced,

    /// Existing symlink pointed elsewhere, and was pointed at source.
    Relinked,

    /// Link path was already correct.
    Unchanged,
}

impl LinkOutcome {
    /// Check if the filesystem was touched at all.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl Display for LinkOutcome {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(match self {
            Self::Created => "created",
            Self::Replaced => "replaced",
            Self::Relinked => "relinked",
            Self::Unchanged => "unchanged",
        })
    }
}

/// Bring link paths into agreement with their desired source paths.
#[derive(Debug, Default)]
pub struct Reconciler<F = StdFs>
where
    F: LinkFs,
{
    pub(crate) fs: F,
}

impl<F> Reconciler<F>
where
    F: LinkFs,
{
    /// Construct new reconciler over target filesystem capability.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Observe current state of link path without touching it.
    pub fn inspect(&self, link_path: impl AsRef<Path>) -> LinkState {
        let link_path = link_path.as_ref();
        if !self.fs.exists(link_path) {
            return LinkState::Absent;
        }

        if !self.fs.is_symlink(link_path) {
            return LinkState::Occupied;
        }

        match self.fs.read_link(link_path) {
            Ok(target) => LinkState::Symlink(target),
            Err(error) => {
                debug!("cannot read link {:?}: {error}", link_path.display());
                LinkState::BrokenSymlink
            }
        }
    }

    /// Make link path a symbolic link to source path.
    ///
    /// Removes whatever occupies link path if it is not already a link to
    /// source path. Source path is used verbatim as the link target, and is
    /// never checked for existence.
    ///
    /// # Errors
    ///
    /// - Return [`LinkError::Remove`] if current occupant cannot be removed,
    ///   e.g., it is a directory that is not empty.
    /// - Return [`LinkError::Symlink`] if new link cannot be created, e.g.,
    ///   parent directory of link path does not exist.
    #[instrument(skip(self, source_path, link_path), level = "debug")]
    pub fn reconcile(
        &self,
        source_path: impl AsRef<Path>,
        link_path: impl AsRef<Path>,
    ) -> Result<LinkOutcome> {
        let source_path = source_path.as_ref();
        let link_path = link_path.as_ref();

        let outcome = match self.inspect(link_path) {
            LinkState::Absent => LinkOutcome::Created,
            LinkState::Occupied => {
                warn!("remove {:?} to make room for link", link_path.display());
                self.remove(link_path)?;
                LinkOutcome::Replaced
            }
            LinkState::Symlink(target) if target == source_path => {
                debug!(
                    "{:?} already links to {:?}",
                    link_path.display(),
                    source_path.display()
                );
                return Ok(LinkOutcome::Unchanged);
            }
            LinkState::Symlink(_) | LinkState::BrokenSymlink => {
                self.remove(link_path)?;
                LinkOutcome::Relinked
            }
        };

        self.fs
            .symlink(source_path, link_path)
            .map_err(|source| LinkError::Symlink {
                source,
                source_path: source_path.into(),
                link_path: link_path.into(),
            })?;
        info!(
            "{outcome} {:?} -> {:?}",
            link_path.display(),
            source_path.display()
        );

        Ok(outcome)
    }

    fn remove(&self, link_path: &Path) -> Result<()> {
        self.fs.remove(link_path).map_err(|source| LinkError::Remove {
            source,
            path: link_path.into(),
        })
    }
}

/// Link reconciliation error types.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Entry occupying link path cannot be removed.
    #[error("failed to remove {:?}", path.display())]
    Remove {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Symbolic link cannot be created.
    #[error("failed to link {:?} to {:?}", link_path.display(), source_path.display())]
    Symlink {
        #[source]
        source: std::io::Error,
        source_path: PathBuf,
        link_path: PathBuf,
    },
}

/// Friendly result alias :3
pub type Result<T, E = LinkError> = std::result::Result<T, E>;
