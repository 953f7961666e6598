// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Link mapping installation.
//!
//! Walks every entry of a [`LinkMapping`], resolves it into an absolute
//! [`LinkPair`] through an [`InstallEnv`], and hands it off to the
//! [`Reconciler`].
//!
//! Entries are processed one at a time. The first entry that fails stops the
//! whole run, and whatever was already linked stays linked.

use crate::{
    config::LinkMapping,
    link::{LinkError, LinkFs, LinkOutcome, LinkState, Reconciler},
};

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};
use tracing::{info, instrument};

/// Directories that link mapping entries are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallEnv {
    /// Directory that source paths are joined onto.
    pub source_root: PathBuf,

    /// Directory that link names are joined onto.
    pub link_root: PathBuf,
}

impl InstallEnv {
    /// Construct new installation environment.
    pub fn new(source_root: impl Into<PathBuf>, link_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            link_root: link_root.into(),
        }
    }

    /// Resolve one link mapping entry into absolute paths.
    pub fn resolve(&self, source: impl AsRef<Path>, link_name: impl AsRef<Path>) -> LinkPair {
        LinkPair {
            source_path: self.source_root.join(source),
            link_path: self.link_root.join(link_name),
        }
    }
}

/// Resolved source path and link path of a mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPair {
    pub source_path: PathBuf,
    pub link_path: PathBuf,
}

impl Display for LinkPair {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(
            fmt,
            "{} -> {}",
            self.link_path.display(),
            self.source_path.display()
        )
    }
}

/// Reconcile every entry of link mapping.
///
/// Returns the outcome for each entry in mapping order.
///
/// # Errors
///
/// - Return [`InstallError::LinkRoot`] if an entry resolves to the link root
///   itself, e.g., an empty link name.
/// - Return [`InstallError::Link`] for first entry that cannot be linked.
#[instrument(skip(env, mapping, reconciler), level = "debug")]
pub fn install<F>(
    env: InstallEnv,
    mapping: &LinkMapping,
    reconciler: &Reconciler<F>,
) -> Result<Vec<(LinkPair, LinkOutcome)>>
where
    F: LinkFs,
{
    info!(
        "link {} entries from {:?} into {:?}",
        mapping.len(),
        env.source_root.display(),
        env.link_root.display()
    );

    let mut report = Vec::with_capacity(mapping.len());
    for (source, link_name) in mapping.iter() {
        let pair = env.resolve(source, link_name);

        // INVARIANT: Never replace the link root itself.
        if pair.link_path == env.link_root {
            return Err(InstallError::LinkRoot {
                entry: source.into(),
                link_root: env.link_root.clone(),
            });
        }

        let outcome = reconciler
            .reconcile(&pair.source_path, &pair.link_path)
            .map_err(|error| InstallError::Link {
                source: error,
                entry: source.into(),
            })?;
        report.push((pair, outcome));
    }

    let changed = report.iter().filter(|(_, outcome)| outcome.is_mutation()).count();
    info!("{changed} of {} links changed", report.len());

    Ok(report)
}

/// Observe current link state of every entry without touching anything.
pub fn status<F>(
    env: InstallEnv,
    mapping: &LinkMapping,
    reconciler: &Reconciler<F>,
) -> Vec<(LinkPair, LinkState)>
where
    F: LinkFs,
{
    mapping
        .iter()
        .map(|(source, link_name)| {
            let pair = env.resolve(source, link_name);
            let state = reconciler.inspect(&pair.link_path);
            (pair, state)
        })
        .collect()
}

/// Installation error types.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// Mapping entry cannot be linked.
    #[error("failed to install entry {entry:?}")]
    Link {
        #[source]
        source: LinkError,
        entry: String,
    },

    /// Mapping entry would turn the link root into a link.
    #[error("entry {entry:?} resolves to link root {:?}", link_root.display())]
    LinkRoot { entry: String, link_root: PathBuf },
}

/// Friendly result alias :3
pub type Result<T, E = InstallError> = std::result::Result<T, E>;
