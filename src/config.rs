// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout of the link mapping file that dotlink uses to decide
//! what gets linked where.
//!
//! # General Layout
//!
//! The link mapping is a flat JSON object. Each key is a source path
//! relative to the source root, and each value is a link name relative to the
//! link root:
//!
//! ```json
//! {
//!     "shell/bashrc": ".bashrc",
//!     "vim/vimrc": ".vimrc"
//! }
//! ```
//!
//! Keys and values are taken verbatim. No attempt is made to validate whether
//! they are safe, relative, or even point at anything.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    fs::read_to_string,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Link mapping layout.
///
/// Maps source paths to link names. Entries are kept sorted by source path
/// so every run walks them in the same order.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LinkMapping(BTreeMap<String, String>);

impl LinkMapping {
    /// Construct new link mapping from source and link name pairs.
    pub fn new(
        entries: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(source, link)| (source.into(), link.into()))
                .collect(),
        )
    }

    /// Load link mapping from file at target path.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::Read`] if file cannot be read.
    /// - Return [`ConfigError::Deserialize`] if file is not a valid link
    ///   mapping.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            source,
            path: path.as_ref().into(),
        })?;

        data.parse()
    }

    /// Iterate through source and link name pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(source, link)| (source.as_str(), link.as_str()))
    }

    /// Number of entries in link mapping.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if link mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for LinkMapping {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(data).map_err(ConfigError::Deserialize)
    }
}

impl Display for LinkMapping {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            serde_json::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )?;
        fmt.write_str("\n")
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Link mapping file cannot be read.
    #[error("failed to read link mapping at {:?}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to deserialize link mapping.
    #[error("invalid link mapping: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// Failed to serialize link mapping.
    #[error(transparent)]
    Serialize(serde_json::Error),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
