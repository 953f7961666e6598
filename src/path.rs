// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine the directories that link mappings get resolved against, and
//! where the link mapping itself lives on disk.

use std::path::PathBuf;

/// Name of link mapping file expected next to the program.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Determine absolute path to user's home directory.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if home directory path cannot be
///   determined.
pub fn home_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir().ok_or(NoWayHome)?)
}

/// Determine current working directory of the process.
///
/// # Errors
///
/// - Return [`PathError::WorkingDir`] if the working directory is gone, or
///   cannot be accessed.
pub fn working_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(PathError::WorkingDir)
}

/// Determine default absolute path to link mapping file.
///
/// The link mapping is expected to sit right next to the program itself, so
/// the program can be invoked from any directory. Does not check if the path
/// returned actually exists.
///
/// # Errors
///
/// - Return [`PathError::ProgramDir`] if the location of the running
///   executable cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(PathError::ProgramDir)?;
    let dir = exe.parent().map(PathBuf::from).unwrap_or_default();

    Ok(dir.join(CONFIG_FILE_NAME))
}

/// No way to determine user's home directory.
///
/// # See Also
///
/// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's home directory")]
pub struct NoWayHome;

/// Path resolution error types.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Home directory cannot be determined.
    #[error(transparent)]
    NoWayHome(#[from] NoWayHome),

    /// Current working directory cannot be read.
    #[error("cannot determine current working directory")]
    WorkingDir(#[source] std::io::Error),

    /// Location of running executable cannot be read.
    #[error("cannot determine location of program")]
    ProgramDir(#[source] std::io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = PathError> = std::result::Result<T, E>;
