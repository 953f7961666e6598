// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Dotfile link bootstrapper.
//!
//! Dotlink reads a __link mapping__ of repository paths to home directory
//! link names, and makes sure every link name in the home directory is a
//! symbolic link back into the repository. Running it twice is harmless.
//!
//! # See Also
//!
//! 1. [`config::LinkMapping`]
//! 2. [`link::Reconciler`]
//! 3. [`install::install`]

pub mod config;
pub mod install;
pub mod link;
pub mod path;

pub use config::LinkMapping;
pub use install::{install, status, InstallEnv, LinkPair};
pub use link::{LinkOutcome, LinkState, Reconciler, StdFs};
