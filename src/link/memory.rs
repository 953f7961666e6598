// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! In-memory link capability for exercising reconciliation logic.

use crate::link::fs::LinkFs;

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashSet},
    io,
    path::{Path, PathBuf},
};

/// Kind of entry occupying a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    File,
    Dir,
    Symlink(PathBuf),

    /// Symlink whose target cannot be read back.
    Unreadable,
}

/// Mutation recorded against the fake filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    Remove(PathBuf),
    Symlink(PathBuf, PathBuf),
}

/// Fake filesystem holding a flat table of path to entry kind.
#[derive(Debug, Default)]
pub(crate) struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    ops: RefCell<Vec<Op>>,
    read_only: HashSet<PathBuf>,
}

impl MemoryFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_node(self, path: impl Into<PathBuf>, node: Node) -> Self {
        self.nodes.borrow_mut().insert(path.into(), node);
        self
    }

    /// Refuse every mutation of target path with permission denied.
    pub(crate) fn with_read_only(mut self, path: impl Into<PathBuf>) -> Self {
        self.read_only.insert(path.into());
        self
    }

    pub(crate) fn node(&self, path: impl AsRef<Path>) -> Option<Node> {
        self.nodes.borrow().get(path.as_ref()).cloned()
    }

    pub(crate) fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.read_only.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }

        Ok(())
    }
}

impl LinkFs for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        matches!(
            self.nodes.borrow().get(path),
            Some(Node::Symlink(_) | Node::Unreadable)
        )
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        match self.nodes.borrow().get(path) {
            Some(Node::Symlink(target)) => Ok(target.clone()),
            Some(Node::Unreadable) => Err(io::Error::other("cannot read link")),
            Some(_) => Err(io::Error::from(io::ErrorKind::InvalidInput)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.check_writable(path)?;
        let mut nodes = self.nodes.borrow_mut();
        let has_children = nodes
            .keys()
            .any(|child| child != path && child.starts_with(path));
        if matches!(nodes.get(path), Some(Node::Dir)) && has_children {
            return Err(io::Error::other(format!(
                "{} is not empty",
                path.display()
            )));
        }

        nodes
            .remove(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        self.ops.borrow_mut().push(Op::Remove(path.into()));

        Ok(())
    }

    fn symlink(&self, source_path: &Path, link_path: &Path) -> io::Result<()> {
        self.check_writable(link_path)?;
        let mut nodes = self.nodes.borrow_mut();
        if nodes.contains_key(link_path) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }

        nodes.insert(link_path.into(), Node::Symlink(source_path.into()));
        self.ops
            .borrow_mut()
            .push(Op::Symlink(source_path.into(), link_path.into()));

        Ok(())
    }
}
