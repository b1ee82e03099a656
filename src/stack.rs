//! Explicit LIFO work list of pending directory paths.
//!
//! Discovery pushes every directory it finds; the rewrite phase pops them
//! back in reverse order, so a directory is always processed before the
//! directory that contains it. Using an explicit stack instead of call-stack
//! recursion keeps very deep trees from overflowing the stack.

use std::path::{Path, PathBuf};

/// Ordered container of directory paths awaiting processing.
///
/// Strict LIFO: `push` appends, `pop` removes from the end. No deduplication
/// is performed; callers are responsible for pushing each directory once.
#[derive(Debug, Default)]
pub struct PathStack {
    items: Vec<PathBuf>,
}

impl PathStack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a directory to the top of the stack.
    pub fn push(&mut self, path: PathBuf) {
        self.items.push(path);
    }

    /// Remove and return the most recently pushed path, or `None` when empty.
    pub fn pop(&mut self) -> Option<PathBuf> {
        self.items.pop()
    }

    /// Return the most recently pushed path without removing it.
    pub fn peek(&self) -> Option<&Path> {
        self.items.last().map(PathBuf::as_path)
    }
}
