//! Two-phase traversal engine: discover every directory, then rewrite names.
//!
//! Discovery must finish before any rename happens. Renaming a directory
//! top-down would invalidate the recorded paths of everything beneath it;
//! by pushing directories in pre-order and draining the stack LIFO, every
//! directory is re-listed and processed before the directory that contains
//! it is itself renamed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::Serialize;
use thiserror::Error;

use crate::entry::Entry;
use crate::report::Reporter;
use crate::rules;
use crate::stack::PathStack;

/// Errors that abort a run before any tree I/O starts.
///
/// Everything that happens past this point (unreadable subdirectories,
/// rename collisions, permission denials) is reported and skipped instead.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no root folder selected")]
    EmptyRoot,
    #[error("cannot read root '{}': {source}", path.display())]
    UnreadableRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("root '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// One rename applied to disk.
#[derive(Debug, Clone, Serialize)]
pub struct RenameRecord {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Result of one run, also serialized for `--json` output.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub root: PathBuf,
    pub folders: usize,
    pub files: usize,
    pub renamed: Vec<RenameRecord>,
    pub errors: Vec<String>,
}

impl RunSummary {
    fn new(root: PathBuf) -> Self {
        Self {
            root,
            folders: 0,
            files: 0,
            renamed: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Configuration for a traversal run.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Glob patterns matched against entry names; matching entries are
    /// skipped entirely: not counted, not descended into, not renamed.
    pub ignore_patterns: Vec<String>,
}

/// Per-run mutable state, owned for the duration of one `run()` call.
struct RunContext {
    root: PathBuf,
    stack: PathStack,
    folders: usize,
    files: usize,
}

impl RunContext {
    fn new(root: PathBuf) -> Self {
        Self {
            root,
            stack: PathStack::new(),
            folders: 0,
            files: 0,
        }
    }
}

pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Scan the tree under `root` and rename every entry that violates the
    /// naming rules, reporting each outcome through `reporter`.
    pub fn run(&self, root: &Path, reporter: &mut dyn Reporter) -> Result<RunSummary, RunError> {
        if root.as_os_str().is_empty() {
            return Err(RunError::EmptyRoot);
        }
        let meta = fs::metadata(root).map_err(|source| RunError::UnreadableRoot {
            path: root.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(RunError::NotADirectory(root.to_path_buf()));
        }

        reporter.report(&format!("Beginning scan of paths at: {}", root.display()));

        let mut ctx = RunContext::new(root.to_path_buf());
        let mut summary = RunSummary::new(root.to_path_buf());
        self.discover(&mut ctx, reporter, &mut summary);
        self.rewrite(&mut ctx, reporter, &mut summary);

        summary.folders = ctx.folders;
        summary.files = ctx.files;
        reporter.report_summary(ctx.folders, ctx.files);
        Ok(summary)
    }

    /// Discovery phase: push every directory of the tree onto the path
    /// stack in pre-order and count what was seen.
    ///
    /// Implemented with an explicit worklist so that tree depth is bounded
    /// by memory, not by call-stack depth. Children are queued in reverse
    /// so siblings keep their listing order on the LIFO worklist.
    fn discover(&self, ctx: &mut RunContext, reporter: &mut dyn Reporter, summary: &mut RunSummary) {
        let mut pending = vec![ctx.root.clone()];
        while let Some(dir) = pending.pop() {
            log::debug!("discovered directory: {}", dir.display());
            ctx.stack.push(dir.clone());

            let entries = match list_sorted(&dir) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("cannot list {}: {err}", dir.display());
                    reporter.report(&format!("Error listing {}, skipping...", dir.display()));
                    summary.errors.push(format!("listing {}: {err}", dir.display()));
                    continue;
                }
            };

            let mut subdirs = Vec::new();
            for entry in entries {
                let path = entry.path();
                if self.is_ignored(&path) {
                    continue;
                }
                // DirEntry::file_type does not follow symlinks, so symlinked
                // directories are counted as files and never descended into.
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if is_dir {
                    ctx.folders += 1;
                    subdirs.push(path);
                } else {
                    ctx.files += 1;
                }
            }
            for sub in subdirs.into_iter().rev() {
                pending.push(sub);
            }
        }
    }

    /// Rewrite phase: drain the stack, re-listing each directory fresh so
    /// renames already applied to siblings are visible, and fix every child
    /// whose name violates the rules.
    fn rewrite(&self, ctx: &mut RunContext, reporter: &mut dyn Reporter, summary: &mut RunSummary) {
        while let Some(dir) = ctx.stack.pop() {
            log::debug!("processing directory: {}", dir.display());
            let is_root_level = dir == ctx.root;

            let entries = match list_sorted(&dir) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("cannot list {}: {err}", dir.display());
                    reporter.report(&format!("Error listing {}, skipping...", dir.display()));
                    summary.errors.push(format!("listing {}: {err}", dir.display()));
                    continue;
                }
            };

            for (index, dir_entry) in entries.iter().enumerate() {
                let path = dir_entry.path();
                if self.is_ignored(&path) {
                    continue;
                }
                let entry = match Entry::observe(&path) {
                    Ok(entry) => entry,
                    Err(err) => {
                        log::warn!("cannot stat {}: {err}", path.display());
                        continue;
                    }
                };

                let decision = rules::evaluate(&entry, index, is_root_level);
                if !decision.needs_rename {
                    continue;
                }
                self.apply_rename(&dir, &entry, &decision.new_name, reporter, summary);
            }
        }
    }

    /// Move an entry to its sanitized name within the same parent.
    ///
    /// A rename never overwrites: if the target name is already taken the
    /// entry is left untouched and the failure is reported.
    fn apply_rename(
        &self,
        parent: &Path,
        entry: &Entry,
        new_name: &str,
        reporter: &mut dyn Reporter,
        summary: &mut RunSummary,
    ) {
        let target = parent.join(new_name);
        if target.symlink_metadata().is_ok() {
            reporter.report(&format!("Error renaming {}, skipping...", entry.path.display()));
            summary
                .errors
                .push(format!("rename target already exists: {}", target.display()));
            return;
        }
        match fs::rename(&entry.path, &target) {
            Ok(()) => {
                reporter.report(&format!(
                    "Renamed: {} -> {}",
                    entry.path.display(),
                    target.display()
                ));
                summary.renamed.push(RenameRecord {
                    from: entry.path.clone(),
                    to: target,
                });
            }
            Err(err) => {
                log::warn!("rename {} failed: {err}", entry.path.display());
                reporter.report(&format!("Error renaming {}, skipping...", entry.path.display()));
                summary
                    .errors
                    .push(format!("renaming {}: {err}", entry.path.display()));
            }
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.config.ignore_patterns.is_empty() {
            return false;
        }
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == *pattern || glob_match(pattern, &name))
    }
}

/// Match a glob pattern against a name.
fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// List a directory's immediate children, sorted by name for deterministic
/// enumeration order (and therefore deterministic disambiguation indexes).
fn list_sorted(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(entry) => entries.push(entry),
            // A single unreadable entry should not fail the whole listing.
            Err(err) => log::warn!("skipping unreadable entry in {}: {err}", dir.display()),
        }
    }
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}
