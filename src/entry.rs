//! Filesystem entries as observed at sanitization time.

use std::io;
use std::path::{Path, PathBuf};

/// A file or directory observed with a fresh stat.
///
/// Entries are never cached across listings: renames applied earlier in the
/// same pass can change sibling names, so every enumeration re-stats.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    /// Last path component, lossily decoded for rule matching.
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    /// Stat `path` and build an entry from what is on disk right now.
    ///
    /// Symlinks are not followed, so a symlink to a directory is treated as
    /// a file: its name can be fixed, but it is never descended into.
    pub fn observe(path: &Path) -> io::Result<Self> {
        let meta = std::fs::symlink_metadata(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            name,
            is_dir: meta.is_dir(),
        })
    }

    /// Name with the extension removed.
    pub fn stem(&self) -> &str {
        split_name(&self.name).0
    }

    /// Extension after the final dot, if the name contains a dot.
    pub fn extension(&self) -> Option<&str> {
        split_name(&self.name).1
    }
}

/// Split a name at its final dot into `(stem, extension)`.
///
/// `"report.docx"` -> `("report", Some("docx"))`, `"archive.tar.gz"` ->
/// `("archive.tar", Some("gz"))`, `".gitignore"` -> `("", Some("gitignore"))`,
/// `"README"` -> `("README", None)`.
pub fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(i) => (&name[..i], Some(&name[i + 1..])),
        None => (name, None),
    }
}
