//! Name validation rules for OneDrive/SharePoint.
//!
//! The policy is an ordered list of rule predicates evaluated
//! first-match-wins, so precedence stays auditable and each rule can be
//! tested on its own. All matching is case-sensitive and operates on
//! Unicode codepoints, not bytes.

use crate::entry::{Entry, split_name};

/// macOS bookkeeping file: counted during discovery but never renamed.
pub const SYSTEM_ARTIFACT: &str = ".DS_Store";

/// OneDrive metadata filename and its fixed substitute.
pub const DESKTOP_INI: &str = "desktop.ini";
pub const DESKTOP_INI_SUBSTITUTE: &str = "desktop-ini";

/// Reserved word for files at the root of a OneDrive library.
pub const ROOT_FORMS: &str = "forms";
pub const ROOT_FORMS_SUBSTITUTE: &str = "formsFile";

/// Basenames the storage provider forbids regardless of content.
const RESERVED_NAMES: &[&str] = &[
    ".lock", "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
    "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Characters the storage provider disallows anywhere in a name.
const FORBIDDEN_CHARS: &[char] = &[
    '~', '"', '#', '%', '&', ':', '*', '<', '>', '?', '/', '\\', '{', '|', '}', '.',
];

/// Outcome of evaluating one entry. Consumed immediately by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDecision {
    pub needs_rename: bool,
    pub new_name: String,
}

impl RenameDecision {
    fn unchanged() -> Self {
        Self {
            needs_rename: false,
            new_name: String::new(),
        }
    }

    fn renamed(new_name: String) -> Self {
        Self {
            needs_rename: true,
            new_name,
        }
    }
}

/// A single policy rule. Returns `None` when the rule does not apply.
type Rule = fn(&Entry, usize, bool) -> Option<RenameDecision>;

/// Rules in precedence order. The final character scrub always decides.
const RULES: &[Rule] = &[
    exempt_system_artifact,
    reserved_basename,
    reserved_metadata_file,
    root_level_forms,
    scrub_characters,
];

/// Decide whether `entry` needs a new name.
///
/// `index` is the entry's zero-based position within its parent's listing,
/// used only to disambiguate the `FOLDER<n>`/`FILE<n>` fallback names within
/// one directory. `is_root_level` is true when the parent is the selected
/// root folder.
pub fn evaluate(entry: &Entry, index: usize, is_root_level: bool) -> RenameDecision {
    for rule in RULES {
        if let Some(decision) = rule(entry, index, is_root_level) {
            return decision;
        }
    }
    RenameDecision::unchanged()
}

/// Rule 1: the OS bookkeeping file is exempt from renaming.
fn exempt_system_artifact(entry: &Entry, _index: usize, _root: bool) -> Option<RenameDecision> {
    (entry.name == SYSTEM_ARTIFACT).then(RenameDecision::unchanged)
}

/// Rule 2: reserved device names and `.lock`.
///
/// Matches the full name or the name without its extension, since these
/// basenames collide regardless of extension. The replacement drops the
/// extension for the same reason.
fn reserved_basename(entry: &Entry, index: usize, _root: bool) -> Option<RenameDecision> {
    let (stem, _) = split_name(&entry.name);
    if !RESERVED_NAMES.contains(&entry.name.as_str()) && !RESERVED_NAMES.contains(&stem) {
        return None;
    }
    let new_name = if entry.is_dir {
        format!("FOLDER{index}")
    } else {
        format!("FILE{index}")
    };
    Some(RenameDecision::renamed(new_name))
}

/// Rule 3: the cloud-metadata filename gets a fixed substitute.
fn reserved_metadata_file(entry: &Entry, _index: usize, _root: bool) -> Option<RenameDecision> {
    (entry.name == DESKTOP_INI)
        .then(|| RenameDecision::renamed(DESKTOP_INI_SUBSTITUTE.to_string()))
}

/// Rule 4: `forms` is reserved for files at the root of the library.
fn root_level_forms(entry: &Entry, _index: usize, is_root_level: bool) -> Option<RenameDecision> {
    if is_root_level && !entry.is_dir && split_name(&entry.name).0 == ROOT_FORMS {
        return Some(RenameDecision::renamed(ROOT_FORMS_SUBSTITUTE.to_string()));
    }
    None
}

/// Rule 5: cumulative fix-up of the stem.
///
/// Applies, in order: whitespace trim, `~$` prefix -> `-$`, `_vti_` ->
/// `-vti-`, then a 1:1 replacement of every forbidden character with `-`.
/// The extension is reattached untouched. A stem that trims away to
/// nothing falls back to `FOLDER<index>`/`FILE<index>`, since an empty
/// name is not a valid rename target.
fn scrub_characters(entry: &Entry, index: usize, _root: bool) -> Option<RenameDecision> {
    let (stem, extension) = split_name(&entry.name);

    let mut fixed = stem.trim().to_string();
    if let Some(rest) = fixed.strip_prefix("~$") {
        fixed = format!("-${rest}");
    }
    if fixed.contains("_vti_") {
        fixed = fixed.replace("_vti_", "-vti-");
    }
    fixed = fixed
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '-' } else { c })
        .collect();

    if fixed == stem {
        return Some(RenameDecision::unchanged());
    }
    if fixed.is_empty() {
        // Whitespace-only stem. An empty stem that was already empty (a
        // dotfile like `.gitignore`) is caught by the unchanged check above.
        let new_name = if entry.is_dir {
            format!("FOLDER{index}")
        } else {
            format!("FILE{index}")
        };
        return Some(RenameDecision::renamed(new_name));
    }
    let new_name = match extension {
        Some(ext) if !ext.is_empty() => format!("{fixed}.{ext}"),
        _ => fixed,
    };
    Some(RenameDecision::renamed(new_name))
}
