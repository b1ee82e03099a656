//! Driveclean - renames files and folders that break OneDrive/SharePoint sync

pub mod engine;
pub mod entry;
pub mod report;
pub mod rules;
pub mod stack;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use engine::{Engine, EngineConfig, RenameRecord, RunError, RunSummary};
pub use report::{BufferReporter, ConsoleReporter, Reporter, SilentReporter, print_json};
pub use rules::{RenameDecision, evaluate};
pub use stack::PathStack;
