#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod captions;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod operations;
pub mod output;
pub mod plan;
pub mod preview;
pub mod report;
pub mod resolver;
pub mod session;
pub mod snapshot;

pub use apply::{commit_plan, CommitOutcome, RenameError};
pub use captions::{
    load_caption_rows, normalize_operations, preview_captions, run_captions, CaptionEntry,
    CaptionPreview, CaptionRunOptions, CaptionRunOutcome, CaptionSummary,
};
pub use config::Config;
pub use dataset::{copy_captions, list_images, make_blank_captions, IMAGE_EXTENSIONS};
pub use engine::{
    apply_operations, split_name, transform_file_name, validate_operations, OpKind, Operation,
    DELIMITERS,
};
pub use error::Error;
pub use operations::{
    caption_load_operation, caption_preview_operation, caption_run_operation,
    copy_captions_operation, make_blank_operation, plan_operation, redo_operation,
    restore_operation, run_operation, snapshots_operation, undo_operation,
};
pub use output::{
    CaptionLoadResult, CaptionPreviewResult, CaptionRunResult, CopyCaptionsResult,
    MakeBlankResult, OutputFormat, OutputFormatter, PlanResult, RestoreResult, RunResult,
    SnapshotItem, SnapshotsResult,
};
pub use plan::{plan_folder, plan_names, FileMapping, RenamePlan, Summary};
pub use preview::render_plan;
pub use resolver::{resolve, Resolution};
pub use session::{Session, UndoRedoStacks};
pub use snapshot::{
    capture_snapshot, delete_snapshot, list_snapshots, restore_snapshot, CapturedEntry,
    Manifest, ManifestEntry, RestoreMode, RestoreOutcome, Snapshot, UNDO_DIR,
};

use anyhow::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Directories tidyset maintains inside a dataset folder. Listings and
/// recursive walks never descend into these.
pub(crate) fn is_internal_name(name: &OsStr) -> bool {
    [snapshot::UNDO_DIR, report::REPORTS_DIR, captions::BACKUP_DIR]
        .iter()
        .any(|dir| OsStr::new(dir) == name)
}

/// Check that a target folder exists and is a directory.
///
/// Every operation that touches a folder goes through this first, so the
/// NotFound case always fails before any entry is processed.
pub fn ensure_folder(folder: &Path) -> Result<PathBuf> {
    if folder.is_dir() {
        Ok(folder.to_path_buf())
    } else {
        Err(Error::FolderNotFound(folder.to_path_buf()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_folder() {
        let temp = TempDir::new().unwrap();
        assert!(ensure_folder(temp.path()).is_ok());
        assert!(ensure_folder(&temp.path().join("missing")).is_err());

        // A file is not a folder
        let file = temp.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(ensure_folder(&file).is_err());
    }
}
