use crate::plan::RenamePlan;
use crate::snapshot::CapturedEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One entry that could not be applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameError {
    pub original: String,
    pub target: String,
    pub message: String,
}

/// Best-effort result of applying a plan to disk.
#[derive(Debug, Default)]
pub struct CommitOutcome {
    pub applied: usize,
    pub errors: Vec<RenameError>,
    /// The entries that actually changed on disk, ready for snapshot capture.
    pub captured: Vec<CapturedEntry>,
    /// Audit rows: relative path, action, old head, new head.
    pub rows: Vec<Vec<String>>,
}

/// Apply a committed mapping to the filesystem.
///
/// Only entries whose final name differs are touched; `include` narrows the
/// batch to a subset of originals. Per-entry failures are recorded and the
/// batch continues - apply-all is best-effort, never all-or-nothing.
pub fn commit_plan(
    plan: &RenamePlan,
    base: &Path,
    include: Option<&HashSet<String>>,
) -> CommitOutcome {
    let mut outcome = CommitOutcome::default();

    for mapping in &plan.files {
        if let Some(include) = include {
            if !include.contains(&mapping.original) {
                continue;
            }
        }

        if mapping.original == mapping.new {
            outcome.rows.push(vec![
                mapping.original.clone(),
                "unchanged".to_string(),
                mapping.original.clone(),
                mapping.new.clone(),
            ]);
            continue;
        }

        let src = base.join(&mapping.original);
        let dst = base.join(&mapping.new);
        match fs::rename(&src, &dst) {
            Ok(()) => {
                outcome.applied += 1;
                outcome.rows.push(vec![
                    mapping.original.clone(),
                    "renamed".to_string(),
                    mapping.original.clone(),
                    mapping.new.clone(),
                ]);
                // Content is unchanged by a rename; capture it once for both
                // sides of the snapshot.
                match fs::read(&dst) {
                    Ok(content) => outcome.captured.push(CapturedEntry::rename(
                        mapping.original.clone(),
                        mapping.new.clone(),
                        content,
                    )),
                    Err(e) => outcome.errors.push(RenameError {
                        original: mapping.original.clone(),
                        target: mapping.new.clone(),
                        message: format!("renamed, but snapshot read failed: {e}"),
                    }),
                }
            },
            Err(e) => {
                outcome.errors.push(RenameError {
                    original: mapping.original.clone(),
                    target: mapping.new.clone(),
                    message: e.to_string(),
                });
                outcome.rows.push(vec![
                    mapping.original.clone(),
                    "error".to_string(),
                    mapping.original.clone(),
                    mapping.new.clone(),
                ]);
            },
        }
    }

    outcome
}
