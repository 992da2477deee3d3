use crate::apply::commit_plan;
use crate::engine::Operation;
use crate::output::RunResult;
use crate::plan::plan_folder;
use crate::report::write_summary_csv;
use crate::session::Session;
use crate::snapshot::{capture_snapshot, delete_snapshot};
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

/// Commit a rename batch: plan, apply, snapshot, session bookkeeping, report.
///
/// `include_files` narrows the commit to a subset of a previously previewed
/// plan; the summary is then recomputed over that subset only. A snapshot is
/// captured only for the entries that actually changed on disk; its id is
/// pushed on the folder's undo stack, the redo stack is invalidated, and any
/// snapshot evicted by the capacity policy is deleted.
pub fn run_operation(
    folder: &Path,
    operations: &[Operation],
    include_files: Option<&[String]>,
    max_snapshots: usize,
) -> Result<RunResult> {
    let plan = plan_folder(folder, operations)?;
    let folder_display = folder.to_string_lossy().into_owned();

    let include: Option<HashSet<String>> = include_files.map(|names| {
        names
            .iter()
            .filter(|name| plan.target_for(name).is_some())
            .cloned()
            .collect()
    });

    // An include list that matches nothing commits nothing.
    if include.as_ref().is_some_and(HashSet::is_empty) {
        return Ok(RunResult {
            folder: folder_display,
            files: vec![],
            summary: crate::plan::Summary::default(),
            applied: 0,
            errors: vec![],
            snapshot_id: None,
            csv_path: None,
        });
    }

    let outcome = commit_plan(&plan, folder, include.as_ref());

    let summary = match include {
        Some(ref include) => plan.subset_summary(operations, include),
        None => plan.summary,
    };

    let snapshot_id = if outcome.captured.is_empty() {
        None
    } else {
        let snapshot = capture_snapshot(folder, &outcome.captured)?;
        let mut session = Session::load(folder)?;
        let invalidated = session
            .stacks
            .record_commit(snapshot.id.clone(), max_snapshots);
        session.save()?;
        for stale in invalidated {
            delete_snapshot(folder, &stale)?;
        }
        Some(snapshot.id)
    };

    let csv_path = if outcome.rows.is_empty() {
        None
    } else {
        Some(write_summary_csv(
            folder,
            "rename",
            &["relative_path", "action", "old_head", "new_head"],
            &outcome.rows,
        )?)
    };

    let files = plan
        .files
        .into_iter()
        .filter(|m| {
            include
                .as_ref()
                .is_none_or(|include| include.contains(&m.original))
        })
        .collect();

    Ok(RunResult {
        folder: folder_display,
        files,
        summary,
        applied: outcome.applied,
        errors: outcome.errors,
        snapshot_id,
        csv_path,
    })
}
