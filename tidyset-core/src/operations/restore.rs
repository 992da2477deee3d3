use crate::output::RestoreResult;
use crate::session::Session;
use crate::snapshot::{restore_snapshot, RestoreMode};
use anyhow::{anyhow, Result};
use std::path::Path;
use std::str::FromStr;

/// Restore a specific snapshot side directly, without touching the session
/// stacks. This is the raw `{folder, snapshot_id, mode}` interface.
pub fn restore_operation(folder: &Path, snapshot_id: &str, mode: &str) -> Result<RestoreResult> {
    let mode = RestoreMode::from_str(mode)?;
    let outcome = restore_snapshot(folder, snapshot_id, mode)?;
    Ok(RestoreResult {
        snapshot_id: snapshot_id.to_string(),
        mode: mode.to_string(),
        restored: outcome.restored,
        errors: outcome.errors,
    })
}

/// Undo the most recent committed batch of a folder.
pub fn undo_operation(folder: &Path) -> Result<RestoreResult> {
    let mut session = Session::load(folder)?;
    let snapshot_id = session
        .stacks
        .pop_undo()
        .ok_or_else(|| anyhow!("Nothing to undo"))?;

    let outcome = restore_snapshot(folder, &snapshot_id, RestoreMode::Before)?;
    session.save()?;
    Ok(RestoreResult {
        snapshot_id,
        mode: RestoreMode::Before.to_string(),
        restored: outcome.restored,
        errors: outcome.errors,
    })
}

/// Re-apply the most recently undone batch of a folder.
pub fn redo_operation(folder: &Path) -> Result<RestoreResult> {
    let mut session = Session::load(folder)?;
    let snapshot_id = session
        .stacks
        .pop_redo()
        .ok_or_else(|| anyhow!("Nothing to redo"))?;

    let outcome = restore_snapshot(folder, &snapshot_id, RestoreMode::After)?;
    session.save()?;
    Ok(RestoreResult {
        snapshot_id,
        mode: RestoreMode::After.to_string(),
        restored: outcome.restored,
        errors: outcome.errors,
    })
}
