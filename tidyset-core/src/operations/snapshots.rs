use crate::output::{SnapshotItem, SnapshotsResult};
use crate::session::Session;
use crate::snapshot::list_snapshots;
use anyhow::Result;
use std::path::Path;

/// List a folder's snapshots, newest first, annotated with their session
/// position: "undo" (reachable by undo), "redo" (reachable by redo), or
/// "detached" (not on either stack, e.g. restored directly by id).
pub fn snapshots_operation(folder: &Path, limit: Option<usize>) -> Result<SnapshotsResult> {
    let session = Session::load(folder)?;
    let snapshots = list_snapshots(folder)?;

    let mut entries: Vec<SnapshotItem> = snapshots
        .into_iter()
        .map(|snapshot| {
            let state = if session.stacks.undo.contains(&snapshot.id) {
                "undo"
            } else if session.stacks.redo.contains(&snapshot.id) {
                "redo"
            } else {
                "detached"
            };
            SnapshotItem {
                id: snapshot.id,
                files: snapshot.files.len(),
                state: state.to_string(),
            }
        })
        .collect();

    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    Ok(SnapshotsResult { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{OpKind, Operation};
    use crate::operations::restore::undo_operation;
    use crate::operations::run::run_operation;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_snapshots_listing_reflects_session_state() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "x").unwrap();

        let ops = vec![Operation::new(1, OpKind::AddPrefix, "p_")];
        let result = run_operation(temp.path(), &ops, None, 3).unwrap();
        let id = result.snapshot_id.unwrap();

        let listing = snapshots_operation(temp.path(), None).unwrap();
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].id, id);
        assert_eq!(listing.entries[0].state, "undo");
        assert_eq!(listing.entries[0].files, 1);

        undo_operation(temp.path()).unwrap();
        let listing = snapshots_operation(temp.path(), None).unwrap();
        assert_eq!(listing.entries[0].state, "redo");
    }

    #[test]
    fn test_snapshots_limit() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "x").unwrap();
        fs::write(temp.path().join("b.txt"), "x").unwrap();

        run_operation(
            temp.path(),
            &[Operation::new(1, OpKind::AddPrefix, "one_")],
            None,
            5,
        )
        .unwrap();
        run_operation(
            temp.path(),
            &[Operation::new(1, OpKind::AddPrefix, "two_")],
            None,
            5,
        )
        .unwrap();

        let listing = snapshots_operation(temp.path(), Some(1)).unwrap();
        assert_eq!(listing.entries.len(), 1);
    }
}
