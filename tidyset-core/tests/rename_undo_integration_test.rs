use std::fs;
use tidyset_core::{
    caption_run_operation, plan_operation, redo_operation, restore_operation, run_operation,
    snapshots_operation, undo_operation, OpKind, Operation,
};

fn ops(spec: &[(u32, OpKind, &str)]) -> Vec<Operation> {
    spec.iter()
        .map(|(step, kind, value)| Operation::new(*step, *kind, *value))
        .collect()
}

#[test]
fn full_rename_cycle_with_collisions() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("foo.txt"), "one").unwrap();
    fs::write(temp.path().join("foo_copy.txt"), "two").unwrap();

    let operations = ops(&[
        (1, OpKind::RemoveSuffix, "_copy"),
        (2, OpKind::AddPrefix, "dup"),
    ]);

    // Preview first: mapping is deterministic, nothing is touched
    let preview = plan_operation(temp.path(), &operations).unwrap();
    assert_eq!(preview.summary.renamed, 2);
    assert_eq!(preview.summary.collisions, 1);
    assert_eq!(preview.files[0].new, "dup-foo.txt");
    assert_eq!(preview.files[1].new, "dup-foo_1.txt");
    assert!(temp.path().join("foo.txt").exists());

    // Commit
    let run = run_operation(temp.path(), &operations, None, 3).unwrap();
    assert_eq!(run.applied, 2);
    assert!(run.errors.is_empty());
    assert_eq!(fs::read_to_string(temp.path().join("dup-foo.txt")).unwrap(), "one");
    assert_eq!(
        fs::read_to_string(temp.path().join("dup-foo_1.txt")).unwrap(),
        "two"
    );

    // Planning again on the result is a no-op batch
    let replay = plan_operation(temp.path(), &operations).unwrap();
    assert_eq!(replay.summary.renamed, 0);

    // Undo restores names and contents
    let undo = undo_operation(temp.path()).unwrap();
    assert_eq!(undo.restored, 2);
    assert!(undo.errors.is_empty());
    assert_eq!(fs::read_to_string(temp.path().join("foo.txt")).unwrap(), "one");
    assert_eq!(
        fs::read_to_string(temp.path().join("foo_copy.txt")).unwrap(),
        "two"
    );
    assert!(!temp.path().join("dup-foo.txt").exists());

    // Redo re-applies, and a direct restore-by-id matches the redo result
    let redo = redo_operation(temp.path()).unwrap();
    assert_eq!(redo.restored, 2);
    assert!(temp.path().join("dup-foo.txt").exists());

    let direct = restore_operation(temp.path(), &redo.snapshot_id, "after").unwrap();
    assert_eq!(direct.restored, 2);
    assert_eq!(fs::read_to_string(temp.path().join("dup-foo.txt")).unwrap(), "one");
}

#[test]
fn caption_batch_is_undoable_alongside_renames() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a cat").unwrap();
    fs::write(temp.path().join("b.txt"), "a dog").unwrap();

    let result = caption_run_operation(
        temp.path(),
        vec![],
        false,
        "photo_",
        "",
        &[],
        false,
        false,
    )
    .unwrap();
    assert_eq!(result.summary.changed, 2);
    let snapshot_id = result.snapshot_id.unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("a.txt")).unwrap(),
        "photo_a cat"
    );

    let undo = restore_operation(temp.path(), &snapshot_id, "before").unwrap();
    assert_eq!(undo.restored, 2);
    assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "a cat");

    let redo = restore_operation(temp.path(), &snapshot_id, "after").unwrap();
    assert_eq!(redo.restored, 2);
    assert_eq!(
        fs::read_to_string(temp.path().join("b.txt")).unwrap(),
        "photo_a dog"
    );
}

#[test]
fn snapshots_listing_tracks_history() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "x").unwrap();

    let first = run_operation(
        temp.path(),
        &ops(&[(1, OpKind::AddPrefix, "one_")]),
        None,
        3,
    )
    .unwrap();
    let second = run_operation(
        temp.path(),
        &ops(&[(1, OpKind::AddPrefix, "two_")]),
        None,
        3,
    )
    .unwrap();

    let listing = snapshots_operation(temp.path(), None).unwrap();
    assert_eq!(listing.entries.len(), 2);
    assert_eq!(listing.entries[0].id, second.snapshot_id.unwrap());
    assert_eq!(listing.entries[1].id, first.snapshot_id.unwrap());
    assert!(listing.entries.iter().all(|e| e.state == "undo"));
}
