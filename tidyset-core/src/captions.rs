use crate::engine::{apply_operations, validate_operations, OpKind, Operation};
use crate::report::{head, write_summary_csv};
use crate::snapshot::{capture_snapshot, CapturedEntry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding optional flat `.bak` copies of rewritten captions.
pub const BACKUP_DIR: &str = "__backup_prefix_suffix";

/// One caption record: a `.txt` sidecar of a dataset image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Relative path within the base folder, `/`-separated.
    pub id: String,
    pub path: String,
    pub filename: String,
    pub caption: String,
}

/// Preview of one caption transformation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionPreview {
    pub id: String,
    pub filename: String,
    pub caption: String,
    pub preview: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CaptionSummary {
    pub changed: usize,
    pub skipped: usize,
    pub backups: usize,
}

/// Result of a caption batch run.
#[derive(Debug, Serialize)]
pub struct CaptionRunOutcome {
    pub summary: CaptionSummary,
    pub log: Vec<String>,
    pub csv_path: PathBuf,
    pub snapshot_id: Option<String>,
}

/// Options for `run_captions`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptionRunOptions {
    pub recursive: bool,
    pub dry_run: bool,
    pub make_backup: bool,
}

fn read_text_safe(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn rel_id(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// List `.txt` files under a folder, sorted by path.
fn list_caption_files(base: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if recursive {
        let walk = WalkDir::new(base)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !crate::is_internal_name(e.file_name()));
        for entry in walk.filter_map(Result::ok) {
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|e| e == "txt")
            {
                files.push(entry.into_path());
            }
        }
    } else {
        for entry in fs::read_dir(base)? {
            let entry = entry?;
            if entry.file_type()?.is_file() && entry.path().extension().is_some_and(|e| e == "txt")
            {
                files.push(entry.path());
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Load all caption records of a folder.
pub fn load_caption_rows(folder: &Path, recursive: bool) -> Result<Vec<CaptionEntry>> {
    let base = crate::ensure_folder(folder)?;
    let mut rows = Vec::new();
    for path in list_caption_files(&base, recursive)? {
        rows.push(CaptionEntry {
            id: rel_id(&base, &path),
            path: path.to_string_lossy().into_owned(),
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            caption: read_text_safe(&path),
        });
    }
    Ok(rows)
}

/// Fold bare prefix/suffix inputs into the canonical operation list.
///
/// There is exactly one transformation semantics: the delimiter-aware
/// engine. A plain prefix/suffix pair becomes `add_prefix`/`add_suffix`
/// operations rather than taking a separate concatenation path.
pub fn normalize_operations(
    prefix: &str,
    suffix: &str,
    ops: &[Operation],
) -> Result<Vec<Operation>> {
    if !ops.is_empty() {
        return validate_operations(ops);
    }
    let mut normalized = Vec::new();
    if !prefix.is_empty() {
        normalized.push(Operation::new(1, OpKind::AddPrefix, prefix));
    }
    if !suffix.is_empty() {
        let step = if prefix.is_empty() { 1 } else { 2 };
        normalized.push(Operation::new(step, OpKind::AddSuffix, suffix));
    }
    Ok(normalized)
}

/// Preview caption transformations without touching disk.
pub fn preview_captions(entries: &[CaptionEntry], ops: &[Operation]) -> Vec<CaptionPreview> {
    entries
        .iter()
        .map(|entry| CaptionPreview {
            id: entry.id.clone(),
            filename: entry.filename.clone(),
            caption: entry.caption.clone(),
            preview: apply_operations(&entry.caption, ops),
        })
        .collect()
}

/// Rewrite caption texts in a folder, best-effort, with an optional
/// reversible snapshot.
///
/// When `entries` is non-empty only those records are processed (their
/// caption text may have been edited by the caller and is used as the input
/// text); otherwise every `.txt` under the folder is. An entry whose final
/// text equals the file's current content counts as skipped. A snapshot is
/// captured only when at least one caption actually changed and this is not
/// a dry-run.
pub fn run_captions(
    folder: &Path,
    entries: &[CaptionEntry],
    ops: &[Operation],
    opts: CaptionRunOptions,
) -> Result<CaptionRunOutcome> {
    let base = crate::ensure_folder(folder)?;
    let canonical_base = base.canonicalize().unwrap_or_else(|_| base.clone());

    let mut log: Vec<String> = Vec::new();
    let mut summary = CaptionSummary::default();
    let mut captured: Vec<CapturedEntry> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    let backup_dir = if opts.make_backup && !opts.dry_run {
        let dir = base.join(BACKUP_DIR);
        fs::create_dir_all(&dir)?;
        Some(dir)
    } else {
        None
    };

    // Resolve caller-supplied entries against the base folder; anything
    // outside it is ignored. BTreeMap keeps processing order stable.
    let mut entry_map: BTreeMap<PathBuf, &CaptionEntry> = BTreeMap::new();
    for entry in entries {
        if entry.path.is_empty() {
            continue;
        }
        let path = PathBuf::from(&entry.path);
        let path = if path.is_absolute() {
            path
        } else {
            base.join(&entry.path)
        };
        let resolved = path.canonicalize().unwrap_or(path);
        if resolved.starts_with(&canonical_base) {
            entry_map.insert(resolved, entry);
        }
    }

    let targets: Vec<PathBuf> = if entries.is_empty() {
        list_caption_files(&base, opts.recursive)?
    } else {
        entry_map.keys().cloned().collect()
    };

    for path in &targets {
        if !path.exists() {
            continue;
        }
        let path = path.canonicalize().unwrap_or_else(|_| path.clone());
        let rel = rel_id(&canonical_base, &path);

        let original = read_text_safe(&path);
        let input = entry_map
            .get(&path)
            .map_or_else(|| original.clone(), |e| e.caption.clone());
        let final_text = apply_operations(&input, ops);

        if final_text == original {
            summary.skipped += 1;
            rows.push(vec![
                rel.clone(),
                "skipped".to_string(),
                head(&original),
                head(&original),
            ]);
            continue;
        }

        if let Some(ref backup_dir) = backup_dir {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match write_text(&backup_dir.join(format!("{name}.bak")), &original) {
                Ok(()) => summary.backups += 1,
                Err(e) => log.push(format!("[WARN] Backup failed for {rel}: {e}")),
            }
        }

        if !opts.dry_run {
            if let Err(e) = write_text(&path, &final_text) {
                log.push(format!("[ERROR] {rel}: {e}"));
                rows.push(vec![
                    rel,
                    "error".to_string(),
                    head(&original),
                    head(&final_text),
                ]);
                continue;
            }
        }

        captured.push(CapturedEntry::rewrite(
            rel.clone(),
            original.clone().into_bytes(),
            final_text.clone().into_bytes(),
        ));
        summary.changed += 1;
        rows.push(vec![
            rel,
            "changed".to_string(),
            head(&original),
            head(&final_text),
        ]);
    }

    let snapshot_id = if !captured.is_empty() && !opts.dry_run {
        Some(capture_snapshot(&base, &captured)?.id)
    } else {
        None
    };

    let csv_path = write_summary_csv(
        &base,
        "prefix_suffix",
        &["relative_path", "action", "old_head", "new_head"],
        &rows,
    )?;

    log.push(format!(
        "Done | changed: {}, skipped: {}, backups: {}",
        summary.changed, summary.skipped, summary.backups
    ));

    Ok(CaptionRunOutcome {
        summary,
        log,
        csv_path,
        snapshot_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{restore_snapshot, RestoreMode};
    use tempfile::TempDir;

    fn ops_add_prefix(value: &str) -> Vec<Operation> {
        vec![Operation::new(1, OpKind::AddPrefix, value)]
    }

    #[test]
    fn test_load_caption_rows() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "second").unwrap();
        fs::write(temp.path().join("a.txt"), "first").unwrap();
        fs::write(temp.path().join("c.png"), "not a caption").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/d.txt"), "nested").unwrap();

        let rows = load_caption_rows(temp.path(), false).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a.txt", "b.txt"]);
        assert_eq!(rows[0].caption, "first");

        let rows = load_caption_rows(temp.path(), true).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().any(|r| r.id == "sub/d.txt"));
    }

    #[test]
    fn test_recursive_listing_skips_bookkeeping_dirs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a cat").unwrap();
        fs::create_dir_all(temp.path().join("__undo/20250101_000000/before")).unwrap();
        fs::write(
            temp.path().join("__undo/20250101_000000/before/a.txt"),
            "snapshot copy",
        )
        .unwrap();
        fs::create_dir_all(temp.path().join(BACKUP_DIR)).unwrap();
        fs::write(temp.path().join(BACKUP_DIR).join("a.txt"), "backup").unwrap();

        let rows = load_caption_rows(temp.path(), true).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a.txt"]);
    }

    #[test]
    fn test_normalize_operations_prefers_explicit_ops() {
        let explicit = ops_add_prefix("x_");
        let ops = normalize_operations("ignored", "ignored", &explicit).unwrap();
        assert_eq!(ops, explicit);

        let ops = normalize_operations("style", "photo", &[]).unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].kind, OpKind::AddPrefix);
        assert_eq!(ops[1].kind, OpKind::AddSuffix);
        assert_eq!(ops[1].step, 2);

        let ops = normalize_operations("", "photo", &[]).unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].step, 1);
    }

    #[test]
    fn test_preview_uses_delimiter_rules() {
        let entries = vec![CaptionEntry {
            id: "a.txt".into(),
            path: "a.txt".into(),
            filename: "a.txt".into(),
            caption: "a cat".into(),
        }];
        let previews = preview_captions(&entries, &ops_add_prefix("photo"));
        assert_eq!(previews[0].preview, "photo-a cat");
        let previews = preview_captions(&entries, &ops_add_prefix("photo, "));
        // Trailing space is not a delimiter; the comma inside is irrelevant
        assert_eq!(previews[0].preview, "photo, -a cat");
    }

    #[test]
    fn test_run_captions_dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a cat").unwrap();

        let opts = CaptionRunOptions {
            dry_run: true,
            ..Default::default()
        };
        let outcome = run_captions(temp.path(), &[], &ops_add_prefix("photo_"), opts).unwrap();

        assert_eq!(outcome.summary.changed, 1);
        assert!(outcome.snapshot_id.is_none());
        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "a cat");
        // The audit CSV is written even for dry-runs
        assert!(outcome.csv_path.exists());
    }

    #[test]
    fn test_run_captions_writes_and_snapshots() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a cat").unwrap();
        fs::write(temp.path().join("b.txt"), "photo_a dog").unwrap();

        let ops = ops_add_prefix("photo_");
        let opts = CaptionRunOptions::default();
        let outcome = run_captions(temp.path(), &[], &ops, opts).unwrap();

        assert_eq!(outcome.summary.changed, 2);
        assert_eq!(outcome.summary.skipped, 0);
        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "photo_a cat"
        );

        // Second run: b.txt was already prefixed once, now it changes again;
        // use a run that is a no-op for both to see skips instead.
        let outcome = run_captions(temp.path(), &[], &[], opts).unwrap();
        assert_eq!(outcome.summary.changed, 0);
        assert_eq!(outcome.summary.skipped, 2);
        assert!(outcome.snapshot_id.is_none());
    }

    #[test]
    fn test_run_captions_undo_redo_round_trip() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a cat").unwrap();

        let outcome = run_captions(
            temp.path(),
            &[],
            &ops_add_prefix("photo_"),
            CaptionRunOptions::default(),
        )
        .unwrap();
        let snapshot_id = outcome.snapshot_id.unwrap();
        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "photo_a cat"
        );

        let restored = restore_snapshot(temp.path(), &snapshot_id, RestoreMode::Before).unwrap();
        assert_eq!(restored.restored, 1);
        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "a cat");

        let restored = restore_snapshot(temp.path(), &snapshot_id, RestoreMode::After).unwrap();
        assert_eq!(restored.restored, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "photo_a cat"
        );
    }

    #[test]
    fn test_run_captions_uses_supplied_entry_text() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "stale text").unwrap();

        let entries = vec![CaptionEntry {
            id: "a.txt".into(),
            path: "a.txt".into(),
            filename: "a.txt".into(),
            caption: "edited text".into(),
        }];
        let outcome =
            run_captions(temp.path(), &entries, &[], CaptionRunOptions::default()).unwrap();

        assert_eq!(outcome.summary.changed, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "edited text"
        );
    }

    #[test]
    fn test_run_captions_skips_entries_outside_base() {
        let temp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        fs::write(other.path().join("outside.txt"), "text").unwrap();

        let entries = vec![CaptionEntry {
            id: "outside.txt".into(),
            path: other.path().join("outside.txt").to_string_lossy().into_owned(),
            filename: "outside.txt".into(),
            caption: "text".into(),
        }];
        let outcome = run_captions(
            temp.path(),
            &entries,
            &ops_add_prefix("p_"),
            CaptionRunOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.summary.changed, 0);
        assert_eq!(fs::read_to_string(other.path().join("outside.txt")).unwrap(), "text");
    }

    #[test]
    fn test_run_captions_backups() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a cat").unwrap();

        let opts = CaptionRunOptions {
            make_backup: true,
            ..Default::default()
        };
        let outcome = run_captions(temp.path(), &[], &ops_add_prefix("p_"), opts).unwrap();

        assert_eq!(outcome.summary.backups, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join(BACKUP_DIR).join("a.txt.bak")).unwrap(),
            "a cat"
        );
    }
}
