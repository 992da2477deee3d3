use crate::error::Error;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Directory under the base folder holding all snapshots.
pub const UNDO_DIR: &str = "__undo";

const MANIFEST_FILE: &str = "manifest.json";
const MANIFEST_VERSION: u32 = 2;

/// One captured entry: where its "before" and "after" content lives,
/// relative to the base folder.
///
/// For caption rewrites the two paths are equal; for file renames they
/// differ (old name vs new name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub before: String,
    pub after: String,
}

/// The manifest is the single source of truth for what a restore touches.
/// Restore iterates the manifest, never the filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub base: String,
    pub files: Vec<ManifestEntry>,
    pub created_at: String,
    pub version: u32,
}

/// Content of one entry to capture, both sides.
#[derive(Debug, Clone)]
pub struct CapturedEntry {
    pub before_path: String,
    pub after_path: String,
    pub before: Vec<u8>,
    pub after: Vec<u8>,
}

impl CapturedEntry {
    /// Capture for an in-place content rewrite (captions).
    pub fn rewrite(path: impl Into<String>, before: Vec<u8>, after: Vec<u8>) -> Self {
        let path = path.into();
        Self {
            before_path: path.clone(),
            after_path: path,
            before,
            after,
        }
    }

    /// Capture for a rename: same content under the old and new name.
    pub fn rename(from: impl Into<String>, to: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            before_path: from.into(),
            after_path: to.into(),
            before: content.clone(),
            after: content,
        }
    }
}

/// A persisted snapshot, write-once after `capture_snapshot`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: String,
    pub dir: PathBuf,
    pub files: Vec<ManifestEntry>,
}

/// Which side of a snapshot a restore re-applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreMode {
    /// Restore the pre-batch state (undo).
    Before,
    /// Re-apply the post-batch state (redo).
    After,
}

impl RestoreMode {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl FromStr for RestoreMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            other => Err(Error::InvalidRestoreMode(other.to_string())),
        }
    }
}

impl fmt::Display for RestoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Result of a restore: best-effort counts plus accumulated errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestoreOutcome {
    pub restored: usize,
    pub errors: Vec<String>,
}

fn write_entry(root: &Path, rel: &str, content: &[u8]) -> Result<()> {
    let dst = root.join(rel);
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dst, content).with_context(|| format!("Failed to write {}", dst.display()))?;
    Ok(())
}

/// Pick a timestamp-derived snapshot id that is free under `__undo`.
fn allocate_id(undo_dir: &Path) -> String {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    if !undo_dir.join(&ts).exists() {
        return ts;
    }
    // Two commits within the same second; disambiguate.
    let mut n = 2;
    loop {
        let candidate = format!("{ts}_{n}");
        if !undo_dir.join(&candidate).exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Persist a snapshot of the entries a committed batch actually mutated.
///
/// Layout: `__undo/<id>/{before,after}/<relative-path>` plus a manifest.
/// Only call with a non-empty, actually-changed entry set; dry-runs and
/// all-unchanged batches never produce a snapshot.
pub fn capture_snapshot(base: &Path, entries: &[CapturedEntry]) -> Result<Snapshot> {
    let undo_dir = base.join(UNDO_DIR);
    fs::create_dir_all(&undo_dir)?;

    let id = allocate_id(&undo_dir);
    let snap_dir = undo_dir.join(&id);
    let before_dir = snap_dir.join(RestoreMode::Before.dir_name());
    let after_dir = snap_dir.join(RestoreMode::After.dir_name());
    fs::create_dir_all(&before_dir)?;
    fs::create_dir_all(&after_dir)?;

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        write_entry(&before_dir, &entry.before_path, &entry.before)?;
        write_entry(&after_dir, &entry.after_path, &entry.after)?;
        files.push(ManifestEntry {
            before: entry.before_path.clone(),
            after: entry.after_path.clone(),
        });
    }

    let manifest = Manifest {
        base: base.to_string_lossy().into_owned(),
        files: files.clone(),
        created_at: id.clone(),
        version: MANIFEST_VERSION,
    };
    let manifest_json = serde_json::to_string_pretty(&manifest)?;
    fs::write(snap_dir.join(MANIFEST_FILE), manifest_json)
        .with_context(|| format!("Failed to write manifest for snapshot {id}"))?;

    Ok(Snapshot {
        id,
        dir: snap_dir,
        files,
    })
}

/// Read a snapshot's manifest.
pub fn read_manifest(snap_dir: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(snap_dir.join(MANIFEST_FILE))?;
    Ok(serde_json::from_str(&content)?)
}

/// Restore one side of a snapshot onto the live folder.
///
/// Iterates the manifest; for each entry the chosen side's content
/// overwrites the live file, and if the entry was a rename the counterpart
/// name is removed. Missing snapshot entries and write failures are recorded
/// as strings and processing continues; the call never aborts early once the
/// snapshot has been located. Restore never mutates the snapshot itself, so
/// alternating undo/redo is idempotent.
pub fn restore_snapshot(folder: &Path, snapshot_id: &str, mode: RestoreMode) -> Result<RestoreOutcome> {
    let base = crate::ensure_folder(folder)?;
    let snap_dir = base.join(UNDO_DIR).join(snapshot_id);
    if !snap_dir.is_dir() {
        return Err(Error::SnapshotNotFound(snapshot_id.to_string()).into());
    }

    let manifest = match read_manifest(&snap_dir) {
        Ok(manifest) => manifest,
        Err(e) => {
            return Ok(RestoreOutcome {
                restored: 0,
                errors: vec![format!("manifest.json read error: {e}")],
            })
        },
    };

    let mut outcome = RestoreOutcome::default();
    let tree = snap_dir.join(mode.dir_name());

    for entry in &manifest.files {
        let (target_rel, stale_rel) = match mode {
            RestoreMode::Before => (&entry.before, &entry.after),
            RestoreMode::After => (&entry.after, &entry.before),
        };

        let src = tree.join(target_rel);
        if !src.exists() {
            outcome
                .errors
                .push(format!("missing snapshot entry: {mode}/{target_rel}"));
            continue;
        }

        let result = fs::read(&src).and_then(|content| {
            let dst = base.join(target_rel);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&dst, content)?;
            // A rename restore must also retire the counterpart name
            if stale_rel != target_rel {
                let stale = base.join(stale_rel);
                if stale.exists() {
                    fs::remove_file(&stale)?;
                }
            }
            Ok(())
        });

        match result {
            Ok(()) => outcome.restored += 1,
            Err(e) => outcome.errors.push(format!("{target_rel}: {e}")),
        }
    }

    Ok(outcome)
}

/// List snapshot ids under a folder, newest first.
pub fn list_snapshots(folder: &Path) -> Result<Vec<Snapshot>> {
    let base = crate::ensure_folder(folder)?;
    let undo_dir = base.join(UNDO_DIR);
    let mut snapshots = Vec::new();
    if !undo_dir.is_dir() {
        return Ok(snapshots);
    }

    for entry in fs::read_dir(&undo_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir = entry.path();
        // Skip stray directories without a readable manifest
        if let Ok(manifest) = read_manifest(&dir) {
            snapshots.push(Snapshot {
                id: entry.file_name().to_string_lossy().into_owned(),
                dir,
                files: manifest.files,
            });
        }
    }

    snapshots.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(snapshots)
}

/// Remove a snapshot's directory. Missing snapshots are not an error.
pub fn delete_snapshot(folder: &Path, snapshot_id: &str) -> Result<()> {
    let snap_dir = folder.join(UNDO_DIR).join(snapshot_id);
    if snap_dir.is_dir() {
        fs::remove_dir_all(&snap_dir)
            .with_context(|| format!("Failed to delete snapshot {snapshot_id}"))?;
    }
    Ok(())
}
