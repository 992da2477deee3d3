use crate::snapshot::UNDO_DIR;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

/// The undo/redo stacks of one folder's editing session.
///
/// The stacks hold snapshot ids only; the snapshots themselves live under
/// `__undo/` and are never touched here. Capacity bounds the undo stack,
/// evicting oldest-first; committing a new batch invalidates the entire redo
/// stack. Both evicted and invalidated ids are handed back to the caller,
/// which owns the retention policy (typically: delete those snapshot dirs).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UndoRedoStacks {
    pub undo: Vec<String>,
    pub redo: Vec<String>,
}

impl UndoRedoStacks {
    /// Record a committed snapshot. Returns the snapshot ids this push
    /// invalidated: the cleared redo stack plus any undo entries evicted to
    /// stay within `capacity`.
    pub fn record_commit(&mut self, snapshot_id: String, capacity: usize) -> Vec<String> {
        let mut invalidated: Vec<String> = self.redo.drain(..).collect();
        self.undo.push(snapshot_id);
        while self.undo.len() > capacity {
            invalidated.push(self.undo.remove(0));
        }
        invalidated
    }

    /// Move the most recent snapshot onto the redo stack and return its id.
    pub fn pop_undo(&mut self) -> Option<String> {
        let id = self.undo.pop()?;
        self.redo.push(id.clone());
        Some(id)
    }

    /// Move the most recently undone snapshot back and return its id.
    pub fn pop_redo(&mut self) -> Option<String> {
        let id = self.redo.pop()?;
        self.undo.push(id.clone());
        Some(id)
    }
}

/// Durable session state for a folder, stored at `__undo/session.json`.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    pub stacks: UndoRedoStacks,
}

impl Session {
    /// Load the session for a folder, starting fresh if none exists.
    pub fn load(folder: &Path) -> Result<Self> {
        let path = folder.join(UNDO_DIR).join(SESSION_FILE);
        let stacks = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse session file: {}", path.display()))?
        } else {
            UndoRedoStacks::default()
        };
        Ok(Self { path, stacks })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.stacks)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;
        Ok(())
    }
}
