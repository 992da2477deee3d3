use crate::engine::{transform_file_name, validate_operations, Operation};
use crate::resolver::resolve;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One before -> after mapping in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMapping {
    pub original: String,
    pub new: String,
}

/// Aggregate counts over a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub renamed: usize,
    pub unchanged: usize,
    pub collisions: usize,
}

/// A computed rename plan: the full before -> after mapping plus a summary.
///
/// Planning is side-effect-free; the same plan is used for preview and as the
/// first phase of a commit. All `new` names are pairwise unique and never
/// collide with another entry's original name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub files: Vec<FileMapping>,
    pub summary: Summary,
}

impl RenamePlan {
    /// Look up the planned target for an original name.
    pub fn target_for(&self, original: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|m| m.original == original)
            .map(|m| m.new.as_str())
    }

    /// Recompute the summary over a subset of the plan's entries.
    ///
    /// Collisions are detected by re-running the engine on each included
    /// name: if the raw candidate differs from the resolved target, the
    /// entry needed at least one collision probe.
    pub fn subset_summary(&self, ops: &[Operation], include: &HashSet<String>) -> Summary {
        let mut summary = Summary::default();
        let mut total = 0;
        for mapping in &self.files {
            if !include.contains(&mapping.original) {
                continue;
            }
            total += 1;
            if mapping.new == mapping.original {
                continue;
            }
            summary.renamed += 1;
            let candidate = transform_file_name(&mapping.original, ops);
            if candidate != mapping.new {
                summary.collisions += 1;
            }
        }
        summary.unchanged = total - summary.renamed;
        summary
    }
}

/// List the plain files of `base` (non-recursive), sorted lexicographically.
fn list_folder_files(base: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(base)
        .with_context(|| format!("Failed to read folder: {}", base.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Plan a rename batch over an explicit name list.
///
/// Names are sorted before processing so collision tie-breaks are
/// reproducible across runs. The list itself doubles as the set of
/// pre-existing names.
pub fn plan_names(names: &[String], ops: &[Operation]) -> Result<RenamePlan> {
    let ops = validate_operations(ops)?;

    let mut sorted: Vec<String> = names.to_vec();
    sorted.sort();

    let preexisting: HashSet<String> = sorted.iter().cloned().collect();
    let mut used: HashSet<String> = HashSet::new();
    let mut files = Vec::with_capacity(sorted.len());
    let mut summary = Summary::default();

    for name in &sorted {
        let candidate = transform_file_name(name, &ops);
        let resolution = resolve(name, &candidate, &used, &preexisting);
        if resolution.collided {
            summary.collisions += 1;
        }
        if resolution.final_name == *name {
            summary.unchanged += 1;
        } else {
            summary.renamed += 1;
        }
        used.insert(resolution.final_name.clone());
        files.push(FileMapping {
            original: name.clone(),
            new: resolution.final_name,
        });
    }

    Ok(RenamePlan { files, summary })
}

/// Plan a rename batch over the files of a folder.
///
/// Fails with a NotFound error before any entry is processed if the folder
/// is missing or not a directory.
pub fn plan_folder(folder: &Path, ops: &[Operation]) -> Result<RenamePlan> {
    let base = crate::ensure_folder(folder)?;
    let names = list_folder_files(&base)?;
    plan_names(&names, ops)
}
