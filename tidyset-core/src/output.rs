use crate::apply::RenameError;
use crate::captions::{CaptionEntry, CaptionPreview, CaptionSummary};
use crate::dataset::{CopyCaptionsSummary, MakeBlankSummary};
use crate::plan::{FileMapping, Summary};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a plan (preview) operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub folder: String,
    pub files: Vec<FileMapping>,
    pub summary: Summary,
}

/// Result of a run (commit) operation
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub folder: String,
    pub files: Vec<FileMapping>,
    pub summary: Summary,
    pub applied: usize,
    pub errors: Vec<RenameError>,
    pub snapshot_id: Option<String>,
    pub csv_path: Option<PathBuf>,
}

/// Result of an undo/redo/restore operation
#[derive(Debug, Serialize)]
pub struct RestoreResult {
    pub snapshot_id: String,
    pub mode: String,
    pub restored: usize,
    pub errors: Vec<String>,
}

/// One row of a snapshot listing
#[derive(Debug, Serialize)]
pub struct SnapshotItem {
    pub id: String,
    pub files: usize,
    /// Where the snapshot sits in the session: "undo", "redo", or "detached"
    pub state: String,
}

/// Result of a snapshot listing
#[derive(Debug, Serialize)]
pub struct SnapshotsResult {
    pub entries: Vec<SnapshotItem>,
}

/// Result of loading caption rows
#[derive(Debug, Serialize)]
pub struct CaptionLoadResult {
    pub rows: Vec<CaptionEntry>,
    pub count: usize,
}

/// Result of a caption preview
#[derive(Debug, Serialize)]
pub struct CaptionPreviewResult {
    pub previews: Vec<CaptionPreview>,
}

/// Result of a caption batch run
#[derive(Debug, Serialize)]
pub struct CaptionRunResult {
    pub summary: CaptionSummary,
    pub log: Vec<String>,
    pub csv_path: PathBuf,
    pub snapshot_id: Option<String>,
    pub dry_run: bool,
}

/// Result of a caption copy between folders
#[derive(Debug, Serialize)]
pub struct CopyCaptionsResult {
    pub summary: CopyCaptionsSummary,
    pub log: Vec<String>,
    pub csv_path: PathBuf,
    pub dry_run: bool,
}

/// Result of blank caption creation
#[derive(Debug, Serialize)]
pub struct MakeBlankResult {
    pub summary: MakeBlankSummary,
    pub log: Vec<String>,
    pub csv_path: PathBuf,
    pub dry_run: bool,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn summary_line(summary: &Summary) -> String {
    format!(
        "{} renamed, {} unchanged, {} collisions",
        summary.renamed, summary.unchanged, summary.collisions
    )
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "folder": self.folder,
            "files": self.files,
            "summary": self.summary,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(output, "Rename preview for {}", self.folder).unwrap();
        for mapping in &self.files {
            if mapping.original == mapping.new {
                writeln!(output, "  {} (unchanged)", mapping.original).unwrap();
            } else {
                writeln!(output, "  {} -> {}", mapping.original, mapping.new).unwrap();
            }
        }
        writeln!(output, "Summary: {}", summary_line(&self.summary)).unwrap();
        output
    }
}

impl OutputFormatter for RunResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.errors.is_empty(),
            "operation": "run",
            "folder": self.folder,
            "files": self.files,
            "summary": self.summary,
            "applied": self.applied,
            "errors": self.errors,
            "snapshot_id": self.snapshot_id,
            "csv_path": self.csv_path,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(
            output,
            "Applied {} renames ({})",
            self.applied,
            summary_line(&self.summary)
        )
        .unwrap();
        if !self.errors.is_empty() {
            writeln!(
                output,
                "{} succeeded, {} failed:",
                self.applied,
                self.errors.len()
            )
            .unwrap();
            for error in &self.errors {
                writeln!(
                    output,
                    "  {} -> {}: {}",
                    error.original, error.target, error.message
                )
                .unwrap();
            }
        }
        if let Some(ref id) = self.snapshot_id {
            writeln!(output, "Snapshot: {id} (undo with 'tidyset undo')").unwrap();
        }
        if let Some(ref path) = self.csv_path {
            writeln!(output, "Report: {}", path.display()).unwrap();
        }
        output
    }
}

impl OutputFormatter for RestoreResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.errors.is_empty(),
            "operation": "restore",
            "snapshot_id": self.snapshot_id,
            "mode": self.mode,
            "restored": self.restored,
            "errors": self.errors,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(
            output,
            "Restored {} entries from snapshot {} ({})",
            self.restored, self.snapshot_id, self.mode
        )
        .unwrap();
        for error in &self.errors {
            writeln!(output, "  WARNING: {error}").unwrap();
        }
        output
    }
}

impl OutputFormatter for SnapshotsResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "snapshots",
            "entries": self.entries,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.entries.is_empty() {
            return "No snapshots\n".to_string();
        }

        use comfy_table::{Cell, Color, Table};
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Snapshot").fg(Color::Cyan),
            Cell::new("Files").fg(Color::Cyan),
            Cell::new("State").fg(Color::Cyan),
        ]);
        for entry in &self.entries {
            table.add_row(vec![&entry.id, &entry.files.to_string(), &entry.state]);
        }
        format!("{table}\n")
    }
}

impl OutputFormatter for CaptionLoadResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "captions_load",
            "rows": self.rows,
            "count": self.count,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(output, "Loaded {} captions", self.count).unwrap();
        for row in &self.rows {
            writeln!(output, "  {}: {}", row.id, crate::report::head(&row.caption)).unwrap();
        }
        output
    }
}

impl OutputFormatter for CaptionPreviewResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "captions_preview",
            "previews": self.previews,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        use comfy_table::{Cell, Color, Table};
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Caption").fg(Color::Cyan),
            Cell::new("Current").fg(Color::Cyan),
            Cell::new("Preview").fg(Color::Cyan),
        ]);
        for preview in &self.previews {
            table.add_row(vec![
                &preview.id,
                &crate::report::head(&preview.caption),
                &crate::report::head(&preview.preview),
            ]);
        }
        format!("{table}\n")
    }
}

fn caption_run_summary(result: &CaptionRunResult) -> String {
    let mut output = String::new();
    let verb = if result.dry_run {
        "Would change"
    } else {
        "Changed"
    };
    writeln!(
        output,
        "{verb} {} captions, {} skipped, {} backups",
        result.summary.changed, result.summary.skipped, result.summary.backups
    )
    .unwrap();
    for line in &result.log {
        writeln!(output, "  {line}").unwrap();
    }
    if let Some(ref id) = result.snapshot_id {
        writeln!(output, "Snapshot: {id}").unwrap();
    }
    writeln!(output, "Report: {}", result.csv_path.display()).unwrap();
    output
}

impl OutputFormatter for CaptionRunResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "captions_run",
            "summary": self.summary,
            "log": self.log,
            "csv_path": self.csv_path,
            "snapshot_id": self.snapshot_id,
            "dry_run": self.dry_run,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        caption_run_summary(self)
    }
}

impl OutputFormatter for CopyCaptionsResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "copy_captions",
            "summary": self.summary,
            "log": self.log,
            "csv_path": self.csv_path,
            "dry_run": self.dry_run,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let verb = if self.dry_run { "Would copy" } else { "Copied" };
        let mut output = String::new();
        writeln!(
            output,
            "{verb} {} captions, {} skipped (exist), {} missing in source",
            self.summary.copied, self.summary.skipped_exist, self.summary.missing_in_src
        )
        .unwrap();
        writeln!(output, "Report: {}", self.csv_path.display()).unwrap();
        output
    }
}

impl OutputFormatter for MakeBlankResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "make_blank",
            "summary": self.summary,
            "log": self.log,
            "csv_path": self.csv_path,
            "dry_run": self.dry_run,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let verb = if self.dry_run {
            "Would create"
        } else {
            "Created"
        };
        let mut output = String::new();
        writeln!(
            output,
            "{verb} {} blank captions, {} already existed",
            self.summary.created, self.summary.already_exists
        )
        .unwrap();
        writeln!(output, "Report: {}", self.csv_path.display()).unwrap();
        output
    }
}
