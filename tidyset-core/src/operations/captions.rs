use crate::captions::{
    load_caption_rows, normalize_operations, preview_captions, run_captions, CaptionEntry,
    CaptionRunOptions,
};
use crate::engine::Operation;
use crate::output::{CaptionLoadResult, CaptionPreviewResult, CaptionRunResult};
use anyhow::Result;
use std::path::Path;

/// Load all caption rows of a folder.
pub fn caption_load_operation(folder: &Path, recursive: bool) -> Result<CaptionLoadResult> {
    let rows = load_caption_rows(folder, recursive)?;
    let count = rows.len();
    Ok(CaptionLoadResult { rows, count })
}

/// Preview caption transformations for a folder (or pre-loaded entries).
pub fn caption_preview_operation(
    folder: &Path,
    entries: Vec<CaptionEntry>,
    recursive: bool,
    prefix: &str,
    suffix: &str,
    operations: &[Operation],
) -> Result<CaptionPreviewResult> {
    let ops = normalize_operations(prefix, suffix, operations)?;
    let entries = if entries.is_empty() {
        load_caption_rows(folder, recursive)?
    } else {
        entries
    };
    Ok(CaptionPreviewResult {
        previews: preview_captions(&entries, &ops),
    })
}

/// Run a caption rewrite batch.
#[allow(clippy::too_many_arguments)]
pub fn caption_run_operation(
    folder: &Path,
    entries: Vec<CaptionEntry>,
    recursive: bool,
    prefix: &str,
    suffix: &str,
    operations: &[Operation],
    dry_run: bool,
    make_backup: bool,
) -> Result<CaptionRunResult> {
    let ops = normalize_operations(prefix, suffix, operations)?;
    let outcome = run_captions(
        folder,
        &entries,
        &ops,
        CaptionRunOptions {
            recursive,
            dry_run,
            make_backup,
        },
    )?;
    Ok(CaptionRunResult {
        summary: outcome.summary,
        log: outcome.log,
        csv_path: outcome.csv_path,
        snapshot_id: outcome.snapshot_id,
        dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_caption_preview_falls_back_to_folder_scan() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a cat").unwrap();

        let result =
            caption_preview_operation(temp.path(), vec![], false, "photo_", "", &[]).unwrap();
        assert_eq!(result.previews.len(), 1);
        assert_eq!(result.previews[0].preview, "photo_a cat");
    }

    #[test]
    fn test_caption_run_operation_dry_run_default_flow() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a cat").unwrap();

        let result =
            caption_run_operation(temp.path(), vec![], false, "", "best quality", &[], true, false)
                .unwrap();
        assert_eq!(result.summary.changed, 1);
        assert!(result.dry_run);
        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "a cat");
    }
}
