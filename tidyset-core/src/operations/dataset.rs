use crate::dataset::{copy_captions, make_blank_captions};
use crate::output::{CopyCaptionsResult, MakeBlankResult};
use anyhow::Result;
use std::path::Path;

/// Copy caption files from a source dataset onto the images of a
/// destination dataset, pairing by relative path.
pub fn copy_captions_operation(
    src: &Path,
    dest: &Path,
    allow_overwrite: bool,
    dry_run: bool,
) -> Result<CopyCaptionsResult> {
    let outcome = copy_captions(src, dest, allow_overwrite, dry_run)?;
    Ok(CopyCaptionsResult {
        summary: outcome.summary,
        log: outcome.log,
        csv_path: outcome.csv_path,
        dry_run,
    })
}

/// Create empty caption files for images that lack one.
pub fn make_blank_operation(
    folder: &Path,
    recursive: bool,
    dry_run: bool,
    extensions: Option<&[String]>,
) -> Result<MakeBlankResult> {
    let outcome = make_blank_captions(folder, recursive, dry_run, extensions)?;
    Ok(MakeBlankResult {
        summary: outcome.summary,
        log: outcome.log,
        csv_path: outcome.csv_path,
        dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_copy_captions_operation_missing_src() {
        let dest = TempDir::new().unwrap();
        let err =
            copy_captions_operation(Path::new("/no/such/src"), dest.path(), false, true)
                .unwrap_err();
        assert!(err.to_string().contains("Folder not found"));
    }

    #[test]
    fn test_make_blank_operation() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.png"), "img").unwrap();

        let result = make_blank_operation(temp.path(), false, false, None).unwrap();
        assert_eq!(result.summary.created, 1);
        assert!(temp.path().join("a.txt").exists());
    }
}
