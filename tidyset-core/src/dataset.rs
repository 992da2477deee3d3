use crate::report::write_summary_csv;
use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Image extensions recognized when pairing captions with images.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "bmp", "tif", "tiff"];

fn is_image(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| exts.iter().any(|x| *x == e))
}

fn normalize_extensions(extensions: Option<&[String]>) -> Vec<String> {
    match extensions {
        Some(exts) if !exts.is_empty() => exts
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect(),
        _ => IMAGE_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
    }
}

/// List image files under a folder, sorted by path.
pub fn list_images(base: &Path, recursive: bool, exts: &[String]) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    if recursive {
        let walk = WalkDir::new(base)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !crate::is_internal_name(e.file_name()));
        for entry in walk.filter_map(Result::ok) {
            if entry.file_type().is_file() && is_image(entry.path(), exts) {
                images.push(entry.into_path());
            }
        }
    } else {
        for entry in fs::read_dir(base)? {
            let entry = entry?;
            if entry.file_type()?.is_file() && is_image(&entry.path(), exts) {
                images.push(entry.path());
            }
        }
    }
    images.sort();
    Ok(images)
}

fn rel_str(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CopyCaptionsSummary {
    pub copied: usize,
    pub skipped_exist: usize,
    pub missing_in_src: usize,
}

#[derive(Debug, Serialize)]
pub struct CopyCaptionsOutcome {
    pub summary: CopyCaptionsSummary,
    pub log: Vec<String>,
    pub csv_path: PathBuf,
}

/// Copy caption files from `src` into `dest`, pairing by the relative path
/// of each image under `dest`.
pub fn copy_captions(
    src: &Path,
    dest: &Path,
    allow_overwrite: bool,
    dry_run: bool,
) -> Result<CopyCaptionsOutcome> {
    let src = crate::ensure_folder(src)?;
    let dest = crate::ensure_folder(dest)?;
    let exts = normalize_extensions(None);

    let mut summary = CopyCaptionsSummary::default();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut log: Vec<String> = Vec::new();

    for image in list_images(&dest, true, &exts)? {
        let rel = image.strip_prefix(&dest).unwrap_or(&image);
        let txt_in_src = src.join(rel).with_extension("txt");
        let txt_in_dest = image.with_extension("txt");

        let action = if !txt_in_src.exists() {
            summary.missing_in_src += 1;
            "missing_in_src"
        } else if txt_in_dest.exists() && !allow_overwrite {
            summary.skipped_exist += 1;
            "skipped_exist"
        } else if dry_run {
            summary.copied += 1;
            "would_copy"
        } else {
            match fs::copy(&txt_in_src, &txt_in_dest) {
                Ok(_) => {
                    summary.copied += 1;
                    "copied"
                },
                Err(e) => {
                    log.push(format!(
                        "[ERROR] Copy failed for {}: {e}",
                        txt_in_dest.display()
                    ));
                    "error"
                },
            }
        };

        rows.push(vec![rel_str(&dest, &image), action.to_string()]);
    }

    let csv_path = write_summary_csv(
        &dest,
        "copy_captions",
        &["relative_image_path", "action"],
        &rows,
    )?;
    log.push(format!(
        "Done | copied: {}, skipped_exist: {}, missing_in_src: {}",
        summary.copied, summary.skipped_exist, summary.missing_in_src
    ));

    Ok(CopyCaptionsOutcome {
        summary,
        log,
        csv_path,
    })
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MakeBlankSummary {
    pub created: usize,
    pub already_exists: usize,
}

#[derive(Debug, Serialize)]
pub struct MakeBlankOutcome {
    pub summary: MakeBlankSummary,
    pub log: Vec<String>,
    pub csv_path: PathBuf,
}

/// Create empty `.txt` siblings for images that have no caption yet.
pub fn make_blank_captions(
    folder: &Path,
    recursive: bool,
    dry_run: bool,
    extensions: Option<&[String]>,
) -> Result<MakeBlankOutcome> {
    let base = crate::ensure_folder(folder)?;
    let exts = normalize_extensions(extensions);

    let mut summary = MakeBlankSummary::default();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut log: Vec<String> = Vec::new();

    for image in list_images(&base, recursive, &exts)? {
        let txt = image.with_extension("txt");

        let action = if txt.exists() {
            summary.already_exists += 1;
            "exists"
        } else if dry_run {
            summary.created += 1;
            "would_create"
        } else {
            match fs::write(&txt, "") {
                Ok(()) => {
                    summary.created += 1;
                    "created"
                },
                Err(e) => {
                    log.push(format!("[ERROR] Create failed for {}: {e}", txt.display()));
                    "error"
                },
            }
        };

        rows.push(vec![rel_str(&base, &image), action.to_string()]);
    }

    let csv_path = write_summary_csv(
        &base,
        "make_blank_txts",
        &["relative_image_path", "action"],
        &rows,
    )?;
    log.push(format!(
        "Done | created: {}, already_exists: {}",
        summary.created, summary.already_exists
    ));

    Ok(MakeBlankOutcome {
        summary,
        log,
        csv_path,
    })
}
