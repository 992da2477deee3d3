use anyhow::Result;
use std::path::Path;
use tidyset_core::{copy_captions_operation, make_blank_operation};

use crate::cli::OutputFormat;
use crate::print_result;

pub fn handle_copy_captions(
    src: &Path,
    dest: &Path,
    overwrite: bool,
    dry_run: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let result = copy_captions_operation(src, dest, overwrite, dry_run)?;
    print_result(&result, output, quiet);
    Ok(())
}

pub fn handle_make_blank(
    folder: &Path,
    recursive: bool,
    dry_run: bool,
    ext: Vec<String>,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let extensions = if ext.is_empty() { None } else { Some(ext) };
    let result = make_blank_operation(folder, recursive, dry_run, extensions.as_deref())?;
    print_result(&result, output, quiet);
    Ok(())
}
