use anyhow::Result;
use std::path::Path;
use tidyset_core::{caption_load_operation, caption_preview_operation, caption_run_operation};

use crate::cli::{resolve_operations, OpArg, OutputFormat};
use crate::print_result;

pub fn handle_load(folder: &Path, recursive: bool, output: OutputFormat, quiet: bool) -> Result<()> {
    let result = caption_load_operation(folder, recursive)?;
    print_result(&result, output, quiet);
    Ok(())
}

pub fn handle_preview(
    folder: &Path,
    prefix: &str,
    suffix: &str,
    ops: &[OpArg],
    recursive: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let operations = resolve_operations(ops);
    let result = caption_preview_operation(folder, vec![], recursive, prefix, suffix, &operations)?;
    print_result(&result, output, quiet);
    Ok(())
}

#[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
pub fn handle_run(
    folder: &Path,
    prefix: &str,
    suffix: &str,
    ops: &[OpArg],
    recursive: bool,
    apply: bool,
    backup: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let operations = resolve_operations(ops);
    let result = caption_run_operation(
        folder,
        vec![],
        recursive,
        prefix,
        suffix,
        &operations,
        !apply,
        backup,
    )?;
    print_result(&result, output, quiet);
    Ok(())
}
