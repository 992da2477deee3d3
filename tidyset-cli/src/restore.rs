use anyhow::Result;
use std::path::Path;
use tidyset_core::{redo_operation, restore_operation, undo_operation};

use crate::cli::OutputFormat;
use crate::print_result;

pub fn handle_undo(folder: &Path, output: OutputFormat, quiet: bool) -> Result<()> {
    let result = undo_operation(folder)?;
    print_result(&result, output, quiet);
    Ok(())
}

pub fn handle_redo(folder: &Path, output: OutputFormat, quiet: bool) -> Result<()> {
    let result = redo_operation(folder)?;
    print_result(&result, output, quiet);
    Ok(())
}

pub fn handle_restore(
    folder: &Path,
    snapshot_id: &str,
    mode: &str,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let result = restore_operation(folder, snapshot_id, mode)?;
    print_result(&result, output, quiet);
    Ok(())
}
