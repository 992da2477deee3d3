use anyhow::Result;
use std::path::Path;
use tidyset_core::snapshots_operation;

use crate::cli::OutputFormat;
use crate::print_result;

pub fn handle_snapshots(
    folder: &Path,
    limit: Option<usize>,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let result = snapshots_operation(folder, limit)?;
    print_result(&result, output, quiet);
    Ok(())
}
