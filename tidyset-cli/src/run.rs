use anyhow::Result;
use std::path::Path;
use tidyset_core::{run_operation, OutputFormatter};

use crate::cli::{resolve_operations, OpArg, OutputFormat};

pub fn handle_run(
    folder: &Path,
    ops: &[OpArg],
    include_files: Vec<String>,
    max_snapshots: usize,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let operations = resolve_operations(ops);
    let include = if include_files.is_empty() {
        None
    } else {
        Some(include_files)
    };

    let result = run_operation(folder, &operations, include.as_deref(), max_snapshots)?;

    match output {
        OutputFormat::Json => {
            print!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
