use anyhow::Result;
use std::path::Path;
use tidyset_core::{plan_operation, render_plan, Config, OutputFormatter};

use crate::cli::{resolve_operations, OpArg, OutputFormat, PreviewArg};

#[allow(clippy::too_many_arguments)]
pub fn handle_plan(
    folder: &Path,
    ops: &[OpArg],
    preview: Option<PreviewArg>,
    config: &Config,
    use_color: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let operations = resolve_operations(ops);
    let result = plan_operation(folder, &operations)?;

    let format = preview.map_or(config.defaults.preview_format.as_str(), |p| p.as_str());

    match output {
        OutputFormat::Json => {
            print!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                match format {
                    "summary" => print!("{}", result.format_summary()),
                    "none" => {},
                    _ => print!("{}", render_plan(&result, use_color)),
                }
            }
        },
    }

    Ok(())
}
