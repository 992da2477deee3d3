use crate::engine::Operation;
use crate::output::PlanResult;
use crate::plan::plan_folder;
use anyhow::Result;
use std::path::Path;

/// Preview a rename batch. Never mutates anything.
pub fn plan_operation(folder: &Path, operations: &[Operation]) -> Result<PlanResult> {
    let plan = plan_folder(folder, operations)?;
    Ok(PlanResult {
        folder: folder.to_string_lossy().into_owned(),
        files: plan.files,
        summary: plan.summary,
    })
}
