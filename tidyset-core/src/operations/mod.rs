//! High-level operations that correspond to CLI commands
//!
//! These modules tie the planner, executor, snapshot manager and session
//! stacks together into whole batch operations, separated from CLI concerns
//! like argument parsing and output formatting.

pub mod captions;
pub mod dataset;
pub mod plan;
pub mod restore;
pub mod run;
pub mod snapshots;

pub use captions::{caption_load_operation, caption_preview_operation, caption_run_operation};
pub use dataset::{copy_captions_operation, make_blank_operation};
pub use plan::plan_operation;
pub use restore::{redo_operation, restore_operation, undo_operation};
pub use run::run_operation;
pub use snapshots::snapshots_operation;
