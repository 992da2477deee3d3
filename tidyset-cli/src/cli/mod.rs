pub mod args;
pub mod types;

pub use args::{CaptionsCommands, Cli, Commands};
pub use types::{resolve_operations, OpArg, OutputFormat, PreviewArg};
