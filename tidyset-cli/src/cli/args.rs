use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OpArg, OutputFormat, PreviewArg};

/// Deterministic bulk renames and caption edits for image datasets, with
/// snapshot-based undo/redo
#[derive(Parser, Debug)]
#[command(name = "tidyset")]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for machine consumption
    #[arg(long, global = true, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Suppress summary output (JSON output is unaffected)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Preview a rename batch without touching any files
    Plan {
        /// Folder whose files to rename
        folder: PathBuf,

        /// Operation to apply, `[STEP:]TYPE=VALUE`; repeatable
        #[arg(long = "op", value_name = "[STEP:]TYPE=VALUE", required = true)]
        ops: Vec<OpArg>,

        /// Preview style; defaults to the configured preview format
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,
    },

    /// Apply a rename batch and capture an undo snapshot
    Run {
        /// Folder whose files to rename
        folder: PathBuf,

        /// Operation to apply, `[STEP:]TYPE=VALUE`; repeatable
        #[arg(long = "op", value_name = "[STEP:]TYPE=VALUE", required = true)]
        ops: Vec<OpArg>,

        /// Only commit these files from the plan (comma-separated)
        #[arg(long, value_delimiter = ',', value_name = "FILES")]
        include_files: Vec<String>,
    },

    /// Revert the most recent batch
    Undo {
        folder: PathBuf,
    },

    /// Re-apply the most recently undone batch
    Redo {
        folder: PathBuf,
    },

    /// Restore a snapshot by id, to either its before or after state
    Restore {
        folder: PathBuf,

        /// Snapshot id, as shown by `tidyset snapshots`
        snapshot_id: String,

        /// Which side to restore: before or after
        #[arg(long, default_value = "before")]
        mode: String,
    },

    /// List a folder's snapshots
    Snapshots {
        folder: PathBuf,

        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Inspect and rewrite caption (.txt) files
    Captions {
        #[command(subcommand)]
        command: CaptionsCommands,
    },

    /// Copy caption files from one dataset onto another's images
    CopyCaptions {
        /// Dataset to copy captions from
        src: PathBuf,

        /// Dataset whose images receive the captions
        dest: PathBuf,

        /// Overwrite caption files that already exist in the destination
        #[arg(long)]
        overwrite: bool,

        /// Actually copy; without this only reports what would change
        #[arg(long)]
        apply: bool,
    },

    /// Create empty caption files for images that lack one
    MakeBlank {
        folder: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Actually create; without this only reports what would change
        #[arg(long)]
        apply: bool,

        /// Image extensions to consider (comma-separated, default png,jpg,jpeg,webp,bmp,tif,tiff)
        #[arg(long, value_delimiter = ',', value_name = "EXTS")]
        ext: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CaptionsCommands {
    /// Load and list caption rows
    Load {
        folder: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Preview caption transformations
    Preview {
        folder: PathBuf,

        /// Prefix to prepend to each caption
        #[arg(long, default_value = "")]
        prefix: String,

        /// Suffix to append to each caption
        #[arg(long, default_value = "")]
        suffix: String,

        /// Explicit operation, `[STEP:]TYPE=VALUE`; overrides --prefix/--suffix
        #[arg(long = "op", value_name = "[STEP:]TYPE=VALUE")]
        ops: Vec<OpArg>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Rewrite captions. Dry-run by default; pass --apply to write
    Run {
        folder: PathBuf,

        /// Prefix to prepend to each caption
        #[arg(long, default_value = "")]
        prefix: String,

        /// Suffix to append to each caption
        #[arg(long, default_value = "")]
        suffix: String,

        /// Explicit operation, `[STEP:]TYPE=VALUE`; overrides --prefix/--suffix
        #[arg(long = "op", value_name = "[STEP:]TYPE=VALUE")]
        ops: Vec<OpArg>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Actually write the changes
        #[arg(long)]
        apply: bool,

        /// Also write .bak copies of changed captions
        #[arg(long)]
        backup: bool,
    },
}
