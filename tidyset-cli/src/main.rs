use clap::Parser;
use std::io::{self, IsTerminal};
use std::process;
use tidyset_core::{Config, OutputFormatter};

mod captions;
mod cli;
mod dataset;
mod plan;
mod restore;
mod run;
mod snapshots;

use cli::{CaptionsCommands, Cli, Commands, OutputFormat};

/// Print an operation result in the requested format. Summary output honors
/// --quiet; JSON is always printed so scripted callers get their payload.
pub(crate) fn print_result<T: OutputFormatter>(result: &T, output: OutputFormat, quiet: bool) {
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
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    let use_color = match config.defaults.use_color {
        Some(enabled) => enabled && !cli.no_color,
        None => !cli.no_color && io::stdout().is_terminal(),
    };

    let result = match cli.command {
        Commands::Plan {
            folder,
            ops,
            preview,
        } => plan::handle_plan(
            &folder, &ops, preview, &config, use_color, cli.output, cli.quiet,
        ),

        Commands::Run {
            folder,
            ops,
            include_files,
        } => run::handle_run(
            &folder,
            &ops,
            include_files,
            config.snapshots.max_keep,
            cli.output,
            cli.quiet,
        ),

        Commands::Undo { folder } => restore::handle_undo(&folder, cli.output, cli.quiet),

        Commands::Redo { folder } => restore::handle_redo(&folder, cli.output, cli.quiet),

        Commands::Restore {
            folder,
            snapshot_id,
            mode,
        } => restore::handle_restore(&folder, &snapshot_id, &mode, cli.output, cli.quiet),

        Commands::Snapshots { folder, limit } => {
            snapshots::handle_snapshots(&folder, limit, cli.output, cli.quiet)
        },

        Commands::Captions { command } => match command {
            CaptionsCommands::Load { folder, recursive } => {
                captions::handle_load(&folder, recursive, cli.output, cli.quiet)
            },
            CaptionsCommands::Preview {
                folder,
                prefix,
                suffix,
                ops,
                recursive,
            } => captions::handle_preview(
                &folder, &prefix, &suffix, &ops, recursive, cli.output, cli.quiet,
            ),
            CaptionsCommands::Run {
                folder,
                prefix,
                suffix,
                ops,
                recursive,
                apply,
                backup,
            } => captions::handle_run(
                &folder, &prefix, &suffix, &ops, recursive, apply, backup, cli.output, cli.quiet,
            ),
        },

        Commands::CopyCaptions {
            src,
            dest,
            overwrite,
            apply,
        } => dataset::handle_copy_captions(&src, &dest, overwrite, !apply, cli.output, cli.quiet),

        Commands::MakeBlank {
            folder,
            recursive,
            apply,
            ext,
        } => dataset::handle_make_blank(&folder, recursive, !apply, ext, cli.output, cli.quiet),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");

            let message = e.to_string();
            let exit_code = if message.contains("not found")
                || message.contains("Nothing to")
                || message.contains("must be")
                || message.contains("duplicate")
            {
                2 // Invalid input
            } else {
                3 // Internal error
            };

            process::exit(exit_code);
        },
    }
}
