//! `scope completions`: shell completion scripts for the `scope` binary.
//!
//! Runs before the project config is loaded, so it works outside a project.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `scope completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the completion script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout().lock();
    write_completions(args.shell, command, &mut out);
    out.flush()?;
    Ok(())
}

/// Render completions for every `scope` subcommand, registered under the
/// command's own name.
fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    let bin = command.get_name().to_string();
    generate(shell, command, bin, out);
}
