//! `snipvault completions` — generate shell completion scripts.
//!
//! Usage:
//!   snipvault completions bash > ~/.bash_completion.d/snipvault
//!   snipvault completions zsh
//!   snipvault completions fish

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    write_completions(shell, &mut io::stdout())
}

/// Write the completion script for `shell` to `out`.
fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "snipvault", out);
    out.flush()?;
    Ok(())
}
