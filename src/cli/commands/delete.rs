//! `snipvault delete` — remove a snippet from the vault.

use crate::cli::output;
use crate::cli::{open_store, validate_snippet_name, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    validate_snippet_name(name)?;
    let store = open_store(cli)?;

    let outcome = store.delete(name)?;
    output::outcome(&outcome);

    Ok(())
}
