//! `snipvault list` — show the names of all stored snippets.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{Result, SnipVaultError};
use crate::vault::Outcome;

/// Execute the `list` command.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let store = open_store(cli)?;
    let outcome = store.list()?;

    if json {
        let names: &[String] = match &outcome {
            Outcome::Listed { names } => names.as_slice(),
            _ => &[],
        };
        println!("{}", format_as_json(names)?);
        return Ok(());
    }

    output::outcome(&outcome);
    if let Outcome::Listed { names } = &outcome {
        output::print_snippets_table(names);
    } else {
        output::tip("Run `snipvault save <NAME>` to add your first snippet.");
    }

    Ok(())
}

/// Serialize snippet names as a pretty JSON array.
fn format_as_json(names: &[String]) -> Result<String> {
    serde_json::to_string_pretty(names)
        .map_err(|e| SnipVaultError::CommandFailed(format!("JSON serialization: {e}")))
}
