//! `snipvault clear` — remove every snippet from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{Result, SnipVaultError};

/// Execute the `clear` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let store = open_store(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let count = store.count()?;
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete all {count} snippet(s)? This cannot be undone"))
            .default(false)
            .interact()
            .map_err(|e| SnipVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let outcome = store.clear_all()?;
    output::outcome(&outcome);

    Ok(())
}
