//! `snipvault update` — replace the value of an existing snippet.

use crate::cli::output;
use crate::cli::{open_store, read_value, validate_snippet_name, Cli};
use crate::errors::Result;
use crate::vault::Outcome;

/// Execute the `update` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>) -> Result<()> {
    validate_snippet_name(name)?;
    let value = read_value(name, value)?;

    let store = open_store(cli)?;
    let outcome = store.update(name, &value)?;
    output::outcome(&outcome);

    if let Outcome::NotFound { .. } = outcome {
        output::tip(&format!("Run `snipvault save {name}` to create it."));
    }

    Ok(())
}
