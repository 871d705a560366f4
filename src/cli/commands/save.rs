//! `snipvault save` — store a new snippet without overwriting.

use crate::cli::output;
use crate::cli::{open_store, read_value, validate_snippet_name, Cli};
use crate::errors::Result;
use crate::vault::Outcome;

/// Execute the `save` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>) -> Result<()> {
    validate_snippet_name(name)?;
    let value = read_value(name, value)?;

    let store = open_store(cli)?;
    let outcome = store.save(name, &value)?;
    output::outcome(&outcome);

    if let Outcome::AlreadyExists { .. } = outcome {
        output::tip(&format!("Run `snipvault update {name}` to replace its value."));
    }

    Ok(())
}
