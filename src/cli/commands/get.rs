//! `snipvault get` — decrypt and print a single snippet's value.

use crate::cli::output;
use crate::cli::{open_store, validate_snippet_name, Cli};
use crate::errors::Result;
use crate::vault::Outcome;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    validate_snippet_name(name)?;
    let store = open_store(cli)?;

    match store.get(name)? {
        // The plaintext goes to stdout alone so it can be piped.
        Outcome::Found { value, .. } => println!("{}", value.as_str()),
        other => output::outcome(&other),
    }

    Ok(())
}
