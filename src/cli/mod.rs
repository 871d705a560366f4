//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{home_dir, Settings, VaultPaths};
use crate::errors::{Result, SnipVaultError};
use crate::vault::SnippetStore;

/// Longest snippet name the CLI accepts.
const MAX_NAME_LEN: usize = 256;

/// SnipVault CLI: encrypted snippet vault.
#[derive(Parser)]
#[command(
    name = "snipvault",
    about = "Encrypted vault for short secret snippets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Snippet database path (default: ~/snip_vault.db)
    #[arg(long, env = "SNIPVAULT_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Key file path (default: ~/.secure_snippet_key)
    #[arg(long, env = "SNIPVAULT_KEY_FILE", global = true)]
    pub key_file: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Save a new snippet (never overwrites an existing one)
    Save {
        /// Snippet name
        name: String,
        /// Snippet value (omit for piped input or interactive prompt)
        value: Option<String>,
    },

    /// Print a snippet's value
    Get {
        /// Snippet name
        name: String,
    },

    /// Replace the value of an existing snippet
    Update {
        /// Snippet name
        name: String,
        /// New value (omit for piped input or interactive prompt)
        value: Option<String>,
    },

    /// Delete a snippet
    Delete {
        /// Snippet name
        name: String,
    },

    /// Delete every snippet
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List snippet names
    List {
        /// Print names as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Open the snippet store using CLI overrides, `~/.snipvault.toml`, and
/// the default locations, in that order of precedence.
///
/// The key file is loaded (or generated) before the database is opened.
pub fn open_store(cli: &Cli) -> Result<SnippetStore> {
    // A home directory is only required when some path falls back to it.
    let (settings, paths) = match home_dir() {
        Ok(home) => {
            let settings = Settings::load(&home)?;
            let paths = settings.resolve(&home, cli.db.as_deref(), cli.key_file.as_deref());
            (settings, paths)
        }
        Err(e) => match (&cli.db, &cli.key_file) {
            (Some(db), Some(key)) => (
                Settings::default(),
                VaultPaths {
                    db_path: db.clone(),
                    key_path: key.clone(),
                },
            ),
            _ => return Err(e),
        },
    };

    SnippetStore::open_with_paths(&paths, settings.busy_timeout())
}

/// Determine a snippet value from one of three sources:
/// the command line, piped stdin, or a hidden interactive prompt.
///
/// Returns `Zeroizing<String>` so the value is wiped from memory on drop.
pub fn read_value(name: &str, value: Option<&str>) -> Result<Zeroizing<String>> {
    let value = if let Some(v) = value {
        output::warning("Value provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string())
    } else {
        let v = dialoguer::Password::new()
            .with_prompt(format!("Enter value for {name}"))
            .interact()
            .map_err(|e| SnipVaultError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(v)
    };

    if value.is_empty() {
        return Err(SnipVaultError::CommandFailed(format!(
            "a value is required for snippet '{name}'"
        )));
    }

    Ok(value)
}

/// Validate that a snippet name is usable.
///
/// Must be non-empty, at most 256 characters, and free of control
/// characters.  Everything else (spaces, dots, unicode) is allowed.
pub fn validate_snippet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SnipVaultError::CommandFailed(
            "snippet name cannot be empty".into(),
        ));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(SnipVaultError::CommandFailed(format!(
            "snippet name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }

    if name.chars().any(char::is_control) {
        return Err(SnipVaultError::CommandFailed(format!(
            "snippet name '{}' contains control characters",
            name.escape_debug()
        )));
    }

    Ok(())
}
