//! Configuration: `~/.snipvault.toml` and default file locations.

pub mod settings;

pub use settings::{home_dir, Settings, VaultPaths};
