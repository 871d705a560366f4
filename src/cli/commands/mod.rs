//! One module per CLI subcommand.

pub mod clear;
pub mod completions;
pub mod delete;
pub mod get;
pub mod list;
pub mod save;
pub mod update;
pub mod version;
