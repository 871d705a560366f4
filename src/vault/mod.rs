//! Vault module — encrypted snippet storage.
//!
//! This module provides:
//! - `Outcome`, `Notice`, and `Level` for reporting results (`outcome`)
//! - The SQLite-backed `SnippetStore` (`store`)

pub mod outcome;
pub mod store;

// Re-export the most commonly used items.
pub use outcome::{Level, Notice, Outcome};
pub use store::{SnippetStore, DEFAULT_BUSY_TIMEOUT};
