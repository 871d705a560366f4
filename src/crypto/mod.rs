//! Cryptographic primitives for SnipVault.
//!
//! This module provides:
//! - The in-memory vault key (`key`)
//! - Key file generation, persistence, and loading (`keyfile`)
//! - AES-256-GCM sealing of snippet values to base64 text (`encryption`)

pub mod encryption;
pub mod key;
pub mod keyfile;

pub use encryption::{open, seal};
pub use key::{VaultKey, KEY_LEN};
pub use keyfile::{load_key, load_or_create_key};
