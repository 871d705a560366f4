use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SnipVault.
///
/// Only infrastructure failures live here. A missing or duplicate snippet
/// name is reported through `vault::Outcome`, never as an error.
#[derive(Debug, Error)]
pub enum SnipVaultError {
    // --- Key file errors ---
    #[error("Key file error at {}: {source}", .path.display())]
    KeyIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed vault key: {0}")]
    KeyFormat(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    // --- Store errors ---
    #[error("Snippet store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Snippet store error at {}: {source}", .path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Config errors ---
    #[error("Config error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl SnipVaultError {
    /// Wrap an I/O failure on the key file together with its path.
    pub fn key_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::KeyIo {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O failure on the database file or its directory.
    pub fn store_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreIo {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for SnipVault results.
pub type Result<T> = std::result::Result<T, SnipVaultError>;
